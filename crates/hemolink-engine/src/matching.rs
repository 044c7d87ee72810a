// SPDX-FileCopyrightText: 2026 Hemolink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The matching engine: from an emergency request to pending notifications.

use hemolink_core::traits::{DonorDirectory, HistoryRecorder, NotificationStore};
use hemolink_core::{EmergencyRequest, HemolinkError, NewNotification};
use serde::Serialize;
use tracing::{debug, info};

use crate::Engine;

/// Result of raising an emergency request.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RaiseOutcome {
    /// Number of pending notifications created, one per eligible donor.
    pub notified: usize,
}

impl<S> Engine<S>
where
    S: DonorDirectory + NotificationStore + HistoryRecorder,
{
    /// Raise an emergency request: notify every donor whose stored blood
    /// group and location equal the request's values exactly.
    ///
    /// The match is deterministic and explainable on purpose: a local,
    /// exact-type match, not an ABO-compatible one. An unrecognized blood
    /// group is not an error; it matches zero donors. An unknown hospital
    /// reference and zero eligible donors are both `NotFound` and create
    /// nothing. The bulk insert is not atomic
    /// across rows; repeated identical requests produce duplicate
    /// notifications by design.
    pub async fn raise_request(
        &self,
        request: &EmergencyRequest,
    ) -> Result<RaiseOutcome, HemolinkError> {
        if request.location.trim().is_empty() {
            return Err(HemolinkError::InvalidArgument {
                field: "location",
                reason: "must not be empty".to_string(),
            });
        }
        if request.blood_group.trim().is_empty() {
            return Err(HemolinkError::InvalidArgument {
                field: "blood_group",
                reason: "must not be empty".to_string(),
            });
        }

        // A dangling hospital reference must fail as a client error, not
        // as a foreign-key violation surfacing from the bulk insert.
        if !self.store().hospital_exists(request.hospital_id).await? {
            return Err(HemolinkError::NotFound {
                what: format!("hospital {}", request.hospital_id.0),
            });
        }

        let eligible = self
            .store()
            .find_eligible(&request.blood_group, &request.location)
            .await?;

        if eligible.is_empty() {
            debug!(
                hospital_id = request.hospital_id.0,
                blood_group = %request.blood_group,
                location = %request.location,
                "no eligible donors for emergency request"
            );
            return Err(HemolinkError::NotFound {
                what: format!(
                    "donors with blood group {} in {}",
                    request.blood_group, request.location
                ),
            });
        }

        let batch: Vec<NewNotification> = eligible
            .iter()
            .map(|donor| NewNotification {
                donor_id: donor.id,
                hospital_id: request.hospital_id,
                message: request.message.clone(),
            })
            .collect();

        let notified = self.store().insert_pending(batch).await?;

        info!(
            hospital_id = request.hospital_id.0,
            blood_group = %request.blood_group,
            location = %request.location,
            notified,
            "emergency request raised"
        );

        Ok(RaiseOutcome { notified })
    }
}
