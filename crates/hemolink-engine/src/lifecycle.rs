// SPDX-FileCopyrightText: 2026 Hemolink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The notification lifecycle: a single guarded transition per notification.
//!
//! States: pending -> accepted | rejected. Terminal states absorb. The
//! transition itself is the store's compare-and-set; this module adds the
//! donation-history side effect on acceptance.

use hemolink_core::traits::{DonorDirectory, HistoryRecorder, NotificationStore, Resolution};
use hemolink_core::{DonorId, DonorResponse, HemolinkError, NotificationId, NotificationStatus};
use serde::Serialize;
use tracing::{error, info};

use crate::Engine;

/// Result of a successful response to a notification.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RespondOutcome {
    /// The terminal status the notification moved into.
    pub status: NotificationStatus,
    /// Whether the donation-history row was written. Only ever true for
    /// acceptances; false on an acceptance means the append failed after
    /// the transition committed, a recoverable inconsistency that is
    /// reported rather than rolled back.
    pub history_recorded: bool,
}

impl<S> Engine<S>
where
    S: DonorDirectory + NotificationStore + HistoryRecorder,
{
    /// Apply a donor's response to a notification.
    ///
    /// The transition applies only if the notification is currently
    /// pending AND belongs to `donor_id`; under concurrent duplicate
    /// responses exactly one caller succeeds and the rest get
    /// `AlreadyResolved`. On acceptance, exactly one donation-history row
    /// is appended. The transition is the source of truth: a failed
    /// history append never rolls it back.
    pub async fn respond(
        &self,
        id: NotificationId,
        donor_id: DonorId,
        response: DonorResponse,
    ) -> Result<RespondOutcome, HemolinkError> {
        let status = response.as_status();

        match self.store().resolve(id, donor_id, status).await? {
            Resolution::Applied { hospital_id } => {
                let mut history_recorded = false;
                if response == DonorResponse::Accepted {
                    match self.store().append(donor_id, hospital_id).await {
                        Ok(_) => history_recorded = true,
                        Err(e) => {
                            // The accepted status stands; the missing row
                            // is recoverable by an operator.
                            error!(
                                notification_id = id.0,
                                donor_id = donor_id.0,
                                hospital_id = hospital_id.0,
                                error = %e,
                                "donation-history append failed after accepted transition"
                            );
                        }
                    }
                }
                info!(
                    notification_id = id.0,
                    donor_id = donor_id.0,
                    status = %status,
                    history_recorded,
                    "notification resolved"
                );
                Ok(RespondOutcome {
                    status,
                    history_recorded,
                })
            }
            Resolution::AlreadyResolved => Err(HemolinkError::AlreadyResolved { id: id.0 }),
            Resolution::NotFound => Err(HemolinkError::NotFound {
                what: format!("notification {} for donor {}", id.0, donor_id.0),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use hemolink_core::{BloodGroup, EmergencyRequest, HospitalId};
    use hemolink_storage::queries::{donors, history, hospitals, notifications};
    use hemolink_storage::SqliteStorage;

    use super::*;
    use crate::Engine;

    struct Fixture {
        engine: Engine<SqliteStorage>,
        storage: Arc<SqliteStorage>,
        donor: DonorId,
        hospital: HospitalId,
    }

    /// One donor, one hospital, one pending notification raised between them.
    async fn fixture() -> (Fixture, NotificationId) {
        let storage = Arc::new(SqliteStorage::open_in_memory().await.unwrap());
        let donor = donors::insert(
            storage.database(),
            "Dana",
            "dana@example.com",
            "555-0101",
            "Springfield",
            BloodGroup::ONegative,
            "1990-04-02",
        )
        .await
        .unwrap();
        let hospital = hospitals::insert(
            storage.database(),
            "Springfield General",
            "ops@sgh.example.com",
            "555-0200",
            "Springfield",
            "REG-77",
        )
        .await
        .unwrap();

        let engine = Engine::new(storage.clone());
        engine
            .raise_request(&EmergencyRequest {
                hospital_id: hospital,
                location: "Springfield".to_string(),
                blood_group: "O-".to_string(),
                message: "Urgent need".to_string(),
            })
            .await
            .unwrap();

        let id = notifications::for_donor(storage.database(), donor).await.unwrap()[0].id;
        let fx = Fixture {
            engine,
            storage,
            donor,
            hospital,
        };
        (fx, id)
    }

    #[tokio::test]
    async fn accepting_records_history_once() {
        let (fx, id) = fixture().await;

        let outcome = fx
            .engine
            .respond(id, fx.donor, DonorResponse::Accepted)
            .await
            .unwrap();
        assert_eq!(outcome.status, NotificationStatus::Accepted);
        assert!(outcome.history_recorded);

        let rows = history::for_donor(fx.storage.database(), fx.donor).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].hospital_name, "Springfield General");

        let feed = notifications::for_donor(fx.storage.database(), fx.donor).await.unwrap();
        assert_eq!(feed[0].status, NotificationStatus::Accepted);
        let _ = fx.hospital;
    }

    #[tokio::test]
    async fn rejecting_never_creates_history() {
        let (fx, id) = fixture().await;

        let outcome = fx
            .engine
            .respond(id, fx.donor, DonorResponse::Rejected)
            .await
            .unwrap();
        assert_eq!(outcome.status, NotificationStatus::Rejected);
        assert!(!outcome.history_recorded);

        assert_eq!(
            history::count_for_donor(fx.storage.database(), fx.donor).await.unwrap(),
            0
        );
    }

    #[tokio::test]
    async fn second_response_is_already_resolved_with_one_history_row() {
        let (fx, id) = fixture().await;

        fx.engine
            .respond(id, fx.donor, DonorResponse::Accepted)
            .await
            .unwrap();
        let err = fx
            .engine
            .respond(id, fx.donor, DonorResponse::Accepted)
            .await
            .unwrap_err();
        assert!(matches!(err, HemolinkError::AlreadyResolved { .. }));

        assert_eq!(
            history::count_for_donor(fx.storage.database(), fx.donor).await.unwrap(),
            1
        );
    }

    #[tokio::test]
    async fn responding_to_someone_elses_notification_is_not_found() {
        let (fx, id) = fixture().await;
        let intruder = donors::insert(
            fx.storage.database(),
            "Evan",
            "evan@example.com",
            "555-0102",
            "Springfield",
            BloodGroup::ONegative,
            "1985-11-20",
        )
        .await
        .unwrap();

        let err = fx
            .engine
            .respond(id, intruder, DonorResponse::Accepted)
            .await
            .unwrap_err();
        assert!(matches!(err, HemolinkError::NotFound { .. }));

        // Still pending for the rightful donor.
        let feed = notifications::for_donor(fx.storage.database(), fx.donor).await.unwrap();
        assert_eq!(feed[0].status, NotificationStatus::Pending);
    }

    #[tokio::test]
    async fn responding_to_unknown_notification_is_not_found() {
        let (fx, _id) = fixture().await;
        let err = fx
            .engine
            .respond(NotificationId(9999), fx.donor, DonorResponse::Accepted)
            .await
            .unwrap_err();
        assert!(matches!(err, HemolinkError::NotFound { .. }));
    }

    #[tokio::test]
    async fn concurrent_accept_and_reject_settle_to_exactly_one_transition() {
        let (fx, id) = fixture().await;

        let accept = {
            let engine = fx.engine.clone();
            let donor = fx.donor;
            tokio::spawn(async move { engine.respond(id, donor, DonorResponse::Accepted).await })
        };
        let reject = {
            let engine = fx.engine.clone();
            let donor = fx.donor;
            tokio::spawn(async move { engine.respond(id, donor, DonorResponse::Rejected).await })
        };

        let results = [accept.await.unwrap(), reject.await.unwrap()];
        let ok_count = results.iter().filter(|r| r.is_ok()).count();
        let resolved_count = results
            .iter()
            .filter(|r| matches!(r, Err(HemolinkError::AlreadyResolved { .. })))
            .count();
        assert_eq!(ok_count, 1, "exactly one response wins");
        assert_eq!(resolved_count, 1, "the loser sees AlreadyResolved");

        // At most one history row, and only if the acceptance won.
        let history_rows =
            history::count_for_donor(fx.storage.database(), fx.donor).await.unwrap();
        assert!(history_rows <= 1);
        let feed = notifications::for_donor(fx.storage.database(), fx.donor).await.unwrap();
        if feed[0].status == NotificationStatus::Accepted {
            assert_eq!(history_rows, 1);
        } else {
            assert_eq!(history_rows, 0);
        }
    }
}
