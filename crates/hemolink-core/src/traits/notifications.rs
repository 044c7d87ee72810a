// SPDX-FileCopyrightText: 2026 Hemolink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Notification persistence and the guarded state transition.

use async_trait::async_trait;

use crate::error::HemolinkError;
use crate::types::{
    DonorId, HospitalId, NewNotification, NotificationId, NotificationStatus, NotificationView,
};

/// Outcome of a compare-and-set attempt on a notification.
///
/// The three cases let the caller distinguish "zero rows changed because
/// the notification was already resolved" from "zero rows changed because
/// it never existed (or belongs to another donor)".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The transition applied. Carries the hospital that raised the
    /// request, for the donation-history side effect.
    Applied { hospital_id: HospitalId },
    /// The notification exists and belongs to the donor, but is no longer
    /// pending.
    AlreadyResolved,
    /// No notification with this id belongs to the donor.
    NotFound,
}

/// Persistence for notification rows and their single state transition.
#[async_trait]
pub trait NotificationStore: Send + Sync {
    /// Insert a batch of pending notifications, one per eligible donor.
    ///
    /// Not required to be atomic across rows: on storage failure, rows
    /// inserted so far remain. Returns the number inserted.
    async fn insert_pending(&self, batch: Vec<NewNotification>) -> Result<usize, HemolinkError>;

    /// Compare-and-set: move the notification to `status` only if it is
    /// currently pending AND belongs to `donor_id`, as a single
    /// conditional write. Exactly one of two concurrent callers observes
    /// `Applied`.
    async fn resolve(
        &self,
        id: NotificationId,
        donor_id: DonorId,
        status: NotificationStatus,
    ) -> Result<Resolution, HemolinkError>;

    /// All notifications for a donor, most recent first, with the
    /// hospital name joined in.
    async fn for_donor(&self, donor_id: DonorId) -> Result<Vec<NotificationView>, HemolinkError>;
}
