// SPDX-FileCopyrightText: 2026 Hemolink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Donor-facing read feeds and the hospital dashboard's donor search.

use hemolink_core::traits::{DonorDirectory, HistoryRecorder, NotificationStore};
use hemolink_core::{Donor, DonorId, HemolinkError, HistoryView, NotificationView};

use crate::Engine;

impl<S> Engine<S>
where
    S: DonorDirectory + NotificationStore + HistoryRecorder,
{
    /// A donor's notifications, most recent first.
    pub async fn notifications_for(
        &self,
        donor_id: DonorId,
    ) -> Result<Vec<NotificationView>, HemolinkError> {
        NotificationStore::for_donor(self.store(), donor_id).await
    }

    /// A donor's donation history, most recent first.
    pub async fn history_for(&self, donor_id: DonorId) -> Result<Vec<HistoryView>, HemolinkError> {
        HistoryRecorder::for_donor(self.store(), donor_id).await
    }

    /// Donor search with optional exact-match filters on blood group and
    /// location; an absent filter matches everything.
    pub async fn find_donors(
        &self,
        blood_group: Option<&str>,
        location: Option<&str>,
    ) -> Result<Vec<Donor>, HemolinkError> {
        self.store().search(blood_group, location).await
    }
}
