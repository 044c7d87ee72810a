// SPDX-FileCopyrightText: 2026 Hemolink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Append-only donation history.

use async_trait::async_trait;

use crate::error::HemolinkError;
use crate::types::{DonorId, HistoryId, HistoryView, HospitalId};

/// Append-only record of accepted donations.
///
/// One row per acceptance; rows are never updated or deleted. Repeated
/// acceptances between the same donor and hospital each get their own row.
#[async_trait]
pub trait HistoryRecorder: Send + Sync {
    /// Append one donation record with the current timestamp.
    async fn append(
        &self,
        donor_id: DonorId,
        hospital_id: HospitalId,
    ) -> Result<HistoryId, HemolinkError>;

    /// All donation records for a donor, most recent first, with the
    /// hospital name joined in.
    async fn for_donor(&self, donor_id: DonorId) -> Result<Vec<HistoryView>, HemolinkError>;
}
