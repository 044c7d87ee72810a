// SPDX-FileCopyrightText: 2026 Hemolink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Read-only view over donor and hospital records owned by the external
//! account subsystem.

use async_trait::async_trait;

use crate::error::HemolinkError;
use crate::types::{Donor, HospitalId};

/// Read-only access to the donor pool and hospital registry.
///
/// Eligibility is exact, case-sensitive string equality on both fields,
/// against the values as persisted. An unrecognized blood-group string is
/// not an error here; it simply matches no rows.
#[async_trait]
pub trait DonorDirectory: Send + Sync {
    /// Donors whose stored blood group and location both equal the given
    /// strings exactly.
    async fn find_eligible(
        &self,
        blood_group: &str,
        location: &str,
    ) -> Result<Vec<Donor>, HemolinkError>;

    /// Donor search with optional exact-match filters. An absent filter
    /// matches all rows.
    async fn search(
        &self,
        blood_group: Option<&str>,
        location: Option<&str>,
    ) -> Result<Vec<Donor>, HemolinkError>;

    /// Whether a hospital record with this id exists. Lets the engine
    /// reject a dangling hospital reference before creating notifications.
    async fn hospital_exists(&self, id: HospitalId) -> Result<bool, HemolinkError>;
}
