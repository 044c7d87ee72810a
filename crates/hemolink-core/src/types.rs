// SPDX-FileCopyrightText: 2026 Hemolink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain types shared across the Hemolink workspace.
//!
//! Donor and Hospital records are owned by the external account subsystem
//! and are read-only here. Notifications and donation-history rows are
//! the only entities the engine creates or mutates, and they surface to
//! callers as the joined view types.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Unique identifier of a donor record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DonorId(pub i64);

/// Unique identifier of a hospital record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HospitalId(pub i64);

/// Unique identifier of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NotificationId(pub i64);

/// Unique identifier of a donation-history row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HistoryId(pub i64);

/// The eight canonical ABO/Rh blood groups.
///
/// Serialized everywhere (storage, config, HTTP) as the clinical notation
/// (`"A+"`, `"O-"`, ...). Parsing is strict: anything outside the eight
/// values fails, and callers decide whether that is an error (donor rows)
/// or simply zero matches (emergency requests).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, Serialize, Deserialize,
)]
pub enum BloodGroup {
    #[strum(serialize = "A+")]
    #[serde(rename = "A+")]
    APositive,
    #[strum(serialize = "A-")]
    #[serde(rename = "A-")]
    ANegative,
    #[strum(serialize = "B+")]
    #[serde(rename = "B+")]
    BPositive,
    #[strum(serialize = "B-")]
    #[serde(rename = "B-")]
    BNegative,
    #[strum(serialize = "AB+")]
    #[serde(rename = "AB+")]
    AbPositive,
    #[strum(serialize = "AB-")]
    #[serde(rename = "AB-")]
    AbNegative,
    #[strum(serialize = "O+")]
    #[serde(rename = "O+")]
    OPositive,
    #[strum(serialize = "O-")]
    #[serde(rename = "O-")]
    ONegative,
}

/// A registered donor, as supplied by the external account subsystem.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Donor {
    pub id: DonorId,
    pub name: String,
    pub email: String,
    pub phone: String,
    /// Free-text location string, matched by exact equality.
    pub location: String,
    pub blood_group: BloodGroup,
    /// ISO 8601 date.
    pub date_of_birth: String,
}

/// A registered hospital, as supplied by the external account subsystem.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hospital {
    pub id: HospitalId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub registration_number: String,
}

/// An urgent blood request raised by a hospital.
///
/// Ephemeral: consumed by the matching engine and never persisted as its
/// own entity. `blood_group` is kept as the raw request string so that an
/// unrecognized value yields zero matches instead of a parse failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmergencyRequest {
    pub hospital_id: HospitalId,
    pub location: String,
    pub blood_group: String,
    pub message: String,
}

/// Lifecycle state of a notification.
///
/// `Pending` is the only initial state. `Accepted` and `Rejected` are
/// terminal: no transition leaves them.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum NotificationStatus {
    Pending,
    Accepted,
    Rejected,
}

impl NotificationStatus {
    /// Whether this status permits no further transition.
    pub fn is_terminal(self) -> bool {
        matches!(self, NotificationStatus::Accepted | NotificationStatus::Rejected)
    }
}

/// A donor's answer to a notification. Only these two literals parse;
/// everything else is rejected as an invalid argument upstream.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum DonorResponse {
    Accepted,
    Rejected,
}

impl DonorResponse {
    /// The terminal status this response drives the notification into.
    pub fn as_status(self) -> NotificationStatus {
        match self {
            DonorResponse::Accepted => NotificationStatus::Accepted,
            DonorResponse::Rejected => NotificationStatus::Rejected,
        }
    }
}

/// A notification to be inserted, always starting out pending.
#[derive(Debug, Clone)]
pub struct NewNotification {
    pub donor_id: DonorId,
    pub hospital_id: HospitalId,
    pub message: String,
}

/// Donor-facing feed row: a notification with the hospital name joined in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationView {
    pub id: NotificationId,
    pub hospital_name: String,
    pub message: String,
    pub status: NotificationStatus,
    pub created_at: String,
}

/// Donor-facing feed row: a past donation with the hospital name joined in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryView {
    pub id: HistoryId,
    pub hospital_name: String,
    pub donation_date: String,
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn blood_group_round_trips_clinical_notation() {
        for group in BloodGroup::iter() {
            let s = group.to_string();
            let parsed = BloodGroup::from_str(&s).expect("canonical notation should parse");
            assert_eq!(group, parsed);
        }
        assert_eq!(BloodGroup::from_str("O-").unwrap(), BloodGroup::ONegative);
        assert_eq!(BloodGroup::AbPositive.to_string(), "AB+");
    }

    #[test]
    fn blood_group_rejects_unrecognized_values() {
        assert!(BloodGroup::from_str("").is_err());
        assert!(BloodGroup::from_str("C+").is_err());
        assert!(BloodGroup::from_str("o-").is_err());
        assert!(BloodGroup::from_str("AB").is_err());
    }

    #[test]
    fn blood_group_serde_uses_clinical_notation() {
        let json = serde_json::to_string(&BloodGroup::ONegative).unwrap();
        assert_eq!(json, "\"O-\"");
        let parsed: BloodGroup = serde_json::from_str("\"AB+\"").unwrap();
        assert_eq!(parsed, BloodGroup::AbPositive);
    }

    #[test]
    fn status_terminality() {
        assert!(!NotificationStatus::Pending.is_terminal());
        assert!(NotificationStatus::Accepted.is_terminal());
        assert!(NotificationStatus::Rejected.is_terminal());
    }

    #[test]
    fn status_round_trips_storage_strings() {
        for status in [
            NotificationStatus::Pending,
            NotificationStatus::Accepted,
            NotificationStatus::Rejected,
        ] {
            let s = status.to_string();
            assert_eq!(NotificationStatus::from_str(&s).unwrap(), status);
        }
        assert_eq!(NotificationStatus::Pending.to_string(), "pending");
    }

    #[test]
    fn donor_response_parses_only_two_literals() {
        assert_eq!(
            DonorResponse::from_str("accepted").unwrap(),
            DonorResponse::Accepted
        );
        assert_eq!(
            DonorResponse::from_str("rejected").unwrap(),
            DonorResponse::Rejected
        );
        assert!(DonorResponse::from_str("pending").is_err());
        assert!(DonorResponse::from_str("maybe").is_err());
        assert!(DonorResponse::from_str("").is_err());
    }

    #[test]
    fn donor_response_maps_to_terminal_status() {
        assert_eq!(
            DonorResponse::Accepted.as_status(),
            NotificationStatus::Accepted
        );
        assert_eq!(
            DonorResponse::Rejected.as_status(),
            NotificationStatus::Rejected
        );
        assert!(DonorResponse::Accepted.as_status().is_terminal());
    }
}
