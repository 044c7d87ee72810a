// SPDX-FileCopyrightText: 2026 Hemolink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Hemolink emergency blood-request engine.
//!
//! This crate provides the error taxonomy, domain types, and store trait
//! seams used throughout the Hemolink workspace. It performs no I/O; the
//! storage and engine crates build on the definitions here.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::HemolinkError;
pub use types::{
    BloodGroup, Donor, DonorId, DonorResponse, EmergencyRequest, HistoryId, HistoryView, Hospital,
    HospitalId, NewNotification, NotificationId, NotificationStatus, NotificationView,
};

pub use traits::{DonorDirectory, HistoryRecorder, NotificationStore, Resolution};
