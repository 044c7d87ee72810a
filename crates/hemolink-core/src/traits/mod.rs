// SPDX-FileCopyrightText: 2026 Hemolink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Store trait seams between the engine and its persistence backend.
//!
//! Any conforming backend (relational, key-value) can implement these;
//! the engine is written against the traits only.

pub mod directory;
pub mod history;
pub mod notifications;

pub use directory::DonorDirectory;
pub use history::HistoryRecorder;
pub use notifications::{NotificationStore, Resolution};
