// SPDX-FileCopyrightText: 2026 Hemolink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Query modules for the storage entities.

pub mod donors;
pub mod history;
pub mod hospitals;
pub mod notifications;
