// SPDX-FileCopyrightText: 2026 Hemolink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration error types and terminal rendering.

use thiserror::Error;

/// A single configuration problem, collected rather than failed-fast so
/// the operator sees everything wrong in one run.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The TOML (or an env override) failed to parse or deserialize.
    #[error("config parse error: {message}")]
    Parse { message: String },

    /// The config deserialized but a value is semantically invalid.
    #[error("config validation error: {message}")]
    Validation { message: String },
}

/// Render collected configuration errors to stderr, one per line.
pub fn render_errors(errors: &[ConfigError]) {
    eprintln!("hemolink: configuration invalid ({} error(s))", errors.len());
    for error in errors {
        eprintln!("  - {error}");
    }
}
