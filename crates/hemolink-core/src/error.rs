// SPDX-FileCopyrightText: 2026 Hemolink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Hemolink engine.

use thiserror::Error;

/// The primary error type used across Hemolink store traits and engine operations.
#[derive(Debug, Error)]
pub enum HemolinkError {
    /// A request carried a malformed or missing value. Final for the caller;
    /// retrying the same input will fail the same way.
    #[error("invalid argument `{field}`: {reason}")]
    InvalidArgument { field: &'static str, reason: String },

    /// The referenced entity does not exist, or a request matched no donors.
    #[error("not found: {what}")]
    NotFound { what: String },

    /// A response was submitted for a notification that is no longer pending.
    /// The earlier transition stands; the caller should treat this as final.
    #[error("notification {id} already resolved")]
    AlreadyResolved { id: i64 },

    /// Storage backend errors (database connection, query failure, migration).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Configuration errors (invalid TOML, missing required fields).
    #[error("configuration error: {0}")]
    Config(String),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl HemolinkError {
    /// Build a `Storage` error from any underlying error.
    pub fn storage<E>(source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        HemolinkError::Storage {
            source: Box::new(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_distinguishes_not_found_from_already_resolved() {
        let not_found = HemolinkError::NotFound {
            what: "notification 42".into(),
        };
        let resolved = HemolinkError::AlreadyResolved { id: 42 };

        assert_eq!(not_found.to_string(), "not found: notification 42");
        assert_eq!(resolved.to_string(), "notification 42 already resolved");
    }

    #[test]
    fn storage_error_carries_source() {
        let err = HemolinkError::storage(std::io::Error::other("disk gone"));
        assert!(err.to_string().contains("disk gone"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
