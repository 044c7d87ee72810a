// SPDX-FileCopyrightText: 2026 Hemolink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for the Hemolink engine.
//!
//! TOML configuration with strict validation (`deny_unknown_fields`), XDG
//! file hierarchy lookup, and `HEMOLINK_*` environment variable overrides.
//! There is no global mutable configuration state; the loaded struct is
//! passed explicitly to whatever needs it.

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

pub use diagnostic::{render_errors, ConfigError};
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::HemolinkConfig;

/// Load configuration from the XDG hierarchy and validate it.
///
/// Returns either a valid `HemolinkConfig` or the full list of collected
/// errors (loading does not fail fast on the first problem).
pub fn load_and_validate() -> Result<HemolinkConfig, Vec<ConfigError>> {
    match loader::load_config() {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => Err(vec![ConfigError::Parse {
            message: err.to_string(),
        }]),
    }
}

/// Load configuration from a TOML string and validate it.
///
/// Useful for testing and explicit configuration.
pub fn load_and_validate_str(toml_content: &str) -> Result<HemolinkConfig, Vec<ConfigError>> {
    match loader::load_config_from_str(toml_content) {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => Err(vec![ConfigError::Parse {
            message: err.to_string(),
        }]),
    }
}
