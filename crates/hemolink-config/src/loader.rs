// SPDX-FileCopyrightText: 2026 Hemolink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports the XDG hierarchy: `./hemolink.toml` > `~/.config/hemolink/hemolink.toml`
//! > `/etc/hemolink/hemolink.toml`, with environment variable overrides via
//! the `HEMOLINK_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::HemolinkConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/hemolink/hemolink.toml` (system-wide)
/// 3. `~/.config/hemolink/hemolink.toml` (user XDG config)
/// 4. `./hemolink.toml` (local directory)
/// 5. `HEMOLINK_*` environment variables
pub fn load_config() -> Result<HemolinkConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(HemolinkConfig::default()))
        .merge(Toml::file("/etc/hemolink/hemolink.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("hemolink/hemolink.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("hemolink.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<HemolinkConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(HemolinkConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<HemolinkConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(HemolinkConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` so that underscore-containing
/// key names stay unambiguous: `HEMOLINK_STORAGE_DATABASE_PATH` must map
/// to `storage.database_path`, not `storage.database.path`.
fn env_provider() -> Env {
    Env::prefixed("HEMOLINK_").map(|key| {
        let mapped = key
            .as_str()
            .replacen("storage_", "storage.", 1)
            .replacen("server_", "server.", 1)
            .replacen("log_", "log.", 1);
        mapped.into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toml_overrides_defaults() {
        let config =
            load_config_from_str("[server]\nport = 8080\n").expect("valid toml should load");
        assert_eq!(config.server.port, 8080);
        // Untouched sections keep their defaults.
        assert_eq!(config.log.level, "info");
    }

    #[test]
    fn empty_toml_yields_defaults() {
        let config = load_config_from_str("").expect("empty toml should load");
        assert_eq!(config.server.host, "127.0.0.1");
    }

    #[test]
    fn malformed_toml_is_an_error() {
        assert!(load_config_from_str("[server\nport = 8080").is_err());
    }
}
