// SPDX-FileCopyrightText: 2026 Docent Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./docent.toml` > `~/.config/docent/docent.toml` >
//! `/etc/docent/docent.toml` with environment variable overrides via the
//! `DOCENT_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::DocentConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/docent/docent.toml` (system-wide)
/// 3. `~/.config/docent/docent.toml` (user XDG config)
/// 4. `./docent.toml` (local directory)
/// 5. `DOCENT_*` environment variables
pub fn load_config() -> Result<DocentConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(DocentConfig::default()))
        .merge(Toml::file("/etc/docent/docent.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("docent/docent.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("docent.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env vars).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<DocentConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(DocentConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<DocentConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(DocentConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `DOCENT_AZURE_API_KEY` must map to
/// `azure.api_key`, not `azure.api.key`.
fn env_provider() -> Env {
    Env::prefixed("DOCENT_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: DOCENT_AZURE_API_KEY -> "azure_api_key"
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("service_", "service.", 1)
            .replacen("server_", "server.", 1)
            .replacen("azure_", "azure.", 1)
            .replacen("search_", "search.", 1)
            .replacen("guide_", "guide.", 1)
            .replacen("feedback_", "feedback.", 1);
        mapped.into()
    })
}
