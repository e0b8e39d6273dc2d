// SPDX-FileCopyrightText: 2026 Imago Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./imago.toml` > `~/.config/imago/imago.toml`
//! > `/etc/imago/imago.toml` with environment variable overrides via
//! `IMAGO_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::ImagoConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/imago/imago.toml` (system-wide)
/// 3. `~/.config/imago/imago.toml` (user XDG config)
/// 4. `./imago.toml` (local directory)
/// 5. `IMAGO_*` environment variables
pub fn load_config() -> Result<ImagoConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ImagoConfig::default()))
        .merge(Toml::file("/etc/imago/imago.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("imago/imago.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("imago.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<ImagoConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ImagoConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<ImagoConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ImagoConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `IMAGO_AUTH_ACK_KEY` must map to
/// `auth.ack_key`, not `auth.ack.key`.
fn env_provider() -> Env {
    Env::prefixed("IMAGO_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: IMAGO_QUEUE_AUTH_TOKEN -> "queue_auth_token"
        let key_str = key.as_str();
        let mapped = ["server", "relay", "auth", "queue"]
            .iter()
            .find_map(|section| {
                key_str
                    .strip_prefix(&format!("{section}_"))
                    .map(|rest| format!("{section}.{rest}"))
            })
            .unwrap_or_else(|| key_str.to_string());
        mapped.into()
    })
}
