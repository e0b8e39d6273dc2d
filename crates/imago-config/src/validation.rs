// SPDX-FileCopyrightText: 2026 Imago Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as valid bind addresses and well-formed endpoint URLs.

use crate::diagnostic::ConfigError;
use crate::model::ImagoConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &ImagoConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    // Validate host is not empty
    if config.server.host.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "server.host must not be empty".to_string(),
        });
    }

    // Validate host looks like a valid IP or hostname
    if !config.server.host.trim().is_empty() {
        let addr = config.server.host.trim();
        let is_valid_ip = addr.parse::<std::net::IpAddr>().is_ok();
        let is_valid_hostname = addr
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == ':');
        if !is_valid_ip && !is_valid_hostname {
            errors.push(ConfigError::Validation {
                message: format!("server.host `{addr}` is not a valid IP address or hostname"),
            });
        }
    }

    // Validate log level is a recognized tracing level
    let level = config.relay.log_level.to_lowercase();
    if !matches!(level.as_str(), "trace" | "debug" | "info" | "warn" | "error") {
        errors.push(ConfigError::Validation {
            message: format!(
                "relay.log_level `{}` is not one of trace, debug, info, warn, error",
                config.relay.log_level
            ),
        });
    }

    // Validate ack_key is non-empty when set
    if let Some(key) = &config.auth.ack_key
        && key.trim().is_empty()
    {
        errors.push(ConfigError::Validation {
            message: "auth.ack_key must not be empty when set".to_string(),
        });
    }

    // Validate queue endpoint is an http(s) URL when set
    if let Some(endpoint) = &config.queue.endpoint
        && !endpoint.starts_with("http://")
        && !endpoint.starts_with("https://")
    {
        errors.push(ConfigError::Validation {
            message: format!("queue.endpoint `{endpoint}` must start with http:// or https://"),
        });
    }

    // Validate timeout is at least 1 second
    if config.queue.timeout_secs < 1 {
        errors.push(ConfigError::Validation {
            message: format!(
                "queue.timeout_secs must be at least 1, got {}",
                config.queue.timeout_secs
            ),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
