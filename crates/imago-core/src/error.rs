// SPDX-FileCopyrightText: 2026 Imago Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Imago relay.

use thiserror::Error;

/// The primary error type used across the Imago workspace for
/// infrastructure failures (configuration, queue transport, channels).
///
/// Relay-level protocol failures (malformed payloads, bad secrets,
/// missing connections) live in `imago-relay` and carry their own wire
/// contract; this type covers everything beneath them.
#[derive(Debug, Error)]
pub enum ImagoError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// Queue transport errors (connection failure, rejected enqueue, bad endpoint).
    #[error("queue error: {message}")]
    Queue {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Connection channel errors (bind failure, server error, closed channel).
    #[error("channel error: {message}")]
    Channel {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
