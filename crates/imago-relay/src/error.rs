// SPDX-FileCopyrightText: 2026 Imago Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Relay-level error taxonomy.
//!
//! These variants are part of the protocol: each maps to an exact
//! client-visible message, so the wire strings live here in one place
//! rather than scattered across handlers.

use imago_core::{ConnectionTag, ImagoError};
use thiserror::Error;

/// Failures a relay operation can report.
///
/// Validation and authorization failures are always handled locally and
/// converted to a direct response to the caller; none of them terminate
/// a connection or the relay.
#[derive(Debug, Error)]
pub enum RelayError {
    /// Payload is not parseable as JSON at all.
    #[error("payload is not parseable as json")]
    MalformedPayload,

    /// Payload parses but fields are missing, wrong-shaped, or out of bounds.
    #[error("payload violates the request schema")]
    SchemaViolation,

    /// Callback secret does not match the configured key.
    #[error("callback key does not match the configured secret")]
    Unauthorized,

    /// The claimed tag has no live connection (closed, never existed, or wrong).
    #[error("no live connection for tag {tag}")]
    ConnectionNotFound { tag: ConnectionTag },

    /// The queue transport rejected the enqueue. The relay performs no retry.
    #[error("failed to enqueue work item")]
    DispatchFailed {
        #[source]
        source: ImagoError,
    },

    /// The connection's channel closed before the message could be pushed.
    #[error("failed to deliver message to connection {tag}")]
    DeliveryFailed { tag: ConnectionTag },
}

impl RelayError {
    /// The exact client-visible message for this failure.
    ///
    /// The first four strings are wire contract and must not change.
    pub fn client_message(&self) -> &'static str {
        match self {
            RelayError::MalformedPayload => "Request contained malformed json",
            RelayError::SchemaViolation => "Invalid request",
            RelayError::Unauthorized => "Incorrect key",
            RelayError::ConnectionNotFound { .. } => "Websocket does not exist",
            RelayError::DispatchFailed { .. } | RelayError::DeliveryFailed { .. } => {
                "Internal Server Error"
            }
        }
    }
}
