// SPDX-FileCopyrightText: 2026 Imago Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Completion router: authenticates a worker callback and delivers the
//! result to the originating connection.

use std::sync::Arc;

use imago_core::CompletionCallback;

use crate::error::RelayError;
use crate::protocol;
use crate::registry::ConnectionRegistry;

/// Routes authenticated completion callbacks back to live connections.
pub struct CompletionRouter {
    registry: Arc<ConnectionRegistry>,
    ack_key: String,
}

impl CompletionRouter {
    pub fn new(registry: Arc<ConnectionRegistry>, ack_key: String) -> Self {
        Self { registry, ack_key }
    }

    /// Authenticates, resolves, and delivers a completion callback.
    ///
    /// Steps in order: secret check, registry lookup, channel push.
    /// Authentication happens before the lookup so an attacker probing
    /// with a bad key learns nothing about which tags are live. The
    /// secret comparison is constant-time over the key bytes.
    ///
    /// Delivery is synchronous from the router's point of view: the push
    /// does not wait for the client to acknowledge receipt, and the
    /// router performs no retry of its own.
    pub async fn route(&self, callback: CompletionCallback) -> Result<(), RelayError> {
        if ring::constant_time::verify_slices_are_equal(
            callback.key.as_bytes(),
            self.ack_key.as_bytes(),
        )
        .is_err()
        {
            tracing::warn!(tag = %callback.connection_tag, "callback rejected: incorrect key");
            return Err(RelayError::Unauthorized);
        }

        let sender = self
            .registry
            .lookup(&callback.connection_tag)
            .ok_or_else(|| RelayError::ConnectionNotFound {
                tag: callback.connection_tag.clone(),
            })?;

        let frame = protocol::image_ready(
            &callback.image_id,
            &callback.positive_prompt,
            &callback.negative_prompt,
        );

        sender
            .send(frame)
            .await
            .map_err(|_| RelayError::DeliveryFailed {
                tag: callback.connection_tag.clone(),
            })?;

        tracing::debug!(
            tag = %callback.connection_tag,
            image_id = %callback.image_id,
            "completion delivered"
        );
        Ok(())
    }
}
