// SPDX-FileCopyrightText: 2026 Imago Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Session relay core.
//!
//! Registers live connections under unique tags, validates and forwards
//! inbound generation requests to the work queue, and routes out-of-band
//! completion callbacks back to the originating connection.
//!
//! The relay is transport-agnostic: a connection is represented by the
//! `mpsc::Sender<String>` half of the transport's outbound channel. The
//! gateway crate owns the actual WebSocket I/O.
//!
//! Per-connection lifecycle: `Connecting -> Open -> Closed` (terminal).
//! [`SessionRelay::accept`] transitions a connection to Open;
//! [`SessionRelay::close`] retires its tag. A bad inbound message never
//! closes a connection; only a transport-level close does.

pub mod dispatch;
pub mod error;
pub mod protocol;
pub mod registry;
pub mod route;
pub mod validate;

use std::sync::Arc;

use imago_core::{ConnectionTag, QueueAdapter};
use tokio::sync::mpsc;

pub use error::RelayError;
pub use registry::ConnectionRegistry;

use dispatch::WorkDispatcher;
use route::CompletionRouter;

/// Composition root owning the connection registry, the work
/// dispatcher, and the completion router.
///
/// One instance serves an unbounded number of concurrently open
/// connections; all methods take `&self` and are safe to call from
/// independent connection tasks.
pub struct SessionRelay {
    registry: Arc<ConnectionRegistry>,
    dispatcher: WorkDispatcher,
    router: CompletionRouter,
}

impl SessionRelay {
    pub fn new(queue: Arc<dyn QueueAdapter>, ack_key: String) -> Self {
        let registry = Arc::new(ConnectionRegistry::new());
        Self {
            dispatcher: WorkDispatcher::new(queue),
            router: CompletionRouter::new(registry.clone(), ack_key),
            registry,
        }
    }

    /// Accepts a newly upgraded connection: registers its outbound
    /// channel and returns the tag that routes to it.
    pub fn accept(&self, sender: mpsc::Sender<String>) -> ConnectionTag {
        self.registry.register(sender)
    }

    /// Retires a connection's tag on disconnect. Any callback arriving
    /// after this point for the tag yields `ConnectionNotFound`.
    pub fn close(&self, tag: &ConnectionTag) {
        self.registry.unregister(tag);
    }

    /// Handles one inbound message from an open connection.
    ///
    /// Validation failures are answered over the same connection with
    /// the matching wire error string and leave the connection open; a
    /// dispatch failure is surfaced to the caller with no echo sent.
    pub async fn on_message(&self, tag: &ConnectionTag, text: &str) -> Result<(), RelayError> {
        let request = match validate::parse_prompt_request(text) {
            Ok(request) => request,
            Err(e) => {
                tracing::warn!(tag = %tag, error = %e, "rejecting client message");
                return self.send_to(tag, protocol::prompt_error(e.client_message())).await;
            }
        };

        let image_id = self.dispatcher.dispatch(tag, &request).await?;
        self.send_to(tag, protocol::prompt_echo(&image_id, &request))
            .await
    }

    /// The single global entry point for worker completion callbacks,
    /// independent of any connection's state machine.
    pub async fn on_callback(&self, body: &[u8]) -> Result<(), RelayError> {
        let callback = validate::parse_completion_callback(body)?;
        self.router.route(callback).await
    }

    /// Number of currently open connections.
    pub fn connection_count(&self) -> usize {
        self.registry.len()
    }

    async fn send_to(&self, tag: &ConnectionTag, frame: String) -> Result<(), RelayError> {
        let sender = self
            .registry
            .lookup(tag)
            .ok_or_else(|| RelayError::ConnectionNotFound { tag: tag.clone() })?;

        sender
            .send(frame)
            .await
            .map_err(|_| RelayError::DeliveryFailed { tag: tag.clone() })
    }
}
