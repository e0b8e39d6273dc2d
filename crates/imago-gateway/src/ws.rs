// SPDX-FileCopyrightText: 2026 Imago Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! WebSocket handler for client sessions.
//!
//! Client -> Server (JSON):
//! ```json
//! {"type": "txt2img_prompt", "requestId": "...", "positivePrompt": "...", "negativePrompt": "..."}
//! ```
//!
//! Server -> Client (JSON):
//! ```json
//! {"type": "txt2img_prompt", "success": true, "imageId": "...", ...}
//! {"type": "txt2img_prompt", "success": false, "error": "..."}
//! {"type": "txt2img_image", "success": true, "imageId": "...", ...}
//! ```

use axum::{
    extract::{
        ws::{rejection::WebSocketUpgradeRejection, Message, WebSocket, WebSocketUpgrade},
        State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;

use crate::server::RelayState;

/// WebSocket upgrade handler.
///
/// A plain GET without the upgrade handshake is answered with
/// 426 Upgrade Required rather than a generic extractor rejection.
pub async fn ws_handler(
    ws: Result<WebSocketUpgrade, WebSocketUpgradeRejection>,
    State(state): State<RelayState>,
) -> Response {
    match ws {
        Ok(upgrade) => upgrade.on_upgrade(|socket| handle_socket(socket, state)),
        Err(_) => (StatusCode::UPGRADE_REQUIRED, "Upgrade Required").into_response(),
    }
}

/// Handle an individual WebSocket connection.
///
/// Spawns a sender task that drains the relay's outbound channel into
/// the socket, then loops reading client messages into the relay. The
/// connection's tag is registered on entry and retired on any exit path.
async fn handle_socket(socket: WebSocket, state: RelayState) {
    let (mut ws_sender, mut ws_receiver) = socket.split();

    // Create mpsc channel for frames routed back to this connection.
    let (tx, mut rx) = mpsc::channel::<String>(64);
    let tag = state.relay.accept(tx);

    tracing::debug!(tag = %tag, "websocket session opened");

    // Spawn task to forward relay frames to the WebSocket.
    let sender_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if ws_sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    });

    // Read messages from the WebSocket client.
    while let Some(Ok(msg)) = ws_receiver.next().await {
        match msg {
            Message::Text(text) => {
                if let Err(e) = state.relay.on_message(&tag, &text).await {
                    // Validation failures were already answered in-band;
                    // reaching here means dispatch or delivery failed.
                    // The connection stays open.
                    tracing::error!(tag = %tag, error = %e, "failed to process client message");
                }
            }
            Message::Close(_) => break,
            _ => {} // Ignore binary, ping (handled by tungstenite layer)
        }
    }

    // Cleanup.
    state.relay.close(&tag);
    sender_task.abort();
    tracing::debug!(tag = %tag, "websocket session closed");
}
