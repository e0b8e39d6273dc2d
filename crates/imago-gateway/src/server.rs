// SPDX-FileCopyrightText: 2026 Imago Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Relay HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state for the gateway.

use std::sync::Arc;

use axum::{
    http::StatusCode,
    routing::{get, post},
    Router,
};
use tokio_util::sync::CancellationToken;
use tower_http::cors::CorsLayer;

use imago_core::ImagoError;
use imago_relay::SessionRelay;

use crate::handlers;
use crate::ws;

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct RelayState {
    /// The session relay owning connection routing.
    pub relay: Arc<SessionRelay>,
    /// Process start time for uptime calculation.
    pub start_time: std::time::Instant,
}

/// Gateway server configuration (mirrors ServerConfig from imago-config).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host address to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
}

/// Build the full gateway router.
///
/// Routes:
/// - GET /websocket (upgrade required)
/// - POST /ack (worker completion callbacks)
/// - GET /health
/// - anything else -> 404 "Not Found"
pub fn build_router(state: RelayState) -> Router {
    Router::new()
        .route("/websocket", get(ws::ws_handler))
        .route("/ack", post(handlers::post_ack))
        .route("/health", get(handlers::get_health))
        .fallback(|| async { (StatusCode::NOT_FOUND, "Not Found") })
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Start the gateway HTTP/WebSocket server.
///
/// Binds to the configured host:port and serves until the shutdown
/// token is cancelled, then drains in-flight requests.
pub async fn start_server(
    config: &ServerConfig,
    state: RelayState,
    shutdown: CancellationToken,
) -> Result<(), ImagoError> {
    let app = build_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| ImagoError::Channel {
            message: format!("failed to bind relay to {addr}: {e}"),
            source: Some(Box::new(e)),
        })?;

    tracing::info!("Relay server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
        .map_err(|e| ImagoError::Channel {
            message: format!("relay server error: {e}"),
            source: Some(Box::new(e)),
        })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relay_state_is_clone() {
        let queue = Arc::new(imago_test_utils::MockQueue::new());
        let state = RelayState {
            relay: Arc::new(SessionRelay::new(queue, "key".into())),
            start_time: std::time::Instant::now(),
        };
        let _cloned = state.clone();
    }

    #[test]
    fn server_config_debug() {
        let config = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8787,
        };
        let debug = format!("{config:?}");
        assert!(debug.contains("127.0.0.1"));
    }
}
