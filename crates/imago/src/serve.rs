// SPDX-FileCopyrightText: 2026 Imago Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `imago serve` command implementation.
//!
//! Wires the configured queue transport into a session relay, starts the
//! HTTP/WebSocket gateway, and runs until a shutdown signal arrives.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use imago_config::model::ImagoConfig;
use imago_core::ImagoError;
use imago_gateway::{RelayState, ServerConfig};
use imago_queue::HttpQueue;
use imago_relay::SessionRelay;

use crate::shutdown;

/// Runs the `imago serve` command.
///
/// Fails closed: the relay refuses to start without a callback key or a
/// queue endpoint, so an unauthenticated or dead-letter deployment is
/// impossible to misconfigure into existence.
pub async fn run_serve(config: ImagoConfig) -> Result<(), ImagoError> {
    // Initialize tracing subscriber.
    init_tracing(&config.relay.log_level);

    info!("starting imago serve");

    let ack_key = config.auth.ack_key.clone().ok_or_else(|| {
        ImagoError::Config(
            "auth.ack_key is not set. Set it in imago.toml or via IMAGO_AUTH_ACK_KEY."
                .to_string(),
        )
    })?;

    let endpoint = config.queue.endpoint.clone().ok_or_else(|| {
        ImagoError::Config(
            "queue.endpoint is not set. Set it in imago.toml or via IMAGO_QUEUE_ENDPOINT."
                .to_string(),
        )
    })?;

    let queue = HttpQueue::new(
        endpoint.clone(),
        config.queue.auth_token.as_deref(),
        Duration::from_secs(config.queue.timeout_secs),
    )?;
    info!(endpoint = endpoint.as_str(), "work queue transport ready");

    let relay = Arc::new(SessionRelay::new(Arc::new(queue), ack_key));

    let state = RelayState {
        relay,
        start_time: std::time::Instant::now(),
    };

    let server_config = ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
    };

    // Install signal handler.
    let cancel = shutdown::install_signal_handler();

    imago_gateway::start_server(&server_config, state, cancel).await?;

    info!("imago serve shutdown complete");
    Ok(())
}

/// Initializes the tracing subscriber with the given log level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("imago={log_level},warn")));

    // try_init so tests exercising run_serve twice do not panic on the
    // second subscriber installation.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn serve_without_ack_key_fails_closed() {
        let config = ImagoConfig::default();
        let err = run_serve(config).await.unwrap_err();
        match err {
            ImagoError::Config(msg) => assert!(msg.contains("ack_key")),
            other => panic!("expected config error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn serve_without_queue_endpoint_fails_closed() {
        let mut config = ImagoConfig::default();
        config.auth.ack_key = Some("secret".to_string());
        let err = run_serve(config).await.unwrap_err();
        match err {
            ImagoError::Config(msg) => assert!(msg.contains("queue.endpoint")),
            other => panic!("expected config error, got {other:?}"),
        }
    }
}
