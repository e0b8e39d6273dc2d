// SPDX-FileCopyrightText: 2026 Imago Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the relay's REST surface.
//!
//! Handles POST /ack and GET /health.

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use imago_relay::RelayError;

use crate::server::RelayState;

/// Response body for GET /health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Health status string.
    pub status: String,
    /// Binary version.
    pub version: String,
    /// Uptime in seconds.
    pub uptime_secs: u64,
}

/// POST /ack
///
/// Worker completion callback. The body is taken raw so the relay owns
/// JSON parse failures and answers them with its own wire messages; the
/// content type must be exactly `application/json`.
pub async fn post_ack(
    State(state): State<RelayState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let content_type = headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    if content_type != "application/json" {
        return (
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            "Unsupported Media Type",
        )
            .into_response();
    }

    match state.relay.on_callback(&body).await {
        Ok(()) => StatusCode::OK.into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "rejecting completion callback");
            (ack_status(&e), e.client_message()).into_response()
        }
    }
}

/// Map a relay error to the /ack response status.
fn ack_status(error: &RelayError) -> StatusCode {
    match error {
        RelayError::MalformedPayload | RelayError::SchemaViolation => StatusCode::BAD_REQUEST,
        RelayError::Unauthorized => StatusCode::UNAUTHORIZED,
        RelayError::ConnectionNotFound { .. } => StatusCode::BAD_REQUEST,
        RelayError::DispatchFailed { .. } | RelayError::DeliveryFailed { .. } => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// GET /health
///
/// Returns health status of the relay.
pub async fn get_health(State(state): State<RelayState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use imago_core::ConnectionTag;

    #[test]
    fn health_response_serializes() {
        let resp = HealthResponse {
            status: "ok".to_string(),
            version: "0.1.0".to_string(),
            uptime_secs: 42,
        };
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("\"status\":\"ok\""));
        assert!(json.contains("\"version\":\"0.1.0\""));
        assert!(json.contains("\"uptime_secs\":42"));
    }

    #[test]
    fn ack_status_maps_relay_errors() {
        assert_eq!(
            ack_status(&RelayError::MalformedPayload),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ack_status(&RelayError::SchemaViolation),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ack_status(&RelayError::Unauthorized),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ack_status(&RelayError::ConnectionNotFound {
                tag: ConnectionTag("t".into())
            }),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ack_status(&RelayError::DeliveryFailed {
                tag: ConnectionTag("t".into())
            }),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
