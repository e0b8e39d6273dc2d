// SPDX-FileCopyrightText: 2026 Imago Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP work queue transport.
//!
//! Provides [`HttpQueue`], which pushes work items to a hosted queue
//! service over a single JSON POST. The relay treats enqueue as
//! fire-and-forget, so this client carries no retry logic: a transport
//! failure or non-2xx response surfaces as a queue error and retry
//! policy stays with the queue service.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};

use imago_core::{ImagoError, QueueAdapter, WorkItem};

/// HTTP client for the external work queue's push endpoint.
#[derive(Debug, Clone)]
pub struct HttpQueue {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpQueue {
    /// Creates a new queue client.
    ///
    /// # Arguments
    /// * `endpoint` - Push URL of the queue service
    /// * `auth_token` - Optional bearer token for the queue API
    /// * `timeout` - Per-request timeout
    pub fn new(
        endpoint: String,
        auth_token: Option<&str>,
        timeout: Duration,
    ) -> Result<Self, ImagoError> {
        let mut headers = HeaderMap::new();
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        if let Some(token) = auth_token {
            headers.insert(
                "authorization",
                HeaderValue::from_str(&format!("Bearer {token}")).map_err(|e| {
                    ImagoError::Config(format!("invalid queue auth token header value: {e}"))
                })?,
            );
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| ImagoError::Queue {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self { client, endpoint })
    }
}

#[async_trait]
impl QueueAdapter for HttpQueue {
    async fn enqueue(&self, item: WorkItem) -> Result<(), ImagoError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&item)
            .send()
            .await
            .map_err(|e| ImagoError::Queue {
                message: format!("queue request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ImagoError::Queue {
                message: format!("queue returned {status}: {body}"),
                source: None,
            });
        }

        tracing::debug!(image_id = %item.image_id, status = %status, "work item pushed to queue");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use imago_core::{ConnectionTag, ImageId};
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn item() -> WorkItem {
        WorkItem {
            connection_tag: ConnectionTag("11111111-1111-4111-8111-111111111111".into()),
            image_id: ImageId("22222222-2222-4222-8222-222222222222".into()),
            positive_prompt: "a fox".into(),
            negative_prompt: "watermark".into(),
        }
    }

    #[tokio::test]
    async fn enqueue_posts_work_item_json() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/messages"))
            .and(body_json(serde_json::json!({
                "connectionTag": "11111111-1111-4111-8111-111111111111",
                "imageId": "22222222-2222-4222-8222-222222222222",
                "positivePrompt": "a fox",
                "negativePrompt": "watermark",
            })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let queue = HttpQueue::new(
            format!("{}/messages", server.uri()),
            None,
            Duration::from_secs(5),
        )
        .unwrap();

        queue.enqueue(item()).await.unwrap();
    }

    #[tokio::test]
    async fn enqueue_sends_bearer_token_when_configured() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/messages"))
            .and(header("authorization", "Bearer queue-token"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let queue = HttpQueue::new(
            format!("{}/messages", server.uri()),
            Some("queue-token"),
            Duration::from_secs(5),
        )
        .unwrap();

        queue.enqueue(item()).await.unwrap();
    }

    #[tokio::test]
    async fn non_success_status_is_queue_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
            .mount(&server)
            .await;

        let queue = HttpQueue::new(server.uri(), None, Duration::from_secs(5)).unwrap();

        let err = queue.enqueue(item()).await.unwrap_err();
        match err {
            ImagoError::Queue { message, .. } => {
                assert!(message.contains("503"));
                assert!(message.contains("unavailable"));
            }
            other => panic!("expected queue error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_queue_error() {
        // Port 1 is essentially guaranteed closed.
        let queue = HttpQueue::new(
            "http://127.0.0.1:1/messages".into(),
            None,
            Duration::from_secs(1),
        )
        .unwrap();

        assert!(matches!(
            queue.enqueue(item()).await,
            Err(ImagoError::Queue { .. })
        ));
    }
}
