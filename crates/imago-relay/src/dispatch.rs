// SPDX-FileCopyrightText: 2026 Imago Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Work dispatcher: mints a correlation id and enqueues a work item.

use std::sync::Arc;

use imago_core::{ConnectionTag, ImageId, PromptRequest, QueueAdapter, WorkItem};

use crate::error::RelayError;

/// Hands validated requests to the external work queue.
///
/// Each dispatch is independent: no ordering guarantee is made between
/// dispatches from the same or different connections, and once an item
/// is enqueued the relay has no handle to cancel or time it out.
pub struct WorkDispatcher {
    queue: Arc<dyn QueueAdapter>,
}

impl WorkDispatcher {
    pub fn new(queue: Arc<dyn QueueAdapter>) -> Self {
        Self { queue }
    }

    /// Mints a fresh image id, enqueues the work item, and returns the
    /// id for immediate echo to the client.
    ///
    /// A transport failure surfaces as [`RelayError::DispatchFailed`];
    /// retry and backoff belong to the queue service.
    pub async fn dispatch(
        &self,
        tag: &ConnectionTag,
        request: &PromptRequest,
    ) -> Result<ImageId, RelayError> {
        let image_id = ImageId::mint();

        let item = WorkItem {
            connection_tag: tag.clone(),
            image_id: image_id.clone(),
            positive_prompt: request.positive_prompt.clone(),
            negative_prompt: request.negative_prompt.clone(),
        };

        self.queue
            .enqueue(item)
            .await
            .map_err(|e| RelayError::DispatchFailed { source: e })?;

        tracing::debug!(tag = %tag, image_id = %image_id, "work item enqueued");
        Ok(image_id)
    }
}

#[cfg(test)]
mod tests {
    use imago_test_utils::MockQueue;

    use super::*;

    fn request() -> PromptRequest {
        PromptRequest {
            request_id: uuid::Uuid::new_v4().to_string(),
            positive_prompt: "a fox".into(),
            negative_prompt: "watermark".into(),
        }
    }

    #[tokio::test]
    async fn dispatch_enqueues_work_item_verbatim() {
        let queue = Arc::new(MockQueue::new());
        let dispatcher = WorkDispatcher::new(queue.clone());
        let tag = ConnectionTag::mint();

        let image_id = dispatcher.dispatch(&tag, &request()).await.unwrap();

        let items = queue.items().await;
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].connection_tag, tag);
        assert_eq!(items[0].image_id, image_id);
        assert_eq!(items[0].positive_prompt, "a fox");
        assert_eq!(items[0].negative_prompt, "watermark");
    }

    #[tokio::test]
    async fn repeated_dispatches_mint_distinct_image_ids() {
        let queue = Arc::new(MockQueue::new());
        let dispatcher = WorkDispatcher::new(queue.clone());
        let tag = ConnectionTag::mint();

        let first = dispatcher.dispatch(&tag, &request()).await.unwrap();
        let second = dispatcher.dispatch(&tag, &request()).await.unwrap();

        assert_ne!(first, second);
        assert_eq!(queue.count().await, 2);
    }

    #[tokio::test]
    async fn queue_failure_surfaces_as_dispatch_failed() {
        let queue = Arc::new(MockQueue::new());
        queue.fail_next().await;
        let dispatcher = WorkDispatcher::new(queue.clone());

        let result = dispatcher.dispatch(&ConnectionTag::mint(), &request()).await;
        assert!(matches!(result, Err(RelayError::DispatchFailed { .. })));
        assert_eq!(queue.count().await, 0);
    }
}
