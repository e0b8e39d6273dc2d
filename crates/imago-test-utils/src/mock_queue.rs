// SPDX-FileCopyrightText: 2026 Imago Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock queue adapter for deterministic testing.
//!
//! `MockQueue` implements `QueueAdapter` with captured work items for
//! assertion in tests and injectable enqueue failures.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use imago_core::{ImagoError, QueueAdapter, WorkItem};

/// A mock work queue for testing.
///
/// Items passed to `enqueue()` are captured and retrievable via
/// `items()`. Call `fail_next()` or `fail_all()` to make enqueue return
/// an error instead.
pub struct MockQueue {
    items: Arc<Mutex<Vec<WorkItem>>>,
    fail_next: Arc<Mutex<bool>>,
    fail_all: Arc<Mutex<bool>>,
}

impl MockQueue {
    /// Create a new mock queue that accepts every enqueue.
    pub fn new() -> Self {
        Self {
            items: Arc::new(Mutex::new(Vec::new())),
            fail_next: Arc::new(Mutex::new(false)),
            fail_all: Arc::new(Mutex::new(false)),
        }
    }

    /// Get all work items that were enqueued.
    pub async fn items(&self) -> Vec<WorkItem> {
        self.items.lock().await.clone()
    }

    /// Get the count of enqueued work items.
    pub async fn count(&self) -> usize {
        self.items.lock().await.len()
    }

    /// Clear all captured work items.
    pub async fn clear(&self) {
        self.items.lock().await.clear();
    }

    /// Make the next enqueue fail with a queue error.
    pub async fn fail_next(&self) {
        *self.fail_next.lock().await = true;
    }

    /// Make every subsequent enqueue fail with a queue error.
    pub async fn fail_all(&self) {
        *self.fail_all.lock().await = true;
    }
}

impl Default for MockQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl QueueAdapter for MockQueue {
    async fn enqueue(&self, item: WorkItem) -> Result<(), ImagoError> {
        let mut fail_next = self.fail_next.lock().await;
        if *fail_next || *self.fail_all.lock().await {
            *fail_next = false;
            return Err(ImagoError::Queue {
                message: "mock queue enqueue failure".to_string(),
                source: None,
            });
        }
        drop(fail_next);

        self.items.lock().await.push(item);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use imago_core::{ConnectionTag, ImageId};

    use super::*;

    fn item() -> WorkItem {
        WorkItem {
            connection_tag: ConnectionTag::mint(),
            image_id: ImageId::mint(),
            positive_prompt: "a fox".into(),
            negative_prompt: "watermark".into(),
        }
    }

    #[tokio::test]
    async fn enqueue_captures_items_in_order() {
        let queue = MockQueue::new();
        let first = item();
        let second = item();

        queue.enqueue(first.clone()).await.unwrap();
        queue.enqueue(second.clone()).await.unwrap();

        let items = queue.items().await;
        assert_eq!(items, vec![first, second]);
    }

    #[tokio::test]
    async fn fail_next_fails_once() {
        let queue = MockQueue::new();
        queue.fail_next().await;

        assert!(queue.enqueue(item()).await.is_err());
        assert!(queue.enqueue(item()).await.is_ok());
        assert_eq!(queue.count().await, 1);
    }

    #[tokio::test]
    async fn fail_all_fails_every_enqueue() {
        let queue = MockQueue::new();
        queue.fail_all().await;

        assert!(queue.enqueue(item()).await.is_err());
        assert!(queue.enqueue(item()).await.is_err());
        assert_eq!(queue.count().await, 0);
    }

    #[tokio::test]
    async fn clear_empties_captured_items() {
        let queue = MockQueue::new();
        queue.enqueue(item()).await.unwrap();
        queue.clear().await;
        assert_eq!(queue.count().await, 0);
    }
}
