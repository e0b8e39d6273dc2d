// SPDX-FileCopyrightText: 2026 Imago Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Queue adapter trait for the external work queue transport.

use async_trait::async_trait;

use crate::error::ImagoError;
use crate::types::WorkItem;

/// Adapter for the durable queue that hands work items to the worker
/// fleet.
///
/// The relay treats enqueue as fire-and-forget: a transport failure is
/// surfaced to the caller, but retry and backoff belong to the queue
/// service, never to the relay. At-least-once delivery to a worker is
/// assumed.
#[async_trait]
pub trait QueueAdapter: Send + Sync {
    /// Places a work item on the queue.
    async fn enqueue(&self, item: WorkItem) -> Result<(), ImagoError>;
}
