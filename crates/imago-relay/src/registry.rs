// SPDX-FileCopyrightText: 2026 Imago Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Connection registry: the tag -> connection map.
//!
//! The only shared mutable state in the relay. A connection is an
//! `mpsc::Sender<String>` owned by the transport's per-socket sender
//! task; the registry holds a clone purely for routing. All operations
//! are linearizable via the dashmap shard locks, and `lookup` clones the
//! sender out so no map guard is ever held across an `.await`.

use dashmap::DashMap;
use imago_core::ConnectionTag;
use tokio::sync::mpsc;

/// Maps live connection tags to their outbound message channels.
#[derive(Debug, Default)]
pub struct ConnectionRegistry {
    senders: DashMap<ConnectionTag, mpsc::Sender<String>>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self {
            senders: DashMap::new(),
        }
    }

    /// Allocates a fresh globally-unique tag for a newly accepted
    /// connection and records the mapping.
    pub fn register(&self, sender: mpsc::Sender<String>) -> ConnectionTag {
        let tag = ConnectionTag::mint();
        self.senders.insert(tag.clone(), sender);
        tracing::debug!(tag = %tag, "connection registered");
        tag
    }

    /// Returns the live connection for a tag, or `None` if the tag was
    /// never registered or has been retired.
    pub fn lookup(&self, tag: &ConnectionTag) -> Option<mpsc::Sender<String>> {
        self.senders.get(tag).map(|entry| entry.value().clone())
    }

    /// Removes the mapping for a tag. Invoked on disconnect; the tag is
    /// retired and any subsequent lookup misses.
    pub fn unregister(&self, tag: &ConnectionTag) {
        if self.senders.remove(tag).is_some() {
            tracing::debug!(tag = %tag, "connection unregistered");
        }
    }

    /// Number of currently registered connections.
    pub fn len(&self) -> usize {
        self.senders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.senders.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Arc;

    use super::*;

    fn sender() -> mpsc::Sender<String> {
        mpsc::channel(1).0
    }

    #[test]
    fn register_lookup_unregister() {
        let registry = ConnectionRegistry::new();
        let tag = registry.register(sender());

        assert!(registry.lookup(&tag).is_some());
        registry.unregister(&tag);
        assert!(registry.lookup(&tag).is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn lookup_of_unknown_tag_misses() {
        let registry = ConnectionRegistry::new();
        let tag = ConnectionTag("not-registered".into());
        assert!(registry.lookup(&tag).is_none());
    }

    #[test]
    fn unregister_is_idempotent() {
        let registry = ConnectionRegistry::new();
        let tag = registry.register(sender());
        registry.unregister(&tag);
        registry.unregister(&tag);
        assert!(registry.lookup(&tag).is_none());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn concurrent_registrations_yield_distinct_tags() {
        let registry = Arc::new(ConnectionRegistry::new());
        let mut handles = Vec::new();

        for _ in 0..64 {
            let registry = registry.clone();
            handles.push(tokio::spawn(async move { registry.register(sender()) }));
        }

        let mut tags = HashSet::new();
        for handle in handles {
            tags.insert(handle.await.unwrap());
        }

        assert_eq!(tags.len(), 64);
        assert_eq!(registry.len(), 64);
    }
}
