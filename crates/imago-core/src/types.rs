// SPDX-FileCopyrightText: 2026 Imago Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wire-level data types shared across the Imago workspace.
//!
//! Field names serialize in camelCase because they are part of the wire
//! contract with clients and workers and must match it byte-for-byte.

use serde::{Deserialize, Serialize};

/// Opaque routing key assigned to a connection at accept time.
///
/// Unique for the connection's lifetime and never reused; the sole key
/// used to route an asynchronous completion back to its connection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConnectionTag(pub String);

impl ConnectionTag {
    /// Mints a fresh collision-resistant tag (UUID v4).
    ///
    /// Random rather than sequential: tags must stay unique even across
    /// peer relay instances that never coordinate.
    pub fn mint() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ConnectionTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Server-minted correlation identifier linking a dispatched work item
/// to its eventual completion callback.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageId(pub String);

impl ImageId {
    /// Mints a fresh correlation identifier (UUID v4).
    pub fn mint() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ImageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A validated client generation request.
///
/// Ephemeral: exists only between message receipt and enqueue. The
/// `request_id` is the client's own correlation token, echoed back
/// verbatim; it is distinct from the server-minted [`ImageId`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptRequest {
    pub request_id: String,
    pub positive_prompt: String,
    pub negative_prompt: String,
}

/// The unit placed on the external work queue.
///
/// Carries enough context (tag + correlation id + prompt data) for the
/// worker's eventual callback to be routed without any relay-side state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkItem {
    pub connection_tag: ConnectionTag,
    pub image_id: ImageId,
    pub positive_prompt: String,
    pub negative_prompt: String,
}

/// An inbound, authenticated report that a [`WorkItem`] finished.
///
/// Transient: validated, authenticated, and consumed in one request.
/// The relay trusts the callback's `(connectionTag, imageId)` claim; it
/// does not track which image ids are outstanding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionCallback {
    pub key: String,
    pub connection_tag: ConnectionTag,
    pub image_id: ImageId,
    pub positive_prompt: String,
    pub negative_prompt: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minted_tags_are_valid_uuids() {
        let tag = ConnectionTag::mint();
        assert!(uuid::Uuid::parse_str(tag.as_str()).is_ok());
        let id = ImageId::mint();
        assert!(uuid::Uuid::parse_str(id.as_str()).is_ok());
    }

    #[test]
    fn work_item_serializes_camel_case() {
        let item = WorkItem {
            connection_tag: ConnectionTag("tag-1".into()),
            image_id: ImageId("img-1".into()),
            positive_prompt: "a fox".into(),
            negative_prompt: "watermark".into(),
        };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["connectionTag"], "tag-1");
        assert_eq!(json["imageId"], "img-1");
        assert_eq!(json["positivePrompt"], "a fox");
        assert_eq!(json["negativePrompt"], "watermark");
    }

    #[test]
    fn completion_callback_deserializes_camel_case() {
        let json = r#"{
            "key": "secret",
            "connectionTag": "tag-1",
            "imageId": "img-1",
            "positivePrompt": "a fox",
            "negativePrompt": "watermark"
        }"#;
        let cb: CompletionCallback = serde_json::from_str(json).unwrap();
        assert_eq!(cb.key, "secret");
        assert_eq!(cb.connection_tag.as_str(), "tag-1");
        assert_eq!(cb.image_id.as_str(), "img-1");
    }
}
