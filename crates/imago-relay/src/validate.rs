// SPDX-FileCopyrightText: 2026 Imago Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Two-tier request validation.
//!
//! The wire contract distinguishes two failure classes and answers each
//! with a different message, so parsing happens in two steps: first the
//! payload must be JSON at all ([`RelayError::MalformedPayload`]), then
//! it must match the fixed schema ([`RelayError::SchemaViolation`]).
//! Unknown fields are ignored. No side effects.

use imago_core::{CompletionCallback, PromptRequest};
use serde::Deserialize;

use crate::error::RelayError;

/// Maximum length of the client message `type` field.
pub const MAX_TYPE_LEN: usize = 50;

/// Maximum length of either prompt in a client request.
pub const MAX_PROMPT_LEN: usize = 1000;

/// Accepts only the canonical hyphenated UUID form. `Uuid::parse_str`
/// alone also admits the 32-hex and `urn:uuid:` forms, which the wire
/// contract rejects.
fn is_canonical_uuid(s: &str) -> bool {
    s.len() == 36 && uuid::Uuid::parse_str(s).is_ok()
}

/// Raw shape of a client prompt request before bounds checks.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPromptRequest {
    #[serde(rename = "type")]
    kind: String,
    request_id: String,
    positive_prompt: String,
    negative_prompt: String,
}

/// Parses and validates a client prompt request message.
pub fn parse_prompt_request(text: &str) -> Result<PromptRequest, RelayError> {
    let value: serde_json::Value =
        serde_json::from_str(text).map_err(|_| RelayError::MalformedPayload)?;

    let raw: RawPromptRequest =
        serde_json::from_value(value).map_err(|_| RelayError::SchemaViolation)?;

    if raw.kind.chars().count() > MAX_TYPE_LEN
        || raw.positive_prompt.chars().count() > MAX_PROMPT_LEN
        || raw.negative_prompt.chars().count() > MAX_PROMPT_LEN
    {
        return Err(RelayError::SchemaViolation);
    }

    if !is_canonical_uuid(&raw.request_id) {
        return Err(RelayError::SchemaViolation);
    }

    Ok(PromptRequest {
        request_id: raw.request_id,
        positive_prompt: raw.positive_prompt,
        negative_prompt: raw.negative_prompt,
    })
}

/// Parses and validates a worker completion callback body.
///
/// Authentication of the `key` field happens later in the completion
/// router; this only checks shape.
pub fn parse_completion_callback(body: &[u8]) -> Result<CompletionCallback, RelayError> {
    let value: serde_json::Value =
        serde_json::from_slice(body).map_err(|_| RelayError::MalformedPayload)?;

    let callback: CompletionCallback =
        serde_json::from_value(value).map_err(|_| RelayError::SchemaViolation)?;

    if !is_canonical_uuid(callback.connection_tag.as_str())
        || !is_canonical_uuid(callback.image_id.as_str())
    {
        return Err(RelayError::SchemaViolation);
    }

    Ok(callback)
}
