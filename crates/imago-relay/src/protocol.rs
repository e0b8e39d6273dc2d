// SPDX-FileCopyrightText: 2026 Imago Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Server -> client message frames.
//!
//! Every frame the relay pushes over a connection is built here so the
//! wire shapes exist in exactly one place.

use imago_core::{ImageId, PromptRequest};

/// Message type constants for server -> client frames.
pub mod message_types {
    /// Response to a prompt submission (echo or validation error).
    pub const PROMPT: &str = "txt2img_prompt";
    /// Asynchronous completion delivery.
    pub const IMAGE_READY: &str = "txt2img_image";
}

/// Builds the validation error frame sent back over the connection.
pub fn prompt_error(message: &str) -> String {
    serde_json::json!({
        "type": message_types::PROMPT,
        "success": false,
        "error": message,
    })
    .to_string()
}

/// Builds the success echo for an accepted prompt request.
pub fn prompt_echo(image_id: &ImageId, request: &PromptRequest) -> String {
    serde_json::json!({
        "type": message_types::PROMPT,
        "success": true,
        "imageId": image_id.as_str(),
        "requestId": request.request_id,
        "positivePrompt": request.positive_prompt,
        "negativePrompt": request.negative_prompt,
    })
    .to_string()
}

/// Builds the completion frame delivered when a work item finishes.
pub fn image_ready(image_id: &ImageId, positive_prompt: &str, negative_prompt: &str) -> String {
    serde_json::json!({
        "type": message_types::IMAGE_READY,
        "success": true,
        "imageId": image_id.as_str(),
        "positivePrompt": positive_prompt,
        "negativePrompt": negative_prompt,
    })
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_error_frame_shape() {
        let frame: serde_json::Value =
            serde_json::from_str(&prompt_error("Invalid request")).unwrap();
        assert_eq!(frame["type"], "txt2img_prompt");
        assert_eq!(frame["success"], false);
        assert_eq!(frame["error"], "Invalid request");
    }

    #[test]
    fn prompt_echo_frame_shape() {
        let request = PromptRequest {
            request_id: "req-1".into(),
            positive_prompt: "a fox".into(),
            negative_prompt: "watermark".into(),
        };
        let frame: serde_json::Value =
            serde_json::from_str(&prompt_echo(&ImageId("img-1".into()), &request)).unwrap();
        assert_eq!(frame["type"], "txt2img_prompt");
        assert_eq!(frame["success"], true);
        assert_eq!(frame["imageId"], "img-1");
        assert_eq!(frame["requestId"], "req-1");
        assert_eq!(frame["positivePrompt"], "a fox");
        assert_eq!(frame["negativePrompt"], "watermark");
    }

    #[test]
    fn image_ready_frame_shape() {
        let frame: serde_json::Value =
            serde_json::from_str(&image_ready(&ImageId("img-1".into()), "a fox", "watermark"))
                .unwrap();
        assert_eq!(frame["type"], "txt2img_image");
        assert_eq!(frame["success"], true);
        assert_eq!(frame["imageId"], "img-1");
        assert_eq!(frame["positivePrompt"], "a fox");
        assert_eq!(frame["negativePrompt"], "watermark");
    }
}
