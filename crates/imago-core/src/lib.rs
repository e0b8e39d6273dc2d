// SPDX-FileCopyrightText: 2026 Imago Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Imago session relay.
//!
//! This crate provides the error type, the wire-level data types shared
//! between the relay and its collaborators, and the trait the external
//! work queue transport implements.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::ImagoError;
pub use traits::QueueAdapter;
pub use types::{CompletionCallback, ConnectionTag, ImageId, PromptRequest, WorkItem};
