// SPDX-FileCopyrightText: 2026 Imago Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter traits implemented by external collaborators.

pub mod queue;

pub use queue::QueueAdapter;
