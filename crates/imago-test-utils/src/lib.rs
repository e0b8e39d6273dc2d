// SPDX-FileCopyrightText: 2026 Imago Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Imago integration tests.

pub mod mock_queue;

pub use mock_queue::MockQueue;
