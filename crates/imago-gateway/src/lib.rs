// SPDX-FileCopyrightText: 2026 Imago Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP/WebSocket gateway for the session relay.
//!
//! Owns all transport I/O: WebSocket upgrades for client sessions, the
//! POST /ack callback surface for workers, and a health endpoint. The
//! relay itself stays transport-agnostic; the gateway hands it an
//! `mpsc::Sender<String>` per connection and forwards messages in both
//! directions.

pub mod handlers;
pub mod server;
pub mod ws;

pub use server::{build_router, start_server, RelayState, ServerConfig};
