// SPDX-FileCopyrightText: 2026 Giftbay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Read-only HTTP lookup API for gift records.
//!
//! Serves `GET /gifts/{slug}` and `GET /health` for the companion web
//! front-end. Runs concurrently with the Telegram intake loop and shares
//! only the record store with it; every lookup reads through to the store.

pub mod handlers;
pub mod server;

pub use server::{start_server, ApiState, ServerConfig};
