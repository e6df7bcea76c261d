// SPDX-FileCopyrightText: 2026 Docent Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP gateway for the docent relay.
//!
//! Exposes the chat and feedback endpoints over axum with permissive CORS.
//! The gateway owns the HTTP boundary: handlers translate service results
//! into JSON bodies and status codes, and nothing else in the workspace
//! touches HTTP types.

pub mod handlers;
pub mod server;

pub use server::{router, start_server, AppState};
