// SPDX-FileCopyrightText: 2026 Docent Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the docent relay.
//!
//! This crate provides the error taxonomy, the completion request/response
//! types, and the [`CompletionProvider`] trait implemented by the Azure
//! OpenAI adapter and by the test mock.

pub mod error;
pub mod provider;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::DocentError;
pub use provider::CompletionProvider;
pub use types::{
    ChatMessage, CompletionRequest, CompletionResponse, EnrichmentStage, RetrievalOptions,
    Role, TokenUsage,
};
