// SPDX-FileCopyrightText: 2026 Docent Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Provider trait for chat-completion services.

use async_trait::async_trait;

use crate::error::DocentError;
use crate::types::{CompletionRequest, CompletionResponse};

/// A hosted chat-completion service.
///
/// Implementations make exactly one attempt per call: failures surface
/// immediately to the caller with the upstream message attached. There is
/// no retry or backoff at this layer.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Sends a completion request and returns the generated text.
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, DocentError>;
}
