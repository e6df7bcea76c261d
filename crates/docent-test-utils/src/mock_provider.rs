// SPDX-FileCopyrightText: 2026 Docent Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock completion provider for deterministic testing.
//!
//! `MockProvider` implements `CompletionProvider` with pre-configured
//! outcomes, enabling fast, CI-runnable tests without external API calls.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use docent_core::{
    CompletionProvider, CompletionRequest, CompletionResponse, DocentError, TokenUsage,
};

/// A mock completion provider that returns pre-configured outcomes.
///
/// Outcomes are popped from a FIFO queue: `Ok(text)` becomes a successful
/// completion, `Err(message)` becomes an upstream failure. When the queue
/// is empty, a default "mock response" text is returned. Every request is
/// captured so tests can assert on the prompts that were sent.
pub struct MockProvider {
    outcomes: Arc<Mutex<VecDeque<Result<String, String>>>>,
    requests: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl MockProvider {
    /// Create a new mock provider with an empty outcome queue.
    pub fn new() -> Self {
        Self {
            outcomes: Arc::new(Mutex::new(VecDeque::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a mock provider pre-loaded with successful responses.
    pub fn with_responses(responses: Vec<String>) -> Self {
        let provider = Self::new();
        {
            let outcomes = Arc::clone(&provider.outcomes);
            let mut queue = outcomes.try_lock().expect("fresh mutex");
            queue.extend(responses.into_iter().map(Ok));
        }
        provider
    }

    /// Queue a successful response.
    pub async fn add_response(&self, text: impl Into<String>) {
        self.outcomes.lock().await.push_back(Ok(text.into()));
    }

    /// Queue an upstream failure with the given message.
    pub async fn add_failure(&self, message: impl Into<String>) {
        self.outcomes.lock().await.push_back(Err(message.into()));
    }

    /// All requests received so far, in order.
    pub async fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().await.clone()
    }

    /// Pop the next outcome, or return the default text.
    async fn next_outcome(&self) -> Result<String, String> {
        self.outcomes
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Ok("mock response".to_string()))
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CompletionProvider for MockProvider {
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, DocentError> {
        self.requests.lock().await.push(request);

        match self.next_outcome().await {
            Ok(content) => Ok(CompletionResponse {
                content,
                model: Some("mock-model".to_string()),
                usage: Some(TokenUsage {
                    prompt_tokens: 10,
                    completion_tokens: 20,
                    total_tokens: 30,
                }),
            }),
            Err(message) => Err(DocentError::Upstream {
                message,
                source: None,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docent_core::ChatMessage;

    fn req(content: &str) -> CompletionRequest {
        CompletionRequest::new(vec![ChatMessage::user(content)], 100)
    }

    #[tokio::test]
    async fn default_response_when_queue_empty() {
        let provider = MockProvider::new();
        let resp = provider.complete(req("anything")).await.unwrap();
        assert_eq!(resp.content, "mock response");
    }

    #[tokio::test]
    async fn queued_outcomes_returned_in_order() {
        let provider =
            MockProvider::with_responses(vec!["first".to_string(), "second".to_string()]);
        provider.add_failure("boom").await;

        assert_eq!(provider.complete(req("1")).await.unwrap().content, "first");
        assert_eq!(provider.complete(req("2")).await.unwrap().content, "second");

        let err = provider.complete(req("3")).await.unwrap_err();
        assert!(err.to_string().contains("boom"));

        // Queue exhausted, falls back to default.
        assert_eq!(
            provider.complete(req("4")).await.unwrap().content,
            "mock response"
        );
    }

    #[tokio::test]
    async fn requests_are_captured_in_order() {
        let provider = MockProvider::with_responses(vec!["a".into(), "b".into()]);
        provider.complete(req("질문 하나")).await.unwrap();
        provider.complete(req("질문 둘")).await.unwrap();

        let requests = provider.requests().await;
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].messages[0].content, "질문 하나");
        assert_eq!(requests[1].messages[0].content, "질문 둘");
    }
}
