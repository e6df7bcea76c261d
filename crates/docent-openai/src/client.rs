// SPDX-FileCopyrightText: 2026 Docent Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the Azure OpenAI chat-completions endpoint.
//!
//! Provides [`AzureOpenAiClient`] which handles request construction and
//! authentication. Every call is a single attempt: upstream failures are
//! surfaced to the caller immediately, with the upstream's own error
//! message attached.

use std::time::Duration;

use docent_core::DocentError;
use reqwest::header::{HeaderMap, HeaderValue};
use tracing::debug;

use crate::types::{ApiErrorResponse, ChatCompletionBody, ChatCompletionReply};

/// HTTP client for Azure OpenAI chat completions.
///
/// Manages the `api-key` authentication header, connection pooling, and
/// the per-request timeout.
#[derive(Debug, Clone)]
pub struct AzureOpenAiClient {
    client: reqwest::Client,
    completions_url: String,
}

impl AzureOpenAiClient {
    /// Creates a new client.
    ///
    /// # Arguments
    /// * `endpoint` - resource endpoint, e.g. `https://example.openai.azure.com`
    /// * `api_key` - credential sent in the `api-key` header
    /// * `api_version` - API version query parameter
    /// * `deployment` - deployment (model) name in the URL path
    /// * `timeout` - per-request timeout
    pub fn new(
        endpoint: &str,
        api_key: &str,
        api_version: &str,
        deployment: &str,
        timeout: Duration,
    ) -> Result<Self, DocentError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "api-key",
            HeaderValue::from_str(api_key).map_err(|e| {
                DocentError::Config(format!("invalid API key header value: {e}"))
            })?,
        );
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| DocentError::Upstream {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        let completions_url = format!(
            "{}/openai/deployments/{}/chat/completions?api-version={}",
            endpoint.trim_end_matches('/'),
            deployment,
            api_version
        );

        Ok(Self {
            client,
            completions_url,
        })
    }

    /// Sends a completion request and returns the parsed response.
    ///
    /// Exactly one attempt. Errors, timeouts, and non-2xx statuses become
    /// [`DocentError::Upstream`] carrying the upstream message.
    pub async fn chat_completion(
        &self,
        body: &ChatCompletionBody,
    ) -> Result<ChatCompletionReply, DocentError> {
        let response = self
            .client
            .post(&self.completions_url)
            .json(body)
            .send()
            .await
            .map_err(|e| DocentError::Upstream {
                message: format!("HTTP request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(status = %status, "completion response received");

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = match serde_json::from_str::<ApiErrorResponse>(&text) {
                Ok(api_err) => match api_err.error.code {
                    Some(code) => format!("{code}: {}", api_err.error.message),
                    None => api_err.error.message,
                },
                Err(_) => format!("completion API returned {status}: {text}"),
            };
            return Err(DocentError::Upstream {
                message,
                source: None,
            });
        }

        let text = response.text().await.map_err(|e| DocentError::Upstream {
            message: format!("failed to read response body: {e}"),
            source: Some(Box::new(e)),
        })?;

        serde_json::from_str(&text).map_err(|e| DocentError::Upstream {
            message: format!("failed to parse completion response: {e}"),
            source: Some(Box::new(e)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docent_core::ChatMessage;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(endpoint: &str) -> AzureOpenAiClient {
        AzureOpenAiClient::new(
            endpoint,
            "test-api-key",
            "2024-02-15-preview",
            "gpt-4o",
            Duration::from_secs(5),
        )
        .unwrap()
    }

    fn test_body() -> ChatCompletionBody {
        ChatCompletionBody {
            messages: vec![ChatMessage::user("부산 여행 추천해줘")],
            max_tokens: 800,
            temperature: 0.7,
            top_p: 0.95,
            frequency_penalty: 0.0,
            presence_penalty: 0.0,
            data_sources: None,
        }
    }

    #[tokio::test]
    async fn chat_completion_success() {
        let server = MockServer::start().await;

        let response_body = serde_json::json!({
            "choices": [{"message": {"role": "assistant", "content": "1. 부산 추천..."}}],
            "model": "gpt-4o",
            "usage": {"prompt_tokens": 20, "completion_tokens": 40, "total_tokens": 60}
        });

        Mock::given(method("POST"))
            .and(path("/openai/deployments/gpt-4o/chat/completions"))
            .and(query_param("api-version", "2024-02-15-preview"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&response_body))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let reply = client.chat_completion(&test_body()).await.unwrap();

        assert_eq!(
            reply.choices[0].message.content.as_deref(),
            Some("1. 부산 추천...")
        );
        assert_eq!(reply.usage.unwrap().total_tokens, 60);
    }

    #[tokio::test]
    async fn client_sends_api_key_header() {
        let server = MockServer::start().await;

        let response_body = serde_json::json!({
            "choices": [{"message": {"content": "ok"}}]
        });

        Mock::given(method("POST"))
            .and(path("/openai/deployments/gpt-4o/chat/completions"))
            .and(header("api-key", "test-api-key"))
            .and(header("content-type", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&response_body))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let result = client.chat_completion(&test_body()).await;
        assert!(result.is_ok(), "headers should match: {result:?}");
    }

    #[tokio::test]
    async fn upstream_error_message_is_passed_through() {
        let server = MockServer::start().await;

        let error_body = serde_json::json!({
            "error": {"code": "DeploymentNotFound", "message": "The API deployment does not exist"}
        });

        Mock::given(method("POST"))
            .and(path("/openai/deployments/gpt-4o/chat/completions"))
            .respond_with(ResponseTemplate::new(404).set_body_json(&error_body))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client.chat_completion(&test_body()).await.unwrap_err();
        let text = err.to_string();
        assert!(text.contains("DeploymentNotFound"), "got: {text}");
        assert!(text.contains("does not exist"), "got: {text}");
    }

    #[tokio::test]
    async fn single_attempt_even_on_retryable_status() {
        let server = MockServer::start().await;

        let error_body = serde_json::json!({
            "error": {"message": "Rate limited"}
        });

        // Exactly one request must arrive: no retry on 429.
        Mock::given(method("POST"))
            .and(path("/openai/deployments/gpt-4o/chat/completions"))
            .respond_with(ResponseTemplate::new(429).set_body_json(&error_body))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client.chat_completion(&test_body()).await.unwrap_err();
        assert!(err.to_string().contains("Rate limited"));
    }

    #[tokio::test]
    async fn unparseable_error_body_falls_back_to_status_line() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/openai/deployments/gpt-4o/chat/completions"))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client.chat_completion(&test_body()).await.unwrap_err();
        let text = err.to_string();
        assert!(text.contains("502"), "got: {text}");
        assert!(text.contains("bad gateway"), "got: {text}");
    }
}
