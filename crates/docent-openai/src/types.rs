// SPDX-FileCopyrightText: 2026 Docent Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Azure OpenAI chat-completions request/response wire types.

use docent_core::{ChatMessage, RetrievalOptions};
use serde::{Deserialize, Serialize};

// --- Request types ---

/// A request body for the chat-completions endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionBody {
    /// Ordered conversation messages.
    pub messages: Vec<ChatMessage>,

    /// Maximum tokens to generate.
    pub max_tokens: u32,

    /// Sampling temperature.
    pub temperature: f32,

    /// Nucleus sampling cutoff.
    pub top_p: f32,

    /// Penalty on token frequency.
    pub frequency_penalty: f32,

    /// Penalty on token presence.
    pub presence_penalty: f32,

    /// Retrieval-augmentation data sources. At most one `azure_search`
    /// entry is ever sent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_sources: Option<Vec<DataSource>>,
}

/// A retrieval data source attached to a completion request.
#[derive(Debug, Clone, Serialize)]
pub struct DataSource {
    /// Source kind, always `azure_search`.
    #[serde(rename = "type")]
    pub source_type: String,

    /// Search connection and ranking parameters.
    pub parameters: AzureSearchParameters,
}

/// Parameters for an `azure_search` data source.
///
/// Field casing mirrors the wire format the deployment accepts
/// (`indexName` camelCase beside snake_case keys).
#[derive(Debug, Clone, Serialize)]
pub struct AzureSearchParameters {
    pub endpoint: String,
    pub key: String,
    #[serde(rename = "indexName")]
    pub index_name: String,
    pub semantic_configuration: String,
    pub query_type: String,
    pub in_scope: bool,
    pub strictness: u8,
    pub top_n_documents: u32,
}

impl DataSource {
    /// Builds the `azure_search` data source from retrieval options.
    pub fn azure_search(retrieval: &RetrievalOptions) -> Self {
        Self {
            source_type: "azure_search".to_string(),
            parameters: AzureSearchParameters {
                endpoint: retrieval.endpoint.clone(),
                key: retrieval.api_key.clone(),
                index_name: retrieval.index.clone(),
                semantic_configuration: retrieval.semantic_configuration.clone(),
                query_type: "semantic".to_string(),
                in_scope: retrieval.in_scope,
                strictness: retrieval.strictness,
                top_n_documents: retrieval.top_n_documents,
            },
        }
    }
}

// --- Response types ---

/// A full response from the chat-completions endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionReply {
    /// Generated choices; the first one carries the answer.
    pub choices: Vec<Choice>,

    /// Model that generated the response.
    #[serde(default)]
    pub model: Option<String>,

    /// Token usage statistics.
    #[serde(default)]
    pub usage: Option<ApiUsage>,
}

/// A single generated choice.
#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    pub message: ChoiceMessage,

    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// The message inside a choice.
#[derive(Debug, Clone, Deserialize)]
pub struct ChoiceMessage {
    #[serde(default)]
    pub role: Option<String>,

    /// Generated text. Absent when the deployment returns a filtered or
    /// empty result.
    #[serde(default)]
    pub content: Option<String>,
}

/// Token usage statistics from the API.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct ApiUsage {
    #[serde(default)]
    pub prompt_tokens: u32,
    #[serde(default)]
    pub completion_tokens: u32,
    #[serde(default)]
    pub total_tokens: u32,
}

/// Error envelope returned by the service on failure.
#[derive(Debug, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorDetail,
}

/// The error payload inside the envelope.
#[derive(Debug, Deserialize)]
pub struct ApiErrorDetail {
    #[serde(default)]
    pub code: Option<String>,
    pub message: String,
}
