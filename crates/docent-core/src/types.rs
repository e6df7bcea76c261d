// SPDX-FileCopyrightText: 2026 Docent Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared between the completion provider and the services
//! built on top of it.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Role tag on a chat message.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A single role-tagged message in a completion request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Retrieval-augmentation settings attached to a completion request.
///
/// When present, the provider grounds the answer in documents fetched
/// from the named search index.
#[derive(Debug, Clone)]
pub struct RetrievalOptions {
    /// Search service endpoint URL.
    pub endpoint: String,
    /// Search service credential.
    pub api_key: String,
    /// Name of the index to query.
    pub index: String,
    /// Semantic ranking profile name.
    pub semantic_configuration: String,
    /// Restrict answers to retrieved documents only.
    pub in_scope: bool,
    /// Relevance filter, 1 (loose) to 5 (strict).
    pub strictness: u8,
    /// How many documents to feed into the model context.
    pub top_n_documents: u32,
}

/// A request to the completion provider.
///
/// `messages` must be non-empty; by convention the first message carries
/// the system role establishing persona and format constraints.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
    pub frequency_penalty: f32,
    pub presence_penalty: f32,
    pub retrieval: Option<RetrievalOptions>,
}

impl CompletionRequest {
    /// A request with the generation parameters the upstream deployment
    /// was tuned for (0.7 temperature, 0.95 top_p, zero penalties).
    pub fn new(messages: Vec<ChatMessage>, max_tokens: u32) -> Self {
        Self {
            messages,
            max_tokens,
            temperature: 0.7,
            top_p: 0.95,
            frequency_penalty: 0.0,
            presence_penalty: 0.0,
            retrieval: None,
        }
    }

    pub fn with_retrieval(mut self, retrieval: Option<RetrievalOptions>) -> Self {
        self.retrieval = retrieval;
        self
    }
}

/// A response from the completion provider.
#[derive(Debug, Clone)]
pub struct CompletionResponse {
    /// The generated text of the first choice.
    pub content: String,
    /// Model that produced the response, when reported.
    pub model: Option<String>,
    /// Token usage, when reported.
    pub usage: Option<TokenUsage>,
}

/// Token usage statistics reported by the completion service.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// Identifies which enrichment pipeline step an error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum EnrichmentStage {
    #[strum(serialize = "feedback analysis")]
    Analysis,
    #[strum(serialize = "script generation")]
    ScriptGeneration,
}
