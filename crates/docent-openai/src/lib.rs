// SPDX-FileCopyrightText: 2026 Docent Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Azure OpenAI completion provider for the docent relay.
//!
//! This crate implements [`CompletionProvider`] over the Azure OpenAI
//! chat-completions API, with optional retrieval augmentation against an
//! Azure AI Search index.

pub mod client;
pub mod types;

use std::time::Duration;

use async_trait::async_trait;
use docent_config::DocentConfig;
use docent_core::{
    CompletionProvider, CompletionRequest, CompletionResponse, DocentError, TokenUsage,
};
use tracing::{debug, info};

use crate::client::AzureOpenAiClient;
use crate::types::{ChatCompletionBody, DataSource};

/// Azure OpenAI provider implementing [`CompletionProvider`].
///
/// API key resolution order: config -> `AZURE_OPENAI_API_KEY` env var -> error.
pub struct AzureOpenAiProvider {
    client: AzureOpenAiClient,
}

impl AzureOpenAiProvider {
    /// Creates a new provider from the given configuration.
    ///
    /// Fails when `azure.endpoint` is unset or no API key can be resolved.
    pub fn new(config: &DocentConfig) -> Result<Self, DocentError> {
        let endpoint = config.azure.endpoint.as_deref().ok_or_else(|| {
            DocentError::Config(
                "azure.endpoint is required to reach the completion service".to_string(),
            )
        })?;
        let api_key = resolve_api_key(&config.azure.api_key)?;

        let client = AzureOpenAiClient::new(
            endpoint,
            &api_key,
            &config.azure.api_version,
            &config.azure.deployment,
            Duration::from_secs(config.azure.timeout_secs),
        )?;

        info!(
            deployment = config.azure.deployment,
            api_version = config.azure.api_version,
            "Azure OpenAI provider initialized"
        );

        Ok(Self { client })
    }

    fn to_completion_body(request: &CompletionRequest) -> ChatCompletionBody {
        let data_sources = request
            .retrieval
            .as_ref()
            .map(|r| vec![DataSource::azure_search(r)]);

        ChatCompletionBody {
            messages: request.messages.clone(),
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            top_p: request.top_p,
            frequency_penalty: request.frequency_penalty,
            presence_penalty: request.presence_penalty,
            data_sources,
        }
    }
}

#[async_trait]
impl CompletionProvider for AzureOpenAiProvider {
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, DocentError> {
        if request.messages.is_empty() {
            return Err(DocentError::Internal(
                "completion request requires at least one message".to_string(),
            ));
        }

        let body = Self::to_completion_body(&request);
        let reply = self.client.chat_completion(&body).await?;

        let content = reply
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or_else(|| DocentError::Upstream {
                message: "completion returned no choices".to_string(),
                source: None,
            })?;

        debug!(
            chars = content.len(),
            retrieval = request.retrieval.is_some(),
            "completion received"
        );

        Ok(CompletionResponse {
            content,
            model: reply.model,
            usage: reply.usage.map(|u| TokenUsage {
                prompt_tokens: u.prompt_tokens,
                completion_tokens: u.completion_tokens,
                total_tokens: u.total_tokens,
            }),
        })
    }
}

/// Resolve the API key from config or the `AZURE_OPENAI_API_KEY` env var.
fn resolve_api_key(configured: &Option<String>) -> Result<String, DocentError> {
    if let Some(key) = configured {
        if !key.trim().is_empty() {
            return Ok(key.clone());
        }
    }

    std::env::var("AZURE_OPENAI_API_KEY").map_err(|_| {
        DocentError::Config(
            "Azure OpenAI API key required: set azure.api_key or the AZURE_OPENAI_API_KEY \
             environment variable"
                .to_string(),
        )
    })
}
