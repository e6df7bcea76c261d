// SPDX-FileCopyrightText: 2026 Docent Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the docent relay.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level docent configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable
/// overrides. All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DocentConfig {
    /// Service identity and logging settings.
    #[serde(default)]
    pub service: ServiceConfig,

    /// HTTP server bind settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Azure OpenAI completion service settings.
    #[serde(default)]
    pub azure: AzureConfig,

    /// Azure AI Search retrieval-augmentation settings.
    #[serde(default)]
    pub search: SearchConfig,

    /// Travel-guide chat settings.
    #[serde(default)]
    pub guide: GuideConfig,

    /// Feedback store and enrichment settings.
    #[serde(default)]
    pub feedback: FeedbackConfig,
}

/// Service identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceConfig {
    /// Display name of the service.
    #[serde(default = "default_service_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: default_service_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_service_name() -> String {
    "docent".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// HTTP server bind configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

/// Azure OpenAI completion service configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AzureConfig {
    /// Resource endpoint URL, e.g. `https://example.openai.azure.com`.
    /// Required to serve; no compiled default.
    #[serde(default)]
    pub endpoint: Option<String>,

    /// API key. `None` falls back to the `AZURE_OPENAI_API_KEY` env var.
    #[serde(default)]
    pub api_key: Option<String>,

    /// API version query parameter.
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Deployment (model) name.
    #[serde(default = "default_deployment")]
    pub deployment: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for AzureConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            api_key: None,
            api_version: default_api_version(),
            deployment: default_deployment(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_api_version() -> String {
    "2024-02-15-preview".to_string()
}

fn default_deployment() -> String {
    "gpt-4o".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

/// Azure AI Search retrieval-augmentation configuration.
///
/// Retrieval is attached to chat requests only when `endpoint`, `api_key`,
/// and `index` are all set.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SearchConfig {
    /// Search service endpoint URL.
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Search service credential.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Index name to query.
    #[serde(default)]
    pub index: Option<String>,

    /// Semantic ranking profile name.
    #[serde(default = "default_semantic_configuration")]
    pub semantic_configuration: String,

    /// Relevance filter, 1 (loose) to 5 (strict).
    #[serde(default = "default_strictness")]
    pub strictness: u8,

    /// How many documents to feed into the model context.
    #[serde(default = "default_top_n_documents")]
    pub top_n_documents: u32,

    /// Restrict answers to retrieved documents only.
    #[serde(default = "default_in_scope")]
    pub in_scope: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            api_key: None,
            index: None,
            semantic_configuration: default_semantic_configuration(),
            strictness: default_strictness(),
            top_n_documents: default_top_n_documents(),
            in_scope: default_in_scope(),
        }
    }
}

impl SearchConfig {
    /// True when enough is configured to attach retrieval to chat requests.
    pub fn is_configured(&self) -> bool {
        self.endpoint.is_some() && self.api_key.is_some() && self.index.is_some()
    }
}

fn default_semantic_configuration() -> String {
    "travel-semantic".to_string()
}

fn default_strictness() -> u8 {
    3
}

fn default_top_n_documents() -> u32 {
    5
}

fn default_in_scope() -> bool {
    true
}

/// Travel-guide chat configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GuideConfig {
    /// Inline system prompt override. Overridden by `system_prompt_file`
    /// if both are set.
    #[serde(default)]
    pub system_prompt: Option<String>,

    /// Path to a file containing the system prompt. Takes precedence over
    /// `system_prompt` if both are set.
    #[serde(default)]
    pub system_prompt_file: Option<String>,

    /// Maximum tokens to generate per chat answer.
    #[serde(default = "default_guide_max_tokens")]
    pub max_tokens: u32,

    /// Sampling temperature.
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Nucleus sampling cutoff.
    #[serde(default = "default_top_p")]
    pub top_p: f32,
}

impl Default for GuideConfig {
    fn default() -> Self {
        Self {
            system_prompt: None,
            system_prompt_file: None,
            max_tokens: default_guide_max_tokens(),
            temperature: default_temperature(),
            top_p: default_top_p(),
        }
    }
}

fn default_guide_max_tokens() -> u32 {
    800
}

fn default_temperature() -> f32 {
    0.7
}

fn default_top_p() -> f32 {
    0.95
}

/// Feedback store and enrichment configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FeedbackConfig {
    /// Path to the JSON-array store file. Created on first append.
    #[serde(default = "default_store_path")]
    pub store_path: String,

    /// Run the two-step AI enrichment before persisting. When false,
    /// validated raw feedback is stored without analysis fields.
    #[serde(default = "default_enrich")]
    pub enrich: bool,

    /// Token budget for the feedback-analysis completion.
    #[serde(default = "default_analysis_max_tokens")]
    pub analysis_max_tokens: u32,

    /// Token budget for the improved-script completion.
    #[serde(default = "default_script_max_tokens")]
    pub script_max_tokens: u32,
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            store_path: default_store_path(),
            enrich: default_enrich(),
            analysis_max_tokens: default_analysis_max_tokens(),
            script_max_tokens: default_script_max_tokens(),
        }
    }
}

fn default_store_path() -> String {
    "feedback.json".to_string()
}

fn default_enrich() -> bool {
    true
}

fn default_analysis_max_tokens() -> u32 {
    300
}

fn default_script_max_tokens() -> u32 {
    500
}
