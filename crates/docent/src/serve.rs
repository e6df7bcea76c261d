// SPDX-FileCopyrightText: 2026 Docent Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `docent serve` command implementation.
//!
//! Wires the configured completion provider, feedback store, and services
//! into the gateway and runs the HTTP server until shutdown.

use std::sync::Arc;

use docent_config::DocentConfig;
use docent_core::{CompletionProvider, DocentError};
use docent_gateway::{start_server, AppState};
use docent_guide::{FeedbackPipeline, TravelGuide};
use docent_openai::AzureOpenAiProvider;
use docent_store::FeedbackStore;
use tracing::{error, info};

/// Runs the `docent serve` command.
pub async fn run_serve(config: DocentConfig) -> Result<(), DocentError> {
    init_tracing(&config.service.log_level);

    info!(service = config.service.name, "starting docent serve");

    let provider = AzureOpenAiProvider::new(&config).map_err(|e| {
        error!(error = %e, "failed to initialize Azure OpenAI provider");
        eprintln!(
            "error: Azure OpenAI settings required. Set azure.endpoint in docent.toml and \
             azure.api_key (or the AZURE_OPENAI_API_KEY environment variable)."
        );
        e
    })?;
    let provider: Arc<dyn CompletionProvider> = Arc::new(provider);

    let store = Arc::new(FeedbackStore::new(&config.feedback.store_path));
    info!(path = config.feedback.store_path, "feedback store ready");

    let guide = Arc::new(
        TravelGuide::new(Arc::clone(&provider), &config.guide, &config.search).await,
    );
    if config.search.is_configured() {
        info!("chat answers grounded in the configured search index");
    }

    let feedback = Arc::new(FeedbackPipeline::new(provider, store, &config.feedback));
    if config.feedback.enrich {
        info!("feedback enrichment enabled (analyze, then rewrite script)");
    } else {
        info!("feedback enrichment disabled, raw submissions are persisted");
    }

    let state = AppState::new(guide, feedback);
    start_server(&config.server, state).await
}

/// Crates whose logs follow the configured level; everything else stays at warn.
const LOG_TARGETS: [&str; 7] = [
    "docent",
    "docent_core",
    "docent_config",
    "docent_openai",
    "docent_store",
    "docent_guide",
    "docent_gateway",
];

/// Initialize the tracing subscriber. `RUST_LOG` overrides the config level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let directives = LOG_TARGETS
            .iter()
            .map(|target| format!("{target}={log_level}"))
            .collect::<Vec<_>>()
            .join(",");
        EnvFilter::new(format!("warn,{directives}"))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
