// SPDX-FileCopyrightText: 2026 Docent Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.
//!
//! Sets up routes, the permissive CORS layer (cross-origin browser
//! clients are first-class callers), and shared state.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

use docent_config::model::ServerConfig;
use docent_core::DocentError;
use docent_guide::{FeedbackPipeline, TravelGuide};

use crate::handlers;

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Travel-guide chat service.
    pub guide: Arc<TravelGuide>,
    /// Feedback enrichment pipeline.
    pub feedback: Arc<FeedbackPipeline>,
    /// Process start time for uptime reporting.
    pub started_at: Instant,
}

impl AppState {
    pub fn new(guide: Arc<TravelGuide>, feedback: Arc<FeedbackPipeline>) -> Self {
        Self {
            guide,
            feedback,
            started_at: Instant::now(),
        }
    }
}

/// Build the gateway router with all routes and middleware.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/chat", post(handlers::post_chat))
        .route("/api/feedback", post(handlers::post_feedback))
        .route("/health", get(handlers::get_health))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Start the gateway HTTP server.
///
/// Binds to the configured host:port and serves until a ctrl-c signal
/// arrives.
pub async fn start_server(config: &ServerConfig, state: AppState) -> Result<(), DocentError> {
    let app = router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| DocentError::Server {
            message: format!("failed to bind to {addr}: {e}"),
            source: Some(Box::new(e)),
        })?;

    tracing::info!("docent gateway listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| DocentError::Server {
            message: format!("server error: {e}"),
            source: Some(Box::new(e)),
        })?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        tracing::info!("shutdown signal received");
    }
}
