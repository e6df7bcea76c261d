// SPDX-FileCopyrightText: 2026 Docent Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the docent REST API.
//!
//! Handles POST /api/chat, POST /api/feedback, GET /health. Every failure
//! is mapped to a JSON body and status here, at the boundary; nothing
//! below this layer knows about HTTP.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use docent_guide::FeedbackSubmission;

use crate::server::AppState;

/// Request body for POST /api/chat.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// Message content text. Absent reads as empty, matching the
    /// tolerant behavior of the upstream deployment's previous client.
    #[serde(default)]
    pub message: String,
}

/// Success body for POST /api/chat.
#[derive(Debug, Serialize)]
pub struct ChatReply {
    pub success: bool,
    pub response: String,
}

/// Failure body for POST /api/chat.
#[derive(Debug, Serialize)]
pub struct ChatErrorReply {
    pub success: bool,
    pub error: String,
}

/// Success body for POST /api/feedback.
#[derive(Debug, Serialize)]
pub struct FeedbackSavedReply {
    pub message: String,
    pub feedback_id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub improved_script: Option<String>,
}

/// Generic error body.
#[derive(Debug, Serialize)]
pub struct ErrorReply {
    pub error: String,
}

/// Response body for GET /health.
#[derive(Debug, Serialize)]
pub struct HealthReply {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
}

/// POST /api/chat
///
/// Forwards the message to the travel-guide service and returns the
/// generated answer verbatim.
pub async fn post_chat(
    State(state): State<AppState>,
    Json(body): Json<ChatRequest>,
) -> Response {
    let request_id = uuid::Uuid::new_v4();

    match state.guide.ask(&body.message).await {
        Ok(response) => {
            info!(%request_id, chars = response.len(), "chat answered");
            (
                StatusCode::OK,
                Json(ChatReply {
                    success: true,
                    response,
                }),
            )
                .into_response()
        }
        Err(e) => {
            error!(%request_id, error = %e, "chat failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ChatErrorReply {
                    success: false,
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}

/// POST /api/feedback
///
/// Validates the submission, runs the enrichment pipeline, and persists
/// the record. Validation failures name the first missing field; pipeline
/// and store failures come back as a 500 with a fixed prefix.
pub async fn post_feedback(
    State(state): State<AppState>,
    Json(body): Json<serde_json::Value>,
) -> Response {
    let request_id = uuid::Uuid::new_v4();

    let submission = match FeedbackSubmission::parse(&body) {
        Ok(submission) => submission,
        Err(e) => {
            info!(%request_id, error = %e, "feedback submission rejected");
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorReply {
                    error: e.to_string(),
                }),
            )
                .into_response();
        }
    };

    match state.feedback.submit(submission).await {
        Ok(record) => (
            StatusCode::OK,
            Json(FeedbackSavedReply {
                message: "Feedback saved successfully".to_string(),
                feedback_id: record.id,
                analysis: record.analysis,
                improved_script: record.improved_script,
            }),
        )
            .into_response(),
        Err(e) => {
            error!(%request_id, error = %e, "feedback submission failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorReply {
                    error: format!("Failed to save feedback: {e}"),
                }),
            )
                .into_response()
        }
    }
}

/// GET /health
///
/// Liveness probe with version and uptime.
pub async fn get_health(State(state): State<AppState>) -> Json<HealthReply> {
    Json(HealthReply {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.started_at.elapsed().as_secs(),
    })
}
