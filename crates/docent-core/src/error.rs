// SPDX-FileCopyrightText: 2026 Docent Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the docent relay.

use thiserror::Error;

use crate::types::EnrichmentStage;

/// The primary error type used across the docent workspace.
#[derive(Debug, Error)]
pub enum DocentError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// A required input field is missing from a feedback submission.
    ///
    /// The display string doubles as the HTTP error body, so the wording
    /// is fixed by the API contract.
    #[error("Missing required field: {field}")]
    Validation { field: String },

    /// Completion or search service failure. The upstream message is
    /// carried through verbatim, never swallowed.
    #[error("completion service error: {message}")]
    Upstream {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The feedback store file exists but is not parseable as a record array.
    #[error("feedback store at {path} is corrupt: {source}")]
    StoreCorrupt {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// File I/O failure while reading or writing the feedback store.
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// One of the enrichment pipeline's AI calls failed. No record is
    /// written when this is raised.
    #[error("feedback enrichment failed during {stage}: {source}")]
    Enrichment {
        stage: EnrichmentStage,
        source: Box<DocentError>,
    },

    /// HTTP server errors (bind failure, accept loop failure).
    #[error("server error: {message}")]
    Server {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl DocentError {
    /// Wraps an error in the enrichment variant, tagging the failed stage.
    pub fn enrichment(stage: EnrichmentStage, source: DocentError) -> Self {
        Self::Enrichment {
            stage,
            source: Box::new(source),
        }
    }

    /// True for errors the caller can correct by fixing the request body.
    pub fn is_user_error(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}
