// SPDX-FileCopyrightText: 2026 Docent Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Feedback record types as persisted to disk.

use serde::{Deserialize, Serialize};

/// One persisted feedback entry. Immutable once written, identified by `id`.
///
/// Field declaration order is the on-disk key order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackRecord {
    /// Store-assigned, dense and increasing.
    pub id: u64,
    pub username: String,
    /// Numeric or string, opaque to this system.
    pub rating: serde_json::Value,
    pub emotion: String,
    pub feedback: String,
    pub location: String,
    /// Client-supplied submission timestamp.
    pub timestamp: String,
    /// Server-assigned RFC-3339 write time.
    pub created_at: String,
    /// AI analysis of the feedback, when enrichment ran.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<String>,
    /// AI-rewritten docent script, when enrichment ran.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub improved_script: Option<String>,
}

/// A feedback entry awaiting its store-assigned id.
#[derive(Debug, Clone)]
pub struct FeedbackDraft {
    pub username: String,
    pub rating: serde_json::Value,
    pub emotion: String,
    pub feedback: String,
    pub location: String,
    pub timestamp: String,
    pub created_at: String,
    pub analysis: Option<String>,
    pub improved_script: Option<String>,
}

impl FeedbackDraft {
    /// Seals the draft with the id the store assigned.
    pub fn into_record(self, id: u64) -> FeedbackRecord {
        FeedbackRecord {
            id,
            username: self.username,
            rating: self.rating,
            emotion: self.emotion,
            feedback: self.feedback,
            location: self.location,
            timestamp: self.timestamp,
            created_at: self.created_at,
            analysis: self.analysis,
            improved_script: self.improved_script,
        }
    }
}
