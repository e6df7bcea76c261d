// SPDX-FileCopyrightText: 2026 Docent Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Feedback enrichment pipeline.
//!
//! Each submission is validated, analyzed by the completion service,
//! rewritten into an improved docent script informed by that analysis, and
//! only then persisted. Either AI call failing aborts the submission with
//! nothing written. With enrichment disabled, validated raw feedback is
//! stored without the analysis fields.

use std::sync::Arc;

use docent_config::model::FeedbackConfig;
use docent_core::{
    ChatMessage, CompletionProvider, CompletionRequest, DocentError, EnrichmentStage,
};
use docent_store::{FeedbackDraft, FeedbackRecord, FeedbackStore};
use tracing::{debug, info};

/// Required submission fields, in the order they are checked. The first
/// missing (or null) field is the one reported.
const REQUIRED_FIELDS: [&str; 6] = [
    "rating",
    "emotion",
    "feedback",
    "location",
    "timestamp",
    "username",
];

/// A validated feedback submission.
#[derive(Debug, Clone)]
pub struct FeedbackSubmission {
    pub username: String,
    pub rating: serde_json::Value,
    pub emotion: String,
    pub feedback: String,
    pub location: String,
    pub timestamp: String,
}

impl FeedbackSubmission {
    /// Validates a raw JSON body and extracts the six required fields.
    ///
    /// Values are taken as-is: `rating` stays opaque JSON, the string
    /// fields accept any scalar and keep its textual form.
    pub fn parse(body: &serde_json::Value) -> Result<Self, DocentError> {
        for field in REQUIRED_FIELDS {
            let present = body.get(field).is_some_and(|v| !v.is_null());
            if !present {
                return Err(DocentError::Validation {
                    field: field.to_string(),
                });
            }
        }

        Ok(Self {
            username: string_field(body, "username"),
            rating: body["rating"].clone(),
            emotion: string_field(body, "emotion"),
            feedback: string_field(body, "feedback"),
            location: string_field(body, "location"),
            timestamp: string_field(body, "timestamp"),
        })
    }

    /// Textual form of the rating for prompt embedding.
    fn rating_text(&self) -> String {
        match &self.rating {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

fn string_field(body: &serde_json::Value, field: &str) -> String {
    match &body[field] {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Orchestrates the analyze-then-rewrite enrichment of each submission.
pub struct FeedbackPipeline {
    provider: Arc<dyn CompletionProvider>,
    store: Arc<FeedbackStore>,
    enrich: bool,
    analysis_max_tokens: u32,
    script_max_tokens: u32,
}

impl FeedbackPipeline {
    pub fn new(
        provider: Arc<dyn CompletionProvider>,
        store: Arc<FeedbackStore>,
        config: &FeedbackConfig,
    ) -> Self {
        Self {
            provider,
            store,
            enrich: config.enrich,
            analysis_max_tokens: config.analysis_max_tokens,
            script_max_tokens: config.script_max_tokens,
        }
    }

    /// Runs the pipeline for one submission and returns the persisted record.
    ///
    /// Steps are strictly sequential: the script prompt embeds the analysis
    /// text. Nothing is written unless every step succeeds. Resubmitting
    /// identical input creates a new record with a new id.
    pub async fn submit(
        &self,
        submission: FeedbackSubmission,
    ) -> Result<FeedbackRecord, DocentError> {
        let (analysis, improved_script) = if self.enrich {
            let analysis = self.analyze(&submission).await?;
            let script = self.improve_script(&submission, &analysis).await?;
            (Some(analysis), Some(script))
        } else {
            debug!("enrichment disabled, persisting raw feedback");
            (None, None)
        };

        let draft = FeedbackDraft {
            username: submission.username,
            rating: submission.rating,
            emotion: submission.emotion,
            feedback: submission.feedback,
            location: submission.location,
            timestamp: submission.timestamp,
            created_at: chrono::Utc::now().to_rfc3339(),
            analysis,
            improved_script,
        };

        let record = self.store.append(draft).await?;
        info!(id = record.id, location = record.location, "feedback saved");
        Ok(record)
    }

    /// Step 1: sentiment, keywords, and a one-paragraph improvement summary.
    async fn analyze(&self, submission: &FeedbackSubmission) -> Result<String, DocentError> {
        let prompt = format!(
            "분석해야 할 여행 도슨트 피드백:\n\
             - 장소: {location}\n\
             - 별점: {rating}\n\
             - 감정: {emotion}\n\
             - 피드백 내용: \"{feedback}\"\n\n\
             다음 형식으로 분석해주세요:\n\
             1. 감정 분석 (positive/negative/neutral)\n\
             2. 주요 키워드 목록\n\
             3. 개선 방향 요약 (한 문단)",
            location = submission.location,
            rating = submission.rating_text(),
            emotion = submission.emotion,
            feedback = submission.feedback,
        );

        let request = CompletionRequest::new(
            vec![ChatMessage::user(prompt)],
            self.analysis_max_tokens,
        );

        self.provider
            .complete(request)
            .await
            .map(|r| r.content)
            .map_err(|e| DocentError::enrichment(EnrichmentStage::Analysis, e))
    }

    /// Step 2: rewrite the docent script for the location, informed by the
    /// analysis text.
    async fn improve_script(
        &self,
        submission: &FeedbackSubmission,
        analysis: &str,
    ) -> Result<String, DocentError> {
        let prompt = format!(
            "현재 장소({location})의 도슨트 스크립트를 개선해주세요.\n\n\
             피드백 분석 결과:\n\
             {analysis}\n\n\
             위 분석을 반영하여 다음 사항을 개선한 새로운 도슨트 스크립트를 작성해주세요:\n\
             1. 피드백에서 지적된 문제점 해결\n\
             2. 역사적/문화적 배경 설명 보강\n\
             3. 현대적 시사점과 실용 정보 추가\n\
             4. 스토리텔링 강화\n\n\
             응답은 개선된 스크립트 내용만 작성해주세요.",
            location = submission.location,
            analysis = analysis,
        );

        let request =
            CompletionRequest::new(vec![ChatMessage::user(prompt)], self.script_max_tokens);

        self.provider
            .complete(request)
            .await
            .map(|r| r.content)
            .map_err(|e| DocentError::enrichment(EnrichmentStage::ScriptGeneration, e))
    }
}
