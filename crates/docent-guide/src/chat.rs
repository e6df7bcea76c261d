// SPDX-FileCopyrightText: 2026 Docent Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Travel-guide chat service.
//!
//! Wraps one completion call per inbound message: a fixed system persona
//! constraining answers to the 5-section travel-guide format, plus the
//! user's message. The model's reply is returned verbatim.

use std::sync::Arc;

use docent_config::model::{GuideConfig, SearchConfig};
use docent_core::{
    ChatMessage, CompletionProvider, CompletionRequest, DocentError, RetrievalOptions,
};
use tracing::{debug, warn};

/// Default system persona, as tuned for the production deployment.
const DEFAULT_SYSTEM_PROMPT: &str = "당신은 여행 가이드 챗봇입니다. 다음과 같은 형식으로 답변해주세요:\n\
     1. 여행지 추천\n\
     2. 주요 관광지\n\
     3. 예상 소요 시간\n\
     4. 교통 정보\n\
     5. 예상 비용";

/// Chat service answering travel questions through the completion provider.
pub struct TravelGuide {
    provider: Arc<dyn CompletionProvider>,
    system_prompt: String,
    max_tokens: u32,
    temperature: f32,
    top_p: f32,
    retrieval: Option<RetrievalOptions>,
}

impl TravelGuide {
    /// Builds the service from configuration.
    ///
    /// # System prompt resolution
    /// 1. `guide.system_prompt_file` if set and readable
    /// 2. `guide.system_prompt` if set
    /// 3. The built-in travel-guide persona
    ///
    /// Retrieval augmentation is attached only when the search section is
    /// fully configured (endpoint, key, and index).
    pub async fn new(
        provider: Arc<dyn CompletionProvider>,
        guide: &GuideConfig,
        search: &SearchConfig,
    ) -> Self {
        let system_prompt = load_system_prompt(guide).await;
        let retrieval = retrieval_options(search);

        if retrieval.is_some() {
            debug!("retrieval augmentation enabled for chat answers");
        }

        Self {
            provider,
            system_prompt,
            max_tokens: guide.max_tokens,
            temperature: guide.temperature,
            top_p: guide.top_p,
            retrieval,
        }
    }

    /// Answers one chat message. The reply text is returned verbatim;
    /// no post-processing or structure validation is applied.
    pub async fn ask(&self, message: &str) -> Result<String, DocentError> {
        let request = CompletionRequest {
            messages: vec![
                ChatMessage::system(&self.system_prompt),
                ChatMessage::user(message),
            ],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            top_p: self.top_p,
            frequency_penalty: 0.0,
            presence_penalty: 0.0,
            retrieval: self.retrieval.clone(),
        };

        let response = self.provider.complete(request).await?;
        Ok(response.content)
    }
}

/// Resolve the system prompt from config, file winning over inline.
async fn load_system_prompt(guide: &GuideConfig) -> String {
    if let Some(path) = &guide.system_prompt_file {
        match tokio::fs::read_to_string(path).await {
            Ok(content) => return content.trim().to_string(),
            Err(e) => {
                warn!(path, error = %e, "failed to read system prompt file, falling back");
            }
        }
    }

    guide
        .system_prompt
        .clone()
        .unwrap_or_else(|| DEFAULT_SYSTEM_PROMPT.to_string())
}

/// Build retrieval options when the search section is fully configured.
fn retrieval_options(search: &SearchConfig) -> Option<RetrievalOptions> {
    let endpoint = search.endpoint.clone()?;
    let api_key = search.api_key.clone()?;
    let index = search.index.clone()?;

    Some(RetrievalOptions {
        endpoint,
        api_key,
        index,
        semantic_configuration: search.semantic_configuration.clone(),
        in_scope: search.in_scope,
        strictness: search.strictness,
        top_n_documents: search.top_n_documents,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use docent_core::Role;
    use docent_test_utils::MockProvider;

    fn mock(responses: Vec<&str>) -> Arc<MockProvider> {
        Arc::new(MockProvider::with_responses(
            responses.into_iter().map(String::from).collect(),
        ))
    }

    #[tokio::test]
    async fn ask_returns_reply_verbatim() {
        let provider = mock(vec!["1. 부산 추천..."]);
        let guide = TravelGuide::new(
            provider.clone(),
            &GuideConfig::default(),
            &SearchConfig::default(),
        )
        .await;

        let answer = guide.ask("3박4일 부산 여행 추천해줘").await.unwrap();
        assert_eq!(answer, "1. 부산 추천...");
    }

    #[tokio::test]
    async fn ask_sends_persona_then_user_message() {
        let provider = mock(vec!["답변"]);
        let guide = TravelGuide::new(
            provider.clone(),
            &GuideConfig::default(),
            &SearchConfig::default(),
        )
        .await;

        guide.ask("경주 당일치기 코스 알려줘").await.unwrap();

        let requests = provider.requests().await;
        assert_eq!(requests.len(), 1);
        let messages = &requests[0].messages;
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::System);
        assert!(messages[0].content.contains("여행 가이드 챗봇"));
        assert!(messages[0].content.contains("예상 비용"));
        assert_eq!(messages[1].role, Role::User);
        assert_eq!(messages[1].content, "경주 당일치기 코스 알려줘");
        assert_eq!(requests[0].max_tokens, 800);
        assert!(requests[0].retrieval.is_none());
    }

    #[tokio::test]
    async fn retrieval_attached_when_search_configured() {
        let provider = mock(vec!["grounded"]);
        let search = SearchConfig {
            endpoint: Some("https://example.search.windows.net".into()),
            api_key: Some("key".into()),
            index: Some("travel-index".into()),
            ..SearchConfig::default()
        };
        let guide = TravelGuide::new(provider.clone(), &GuideConfig::default(), &search).await;

        guide.ask("부산 야경 명소?").await.unwrap();

        let requests = provider.requests().await;
        let retrieval = requests[0].retrieval.as_ref().expect("retrieval attached");
        assert_eq!(retrieval.index, "travel-index");
        assert_eq!(retrieval.semantic_configuration, "travel-semantic");
        assert_eq!(retrieval.strictness, 3);
        assert_eq!(retrieval.top_n_documents, 5);
        assert!(retrieval.in_scope);
    }

    #[tokio::test]
    async fn inline_system_prompt_overrides_default() {
        let provider = mock(vec!["ok"]);
        let guide_config = GuideConfig {
            system_prompt: Some("당신은 제주 전문 가이드입니다.".into()),
            ..GuideConfig::default()
        };
        let guide =
            TravelGuide::new(provider.clone(), &guide_config, &SearchConfig::default()).await;

        guide.ask("안녕").await.unwrap();

        let requests = provider.requests().await;
        assert_eq!(requests[0].messages[0].content, "당신은 제주 전문 가이드입니다.");
    }

    #[tokio::test]
    async fn upstream_failure_propagates() {
        let provider = Arc::new(MockProvider::new());
        provider.add_failure("deployment unavailable").await;
        let guide = TravelGuide::new(
            provider,
            &GuideConfig::default(),
            &SearchConfig::default(),
        )
        .await;

        let err = guide.ask("질문").await.unwrap_err();
        assert!(err.to_string().contains("deployment unavailable"));
    }
}
