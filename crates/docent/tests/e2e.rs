// SPDX-FileCopyrightText: 2026 Docent Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end tests for the complete docent pipeline.
//!
//! Each test builds the full service stack from a TOML config string with
//! a mock completion provider and a temp store, then drives it through the
//! gateway router. Tests are independent and order-insensitive.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use tower::ServiceExt;

use docent_config::load_and_validate_str;
use docent_gateway::{router, AppState};
use docent_guide::{FeedbackPipeline, TravelGuide};
use docent_store::FeedbackStore;
use docent_test_utils::MockProvider;

struct Harness {
    _dir: tempfile::TempDir,
    app: axum::Router,
    store: Arc<FeedbackStore>,
    provider: Arc<MockProvider>,
}

/// Build the service stack the way `docent serve` does, from a config
/// string, but with the provider mocked out.
async fn harness(extra_toml: &str, responses: Vec<&str>) -> Harness {
    let dir = tempfile::TempDir::new().unwrap();
    let store_path = dir.path().join("feedback.json");

    let toml = format!(
        "[feedback]\nstore_path = \"{}\"\n{extra_toml}",
        store_path.display()
    );
    let config = load_and_validate_str(&toml).expect("test config should validate");

    let provider = Arc::new(MockProvider::with_responses(
        responses.into_iter().map(String::from).collect(),
    ));
    let store = Arc::new(FeedbackStore::new(&config.feedback.store_path));

    let guide = Arc::new(
        TravelGuide::new(provider.clone(), &config.guide, &config.search).await,
    );
    let feedback = Arc::new(FeedbackPipeline::new(
        provider.clone(),
        Arc::clone(&store),
        &config.feedback,
    ));

    Harness {
        _dir: dir,
        app: router(AppState::new(guide, feedback)),
        store,
        provider,
    }
}

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn feedback_body(username: &str, feedback: &str) -> serde_json::Value {
    serde_json::json!({
        "rating": 5,
        "emotion": "감동",
        "feedback": feedback,
        "location": "석굴암",
        "timestamp": "2026-08-05T14:00:00",
        "username": username
    })
}

#[tokio::test]
async fn chat_roundtrip_through_the_router() {
    let h = harness("", vec!["1. 부산 추천..."]).await;

    let response = h
        .app
        .oneshot(post_json(
            "/api/chat",
            serde_json::json!({"message": "3박4일 부산 여행 추천해줘"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["response"], "1. 부산 추천...");

    // The service received the 5-section persona plus the user message.
    let requests = h.provider.requests().await;
    assert_eq!(requests[0].messages.len(), 2);
    assert!(requests[0].messages[0].content.contains("여행 가이드 챗봇"));
}

#[tokio::test]
async fn each_submission_grows_the_store_by_exactly_one() {
    let h = harness(
        "",
        vec!["분석1", "스크립트1", "분석2", "스크립트2"],
    )
    .await;

    for (i, username) in ["김민지", "이수현"].iter().enumerate() {
        let before = h.store.load_all().await.unwrap().len();

        let response = h
            .app
            .clone()
            .oneshot(post_json(
                "/api/feedback",
                feedback_body(username, "한국어 피드백 내용입니다"),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["feedback_id"], (before + 1) as u64);
        assert_eq!(h.store.load_all().await.unwrap().len(), before + 1);
        assert_eq!(body["feedback_id"], (i + 1) as u64);
    }

    // Round-trip: everything written comes back intact, Korean preserved.
    let records = h.store.load_all().await.unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].username, "김민지");
    assert_eq!(records[1].username, "이수현");
    assert_eq!(records[0].feedback, "한국어 피드백 내용입니다");
    assert_eq!(records[0].analysis.as_deref(), Some("분석1"));
    assert_eq!(records[1].improved_script.as_deref(), Some("스크립트2"));
}

#[tokio::test]
async fn failed_enrichment_leaves_store_length_unchanged() {
    let h = harness("", vec![]).await;
    h.provider.add_failure("analysis model unavailable").await;

    let response = h
        .app
        .clone()
        .oneshot(post_json("/api/feedback", feedback_body("김민지", "피드백")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(h.store.load_all().await.unwrap().is_empty());

    // The next valid submission still gets id 1.
    h.provider.add_response("분석").await;
    h.provider.add_response("스크립트").await;
    let response = h
        .app
        .oneshot(post_json("/api/feedback", feedback_body("김민지", "피드백")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["feedback_id"], 1);
}

#[tokio::test]
async fn raw_persistence_mode_skips_the_provider_entirely() {
    let h = harness("enrich = false\n", vec![]).await;

    let response = h
        .app
        .oneshot(post_json("/api/feedback", feedback_body("박서준", "피드백")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(h.provider.requests().await.is_empty());

    let records = h.store.load_all().await.unwrap();
    assert_eq!(records.len(), 1);
    assert!(records[0].analysis.is_none());
}

#[tokio::test]
async fn config_guide_settings_reach_the_provider() {
    let h = harness_with_guide().await;

    let response = h
        .app
        .oneshot(post_json("/api/chat", serde_json::json!({"message": "질문"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let requests = h.provider.requests().await;
    assert_eq!(requests[0].max_tokens, 512);
    assert_eq!(requests[0].messages[0].content, "당신은 경주 전문 도슨트입니다.");
}

async fn harness_with_guide() -> Harness {
    harness(
        "[guide]\nmax_tokens = 512\nsystem_prompt = \"당신은 경주 전문 도슨트입니다.\"\n",
        vec!["답변"],
    )
    .await
}
