//! Integration tests for the HTTP surface
//!
//! Requests go through the full router (CORS, tracing, JSON extraction)
//! with in-memory collaborators standing in for the LLM and the database.

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

use sdk::errors::{EngineError, GENERIC_FAILURE_MESSAGE};
use sisuu_engine::interview::{SessionTracker, COMPLETION_MESSAGE, QUESTIONS, QUESTION_COUNT};
use sisuu_engine::report::ReportGenerator;
use sisuu_engine::server::{router, LIVENESS_MESSAGE};
use sisuu_engine::storage::ProfileStore;

#[derive(Default)]
struct CannedReports {
    fail: AtomicBool,
    calls: AtomicUsize,
}

#[async_trait]
impl ReportGenerator for CannedReports {
    async fn generate_report(
        &self,
        _system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, EngineError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(EngineError::LLMProvider("model unavailable".to_string()));
        }
        Ok(format!("PROFILE ({} chars of transcript)", user_prompt.len()))
    }
}

#[derive(Default)]
struct MemoryProfiles {
    fail: AtomicBool,
    rows: Mutex<Vec<(String, String)>>,
}

#[async_trait]
impl ProfileStore for MemoryProfiles {
    fn name(&self) -> &str {
        "memory"
    }

    async fn store_profile(&self, user_id: &str, profile: &str) -> Result<(), EngineError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(EngineError::Storage("insert rejected".to_string()));
        }
        self.rows
            .lock()
            .unwrap()
            .push((user_id.to_string(), profile.to_string()));
        Ok(())
    }
}

struct TestApp {
    app: Router,
    tracker: Arc<SessionTracker>,
    reports: Arc<CannedReports>,
    profiles: Arc<MemoryProfiles>,
}

fn test_app() -> TestApp {
    let reports = Arc::new(CannedReports::default());
    let profiles = Arc::new(MemoryProfiles::default());
    let tracker = Arc::new(SessionTracker::new(
        Arc::clone(&reports) as Arc<dyn ReportGenerator>,
        Arc::clone(&profiles) as Arc<dyn ProfileStore>,
    ));
    let app = router(Arc::clone(&tracker), &[]).unwrap();

    TestApp {
        app,
        tracker,
        reports,
        profiles,
    }
}

async fn post_raw(app: &Router, body: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/chat")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn chat(app: &Router, user_id: &str, message: &str) -> (StatusCode, String) {
    let body = json!({ "user_id": user_id, "message": message }).to_string();
    let (status, value) = post_raw(app, &body).await;
    let text = value["response"].as_str().unwrap().to_string();
    (status, text)
}

async fn answer_all_but_last(app: &Router, user_id: &str) {
    chat(app, user_id, "hi").await;
    for k in 0..QUESTION_COUNT - 1 {
        let (status, text) = chat(app, user_id, &format!("{} answer {}", user_id, k)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(text, QUESTIONS[k + 1]);
    }
}

#[tokio::test]
async fn test_full_interview_over_http() {
    let t = test_app();

    let (status, text) = chat(&t.app, "u1", "hi").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(text, QUESTIONS[0]);

    let (_, text) = chat(&t.app, "u1", "Recruiter").await;
    assert_eq!(text, QUESTIONS[1]);

    for k in 1..QUESTION_COUNT - 1 {
        let (_, text) = chat(&t.app, "u1", &format!("answer {}", k)).await;
        assert_eq!(text, QUESTIONS[k + 1]);
    }

    let (status, text) = chat(&t.app, "u1", "final").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(text, COMPLETION_MESSAGE);

    assert_eq!(t.reports.calls.load(Ordering::SeqCst), 1);
    let rows = t.profiles.rows.lock().unwrap().clone();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].0, "u1");
    assert!(rows[0].1.starts_with("PROFILE"));
    assert_eq!(t.tracker.active_sessions().unwrap(), 0);

    // A completed user starts over
    let (_, text) = chat(&t.app, "u1", "again").await;
    assert_eq!(text, QUESTIONS[0]);
}

#[tokio::test]
async fn test_missing_message_defaults_to_empty() {
    let t = test_app();

    let (status, value) = post_raw(&t.app, r#"{"user_id": "u1"}"#).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(value["response"], QUESTIONS[0]);

    let (_, value) = post_raw(&t.app, r#"{"user_id": "u1"}"#).await;
    assert_eq!(value["response"], QUESTIONS[1]);

    let session = t.tracker.session("u1").await.unwrap().unwrap();
    assert_eq!(session.answers(), [String::new()]);
}

#[tokio::test]
async fn test_null_message_is_treated_as_empty() {
    let t = test_app();

    let (status, value) = post_raw(&t.app, r#"{"user_id": "u1", "message": null}"#).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(value["response"], QUESTIONS[0]);

    let (status, value) = post_raw(&t.app, r#"{"user_id": "u1", "message": null}"#).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(value["response"], QUESTIONS[1]);

    let session = t.tracker.session("u1").await.unwrap().unwrap();
    assert_eq!(session.answers(), [String::new()]);
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let t = test_app();

    for body in ["not json", "{}", r#"{"message": "hi"}"#, r#"{"user_id": 7}"#] {
        let (status, value) = post_raw(&t.app, body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body: {}", body);
        assert_eq!(value, json!({ "response": GENERIC_FAILURE_MESSAGE }));
    }

    assert_eq!(t.tracker.active_sessions().unwrap(), 0);
}

#[tokio::test]
async fn test_blank_user_id_is_bad_request() {
    let t = test_app();

    let (status, text) = chat(&t.app, "", "hi").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(text, GENERIC_FAILURE_MESSAGE);
}

#[tokio::test]
async fn test_storage_failure_keeps_session_and_retry_succeeds() {
    let t = test_app();
    answer_all_but_last(&t.app, "u2").await;

    t.profiles.fail.store(true, Ordering::SeqCst);
    let (status, text) = chat(&t.app, "u2", "final").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(text, GENERIC_FAILURE_MESSAGE);

    let session = t.tracker.session("u2").await.unwrap().unwrap();
    assert_eq!(session.answers().len(), QUESTION_COUNT - 1);
    assert_eq!(session.current_question_index(), QUESTION_COUNT - 1);

    t.profiles.fail.store(false, Ordering::SeqCst);
    let (status, text) = chat(&t.app, "u2", "final").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(text, COMPLETION_MESSAGE);

    let rows = t.profiles.rows.lock().unwrap().clone();
    assert_eq!(rows.len(), 1);
    assert_eq!(t.reports.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_report_failure_stores_nothing() {
    let t = test_app();
    answer_all_but_last(&t.app, "u3").await;

    t.reports.fail.store(true, Ordering::SeqCst);
    let (status, text) = chat(&t.app, "u3", "final").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(text, GENERIC_FAILURE_MESSAGE);

    assert!(t.profiles.rows.lock().unwrap().is_empty());
    assert!(t.tracker.session("u3").await.unwrap().is_some());
}

#[tokio::test]
async fn test_users_are_isolated() {
    let t = test_app();

    chat(&t.app, "a", "hi").await;
    chat(&t.app, "a", "x").await;
    let (_, text) = chat(&t.app, "b", "hi").await;
    assert_eq!(text, QUESTIONS[0]);

    let a = t.tracker.session("a").await.unwrap().unwrap();
    let b = t.tracker.session("b").await.unwrap().unwrap();
    assert_eq!(a.answers(), ["x".to_string()]);
    assert!(b.answers().is_empty());
}

#[tokio::test]
async fn test_liveness() {
    let t = test_app();

    let request = Request::builder().uri("/").body(Body::empty()).unwrap();
    let response = t.app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&bytes[..], LIVENESS_MESSAGE.as_bytes());
}

#[tokio::test]
async fn test_cors_preflight_allows_any_origin() {
    let t = test_app();

    let request = Request::builder()
        .method("OPTIONS")
        .uri("/chat")
        .header("origin", "https://example.org")
        .header("access-control-request-method", "POST")
        .body(Body::empty())
        .unwrap();

    let response = t.app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.headers()["access-control-allow-origin"], "*");
}
