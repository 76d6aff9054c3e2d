//! API surface tests driving the router without a socket.

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use pretty_assertions::assert_eq;
use sahayak_config::ServerConfig;
use sahayak_core::SessionStore;
use sahayak_core::provider::GenerationProvider;
use sahayak_server::{AppContext, router};
use sahayak_test_utils::{FailingGeneration, FixedGeneration};
use serde_json::{Value, json};
use std::sync::Arc;
use tempfile::tempdir;
use tower::ServiceExt;

fn test_app(
    temp: &tempfile::TempDir,
    generation: Option<Arc<dyn GenerationProvider>>,
) -> Router {
    let config = ServerConfig {
        db_path: temp
            .path()
            .join("api.db")
            .to_string_lossy()
            .into_owned(),
        ..ServerConfig::default()
    };
    let store = Arc::new(
        SessionStore::open(&config.db_path, config.default_language, None).expect("store"),
    );
    router(Arc::new(AppContext::new(config, store, generation)))
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let value = serde_json::from_slice(&bytes).expect("json body");
    (status, value)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

#[tokio::test]
async fn health_reports_availability() {
    let temp = tempdir().expect("tempdir");
    let app = test_app(&temp, Some(Arc::new(FixedGeneration::new("hi"))));
    let (status, body) = send(&app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], json!("healthy"));
    assert_eq!(body["chatbot_available"], json!(true));

    let degraded = test_app(&temp, None);
    let (status, body) = send(&degraded, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], json!("unhealthy"));
    assert_eq!(body["chatbot_available"], json!(false));
}

#[tokio::test]
async fn root_lists_endpoints_and_status() {
    let temp = tempdir().expect("tempdir");
    let app = test_app(&temp, None);
    let (status, body) = send(&app, get("/")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], json!("degraded"));
    assert!(
        body["endpoints"]
            .as_array()
            .expect("endpoints")
            .contains(&json!("/api/chat"))
    );
}

#[tokio::test]
async fn chat_returns_outcome_and_generates_session_id() {
    let temp = tempdir().expect("tempdir");
    let app = test_app(&temp, Some(Arc::new(FixedGeneration::new("Namaste!"))));
    let (status, body) = send(
        &app,
        json_request("POST", "/api/chat", json!({ "query": "hello" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"], json!("Namaste!"));
    assert_eq!(body["language"], json!("en"));
    assert_eq!(body["input_type"], json!("text"));
    assert!(!body["session_id"].as_str().expect("session_id").is_empty());
}

#[tokio::test]
async fn chat_accepts_message_alias_and_echoes_session() {
    let temp = tempdir().expect("tempdir");
    let app = test_app(&temp, Some(Arc::new(FixedGeneration::new("ok"))));
    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/chat",
            json!({ "message": "hello", "session_id": "s-42", "language": "pa" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["session_id"], json!("s-42"));
    assert_eq!(body["language"], json!("pa"));
}

#[tokio::test]
async fn chat_rejects_empty_query() {
    let temp = tempdir().expect("tempdir");
    let app = test_app(&temp, Some(Arc::new(FixedGeneration::new("ok"))));
    let (status, body) = send(
        &app,
        json_request("POST", "/api/chat", json!({ "query": "   " })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!("Empty query"));
}

#[tokio::test]
async fn chat_unavailable_returns_service_unavailable() {
    let temp = tempdir().expect("tempdir");
    let app = test_app(&temp, None);
    let (status, body) = send(
        &app,
        json_request("POST", "/api/chat", json!({ "query": "hello" })),
    )
    .await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"], json!("Chatbot not available"));
}

#[tokio::test]
async fn chat_upstream_failure_still_returns_ok_outcome() {
    let temp = tempdir().expect("tempdir");
    let app = test_app(&temp, Some(Arc::new(FailingGeneration::new("boom"))));
    let (status, body) = send(
        &app,
        json_request("POST", "/api/chat", json!({ "query": "hello" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(
        body["response"]
            .as_str()
            .expect("response")
            .starts_with("I apologize")
    );
    assert!(body["error"].as_str().expect("error").contains("boom"));
}

#[tokio::test]
async fn preferences_round_trip_over_http() {
    let temp = tempdir().expect("tempdir");
    let app = test_app(&temp, None);

    let (status, body) = send(
        &app,
        json_request(
            "PUT",
            "/api/preferences?session_id=s1",
            json!({ "preferences": { "preferred_category": "Technology" } }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], json!("Preferences updated successfully"));

    let (status, body) = send(&app, get("/api/preferences?session_id=s1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["preferences"],
        json!({ "preferred_category": "Technology" })
    );
}

#[tokio::test]
async fn preferences_require_session_id() {
    let temp = tempdir().expect("tempdir");
    let app = test_app(&temp, None);
    let (status, body) = send(&app, get("/api/preferences")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!("session_id is required"));

    let (status, _) = send(
        &app,
        json_request("PUT", "/api/preferences", json!({ "preferences": {} })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn history_returns_recorded_turns_newest_first() {
    let temp = tempdir().expect("tempdir");
    let app = test_app(&temp, Some(Arc::new(FixedGeneration::new("answer"))));
    for query in ["first", "second"] {
        let (status, _) = send(
            &app,
            json_request(
                "POST",
                "/api/chat",
                json!({ "query": query, "session_id": "s1" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body) = send(&app, get("/api/history?session_id=s1&limit=10")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["session_id"], json!("s1"));
    let history = body["history"].as_array().expect("history");
    assert_eq!(history.len(), 2);
    assert_eq!(history[0]["query"], json!("second"));
    assert_eq!(history[1]["query"], json!("first"));
}

#[tokio::test]
async fn history_rejects_bad_limits() {
    let temp = tempdir().expect("tempdir");
    let app = test_app(&temp, None);

    let (status, body) = send(&app, get("/api/history?session_id=s1&limit=ten")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        json!("Invalid limit parameter, must be an integer.")
    );

    let (status, body) = send(&app, get("/api/history?session_id=s1&limit=0")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!("invalid history limit: 0"));
}

#[tokio::test]
async fn recommendations_filter_by_category_param() {
    let temp = tempdir().expect("tempdir");
    let app = test_app(&temp, None);
    let (status, body) = send(
        &app,
        get("/api/recommendations?session_id=s1&category=Healthcare"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let postings = body["recommendations"].as_array().expect("postings");
    assert_eq!(postings.len(), 1);
    assert_eq!(postings[0]["title"], json!("Staff Nurse"));
    assert_eq!(body["session_id"], json!("s1"));
}

#[tokio::test]
async fn recommendations_use_stored_preference() {
    let temp = tempdir().expect("tempdir");
    let app = test_app(&temp, None);
    let (status, _) = send(
        &app,
        json_request(
            "PUT",
            "/api/preferences?session_id=s1",
            json!({ "preferences": { "preferred_category": "Banking" } }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, get("/api/recommendations?session_id=s1")).await;
    assert_eq!(status, StatusCode::OK);
    let postings = body["recommendations"].as_array().expect("postings");
    assert_eq!(postings.len(), 1);
    assert_eq!(postings[0]["category"], json!("Banking"));
}
