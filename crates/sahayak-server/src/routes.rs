//! API routes and handlers.

use crate::context::AppContext;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use log::{info, warn};
use sahayak_core::types::{PreferenceMap, QueryRequest, default_input_type};
use serde::Deserialize;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

/// Default session id for API calls that omit one on read endpoints.
const DEFAULT_API_SESSION: &str = "default_api_session";

type ApiResponse = (StatusCode, Json<Value>);

/// Build the API router for the given context.
pub fn router(ctx: Arc<AppContext>) -> Router {
    let cors = cors_layer(&ctx.config.allowed_origins);
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/api/chat", post(chat))
        .route("/api/recommendations", get(recommendations))
        .route("/api/preferences", get(get_preferences).put(put_preferences))
        .route("/api/history", get(history))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}

/// CORS policy: permissive unless origins are configured.
fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }
    let parsed = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("ignoring unparseable CORS origin '{origin}'");
                None
            }
        })
        .collect::<Vec<_>>();
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(parsed))
        .allow_methods(Any)
        .allow_headers(Any)
}

/// `GET /` — liveness and endpoint listing.
async fn root(State(ctx): State<Arc<AppContext>>) -> Json<Value> {
    let status = if ctx.chatbot_available() {
        "active"
    } else {
        "degraded"
    };
    Json(json!({
        "message": format!("{} API is running!", ctx.config.app_name),
        "status": status,
        "version": ctx.config.app_version,
        "endpoints": [
            "/health",
            "/api/chat",
            "/api/recommendations",
            "/api/preferences",
            "/api/history",
        ],
        "timestamp_utc": Utc::now(),
    }))
}

/// `GET /health` — availability probe.
async fn health(State(ctx): State<Arc<AppContext>>) -> Json<Value> {
    let available = ctx.chatbot_available();
    Json(json!({
        "status": if available { "healthy" } else { "unhealthy" },
        "chatbot_available": available,
        "timestamp_utc": Utc::now(),
    }))
}

/// Body for `POST /api/chat`. Accepts `message` as an alias for
/// `query` for older clients.
#[derive(Debug, Deserialize)]
struct ChatBody {
    #[serde(alias = "message", default)]
    query: String,
    #[serde(default)]
    language: Option<String>,
    #[serde(default)]
    session_id: Option<String>,
    #[serde(default = "default_input_type")]
    input_type: String,
}

/// `POST /api/chat` — one chat exchange.
async fn chat(State(ctx): State<Arc<AppContext>>, Json(body): Json<ChatBody>) -> ApiResponse {
    if !ctx.chatbot_available() {
        warn!("chat request received but generation is unavailable");
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "error": "Chatbot not available",
                "reply": "Service temporarily unavailable. Please try again later.",
            })),
        );
    }
    if body.query.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "Empty query",
                "reply": "Please provide a question.",
            })),
        );
    }

    let session_id = body
        .session_id
        .filter(|session_id| !session_id.trim().is_empty())
        .unwrap_or_else(|| Uuid::new_v4().to_string());
    info!(
        "chat request (session_id={}, query_len={})",
        session_id,
        body.query.len()
    );

    let request = QueryRequest {
        query: body.query,
        session_id,
        language: body.language,
        input_type: body.input_type,
    };
    let outcome = ctx.dispatcher.process_query(&request).await;
    (StatusCode::OK, Json(json!(outcome)))
}

/// Query params for `GET /api/recommendations`.
#[derive(Debug, Deserialize)]
struct RecommendationsParams {
    #[serde(default)]
    session_id: Option<String>,
    #[serde(default)]
    category: Option<String>,
}

/// `GET /api/recommendations` — static postings filtered by category.
async fn recommendations(
    State(ctx): State<Arc<AppContext>>,
    Query(params): Query<RecommendationsParams>,
) -> Json<Value> {
    let session_id = params
        .session_id
        .unwrap_or_else(|| DEFAULT_API_SESSION.to_string());
    let postings = ctx
        .dispatcher
        .recommend_jobs(&session_id, params.category.as_deref());
    Json(json!({
        "recommendations": postings,
        "session_id": session_id,
    }))
}

/// Query params for the preference endpoints.
#[derive(Debug, Deserialize)]
struct PreferencesParams {
    #[serde(default)]
    session_id: Option<String>,
}

/// `GET /api/preferences` — stored preference mapping.
async fn get_preferences(
    State(ctx): State<Arc<AppContext>>,
    Query(params): Query<PreferencesParams>,
) -> ApiResponse {
    let Some(session_id) = params.session_id else {
        return missing_session_id();
    };
    match ctx.store.preferences(&session_id) {
        Ok(preferences) => (StatusCode::OK, Json(json!({ "preferences": preferences }))),
        Err(err) => internal_error("fetching preferences", &err.to_string()),
    }
}

/// Body for `PUT /api/preferences`.
#[derive(Debug, Deserialize)]
struct PreferencesBody {
    #[serde(default)]
    session_id: Option<String>,
    #[serde(default)]
    preferences: PreferenceMap,
}

/// `PUT /api/preferences` — overwrite the preference mapping.
async fn put_preferences(
    State(ctx): State<Arc<AppContext>>,
    Query(params): Query<PreferencesParams>,
    Json(body): Json<PreferencesBody>,
) -> ApiResponse {
    let Some(session_id) = params.session_id.or(body.session_id) else {
        return missing_session_id();
    };
    match ctx.store.set_preferences(&session_id, &body.preferences) {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "message": "Preferences updated successfully" })),
        ),
        Err(err) => internal_error("updating preferences", &err.to_string()),
    }
}

/// `GET /api/history` — recent turns, newest first.
async fn history(
    State(ctx): State<Arc<AppContext>>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResponse {
    let session_id = params
        .get("session_id")
        .cloned()
        .unwrap_or_else(|| DEFAULT_API_SESSION.to_string());
    let limit = match params.get("limit") {
        Some(raw) => match raw.trim().parse::<i64>() {
            Ok(limit) => limit,
            Err(_) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(json!({
                        "error": "Invalid limit parameter, must be an integer.",
                    })),
                );
            }
        },
        None => 10,
    };

    match ctx.store.history(&session_id, limit) {
        Ok(turns) => (
            StatusCode::OK,
            Json(json!({ "history": turns, "session_id": session_id })),
        ),
        Err(err) if err.is_invalid_argument() => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": err.to_string() })),
        ),
        Err(err) => internal_error("fetching history", &err.to_string()),
    }
}

/// 400 response for calls missing a session id.
fn missing_session_id() -> ApiResponse {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "error": "session_id is required" })),
    )
}

/// 500 response with a logged detail.
fn internal_error(operation: &str, detail: &str) -> ApiResponse {
    log::error!("internal error {operation}: {detail}");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": format!("Internal server error {operation}") })),
    )
}
