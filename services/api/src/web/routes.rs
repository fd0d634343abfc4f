//! services/api/src/web/routes.rs
//!
//! Assembles the HTTP router shared by the `api` binary and the tests.

use crate::config::ConfigError;
use crate::error::ApiError;
use crate::web::rest::{
    chat_handler, chat_history_handler, create_mood_handler, greeting_handler,
    journal_prompts_handler, list_moods_handler, mood_presets_handler, quick_moods_handler,
    recent_activity_handler, reflection_handler, snapshot_handler, support_handler, ApiDoc,
};
use crate::web::state::AppState;
use axum::{
    http::{header::CONTENT_TYPE, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Builds the API router with CORS for the configured origin and Swagger UI.
pub fn build_router(app_state: Arc<AppState>) -> Result<Router, ApiError> {
    let origin = app_state
        .config
        .cors_origin
        .parse::<HeaderValue>()
        .map_err(|e| ConfigError::InvalidValue("CORS_ORIGIN".to_string(), e.to_string()))?;

    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE]);

    let api_router = Router::new()
        .route("/chat", post(chat_handler))
        .route("/chat/greeting", get(greeting_handler))
        .route("/chat/quick-moods", get(quick_moods_handler))
        .route("/chat/history", get(chat_history_handler))
        .route("/moods", post(create_mood_handler).get(list_moods_handler))
        .route("/moods/presets", get(mood_presets_handler))
        .route("/snapshot", get(snapshot_handler))
        .route("/activity/recent", get(recent_activity_handler))
        .route("/journal/reflection", post(reflection_handler))
        .route("/journal/prompts", get(journal_prompts_handler))
        .route("/support", get(support_handler))
        .layer(cors)
        .with_state(app_state);

    // Merge the API router with the Swagger UI router for a complete application.
    Ok(Router::new()
        .merge(api_router)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::db::tests::{memory_store, reject_replies};
    use crate::config::Config;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use mindmate_core::ports::ActivityStore;
    use mindmate_core::InMemoryActivityStore;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn test_state() -> (Arc<InMemoryActivityStore>, Arc<AppState>) {
        let config = Config::from_vars(|_| None).unwrap();
        let store = Arc::new(InMemoryActivityStore::new());
        let state = Arc::new(AppState::new(store.clone(), Arc::new(config)));
        (store, state)
    }

    async fn call(app: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let req = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let resp = app.oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn chat_stores_both_turns_and_returns_snapshot() {
        let (store, state) = test_state();
        let app = build_router(state).unwrap();

        let (status, body) = call(app, "POST", "/chat", Some(json!({ "message": "I am ANXIOUS" }))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["reply"]["intent"], "anxiety");
        assert!(body["reply"]["text"].as_str().unwrap().contains("I am ANXIOUS"));
        assert_eq!(body["snapshot"]["weekly_progress"], 10);
        assert_eq!(body["snapshot"]["streak_days"], 1);
        assert_eq!(body["snapshot"]["trend"], "neutral");

        let activity = store.read_all().await.unwrap();
        let kinds: Vec<&str> = activity.chats.iter().map(|c| c.kind.as_str()).collect();
        assert_eq!(kinds, vec!["user_message", "ai_response"]);
        assert_eq!(activity.chats[0].text, "I am ANXIOUS");
    }

    #[tokio::test]
    async fn failed_reply_write_leaves_no_orphaned_message() {
        let store = Arc::new(memory_store().await);
        reject_replies(&store).await;
        let config = Config::from_vars(|_| None).unwrap();
        let state = Arc::new(AppState::new(store.clone(), Arc::new(config)));
        let app = build_router(state).unwrap();

        let (status, _) = call(app.clone(), "POST", "/chat", Some(json!({ "message": "hello" }))).await;
        let (_, history) = call(app, "GET", "/chat/history", None).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(history, json!([]));
        assert!(store.read_all().await.unwrap().chats.is_empty());
    }

    #[tokio::test]
    async fn blank_chat_message_is_rejected_without_storing() {
        let (store, state) = test_state();
        let app = build_router(state).unwrap();

        let (status, _) = call(app, "POST", "/chat", Some(json!({ "message": "   " }))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(store.read_all().await.unwrap().chats.is_empty());
    }

    #[tokio::test]
    async fn preset_mood_uses_preset_score() {
        let (_, state) = test_state();
        let app = build_router(state).unwrap();

        let (status, body) = call(app, "POST", "/moods", Some(json!({ "label": "happy" }))).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["entry"]["mood_label"], "Happy");
        assert_eq!(body["entry"]["score"], 8);
        assert_eq!(body["entry"]["tags"], json!(["manual_entry"]));
        assert_eq!(body["snapshot"]["weekly_progress"], 25);
    }

    #[tokio::test]
    async fn mood_validation_errors_are_bad_requests() {
        let (store, state) = test_state();
        let app = build_router(state).unwrap();

        let (out_of_range, _) = call(
            app.clone(),
            "POST",
            "/moods",
            Some(json!({ "label": "Elated", "score": 11 })),
        )
        .await;
        let (custom_without_score, _) =
            call(app, "POST", "/moods", Some(json!({ "label": "Elated" }))).await;

        assert_eq!(out_of_range, StatusCode::BAD_REQUEST);
        assert_eq!(custom_without_score, StatusCode::BAD_REQUEST);
        assert!(store.read_all().await.unwrap().moods.is_empty());
    }

    #[tokio::test]
    async fn snapshot_reflects_trend_of_recent_moods() {
        let (_, state) = test_state();
        let app = build_router(state).unwrap();

        for score in [9, 8, 9] {
            let (status, _) = call(
                app.clone(),
                "POST",
                "/moods",
                Some(json!({ "label": "Great", "score": score })),
            )
            .await;
            assert_eq!(status, StatusCode::CREATED);
        }

        let (status, body) = call(app, "GET", "/snapshot", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["trend"], "positive");
        assert_eq!(body["weekly_progress"], 50);
    }

    #[tokio::test]
    async fn recent_activity_lists_latest_user_messages() {
        let (_, state) = test_state();
        let app = build_router(state).unwrap();

        for message in ["first", "second", "third"] {
            call(app.clone(), "POST", "/chat", Some(json!({ "message": message }))).await;
        }

        let (_, body) = call(app, "GET", "/activity/recent", None).await;
        assert_eq!(body["total_user_messages"], 3);
        assert_eq!(body["recent_messages"][0]["text"], "third");
        assert_eq!(body["recent_messages"][1]["text"], "second");
    }

    #[tokio::test]
    async fn reflection_is_deterministic_for_a_seed() {
        let (_, state) = test_state();
        let app = build_router(state).unwrap();

        let request = json!({ "content": "Today was long", "seed": 2 });
        let (_, first) = call(app.clone(), "POST", "/journal/reflection", Some(request.clone())).await;
        let (_, second) = call(app, "POST", "/journal/reflection", Some(request)).await;

        assert_eq!(first, second);
        assert_eq!(
            first["reflection"],
            mindmate_core::reflection::REFLECTIONS[2]
        );
    }

    #[tokio::test]
    async fn static_resources_are_served() {
        let (_, state) = test_state();
        let app = build_router(state).unwrap();

        let (_, greeting) = call(app.clone(), "GET", "/chat/greeting", None).await;
        let (_, support) = call(app.clone(), "GET", "/support", None).await;
        let (_, presets) = call(app.clone(), "GET", "/moods/presets", None).await;
        let (_, quick) = call(app, "GET", "/chat/quick-moods", None).await;

        assert_eq!(greeting["suggestions"].as_array().unwrap().len(), 4);
        assert_eq!(support["contacts"][0]["number"], "988");
        assert_eq!(presets.as_array().unwrap().len(), 6);
        assert_eq!(presets[1]["label"], "Calm");
        assert_eq!(quick.as_array().unwrap().len(), 6);
        assert_eq!(quick[3]["label"], "Tired");
        assert_eq!(quick[3]["prefill"], "I'm feeling tired today.");
    }

    #[test]
    fn invalid_cors_origin_is_a_config_error() {
        let mut config = Config::from_vars(|_| None).unwrap();
        config.cors_origin = "bad\norigin".to_string();
        let state = Arc::new(AppState::new(
            Arc::new(InMemoryActivityStore::new()),
            Arc::new(config),
        ));
        assert!(matches!(build_router(state), Err(ApiError::Config(_))));
    }
}
