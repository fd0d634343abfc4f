//! services/api/src/web/rest.rs
//!
//! Contains the Axum handlers for the REST API endpoints and the master
//! definition for the OpenAPI specification.

use crate::web::protocol::{
    ChatEventPayload, ChatRequest, ChatResponse, CopingStrategyPayload, CrisisContactPayload,
    MoodEntryPayload, MoodPresetPayload, MoodRequest, MoodResponse, PromptsResponse,
    QuickMoodPayload, RecentActivityPayload, ReflectionRequest, ReflectionResponse, ReplyPayload, SnapshotPayload,
    SupportResponse,
};
use crate::web::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use chrono::Utc;
use mindmate_core::analytics::recent_activity;
use mindmate_core::domain::{MoodEntry, MoodScore};
use mindmate_core::ports::{ActivitySnapshot, PortError};
use mindmate_core::presets::{find_preset, MANUAL_ENTRY_TAG, MOOD_PRESETS, QUICK_MOODS};
use mindmate_core::reflection::{reflection_for, seed_for_content, JOURNAL_PROMPTS};
use mindmate_core::responder::validate_utterance;
use mindmate_core::support::{COPING_STRATEGIES, CRISIS_CONTACTS};
use std::sync::Arc;
use tracing::{error, info};
use utoipa::OpenApi;

type HandlerError = (StatusCode, String);

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        greeting_handler,
        quick_moods_handler,
        chat_handler,
        chat_history_handler,
        create_mood_handler,
        list_moods_handler,
        mood_presets_handler,
        snapshot_handler,
        recent_activity_handler,
        reflection_handler,
        journal_prompts_handler,
        support_handler,
    ),
    components(
        schemas(
            ChatRequest, ChatResponse, ReplyPayload, SnapshotPayload, ChatEventPayload,
            MoodRequest, MoodResponse, MoodEntryPayload, MoodPresetPayload, QuickMoodPayload,
            RecentActivityPayload, ReflectionRequest, ReflectionResponse, PromptsResponse,
            SupportResponse, CrisisContactPayload, CopingStrategyPayload
        )
    ),
    tags(
        (name = "MindMate API", description = "Local endpoints for the wellbeing companion.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// Shared Helpers
//=========================================================================================

fn port_failure(action: &str, e: PortError) -> HandlerError {
    error!("Failed to {}: {:?}", action, e);
    match e {
        PortError::OutOfOrder { .. } => (
            StatusCode::CONFLICT,
            "A newer record was stored concurrently; please retry".to_string(),
        ),
        PortError::Unexpected(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to {}", action),
        ),
    }
}

async fn load_activity(app_state: &AppState) -> Result<ActivitySnapshot, HandlerError> {
    app_state
        .store
        .read_all()
        .await
        .map_err(|e| port_failure("read activity", e))
}

/// Recomputes the engagement snapshot from the current store contents.
async fn current_snapshot(app_state: &AppState) -> Result<SnapshotPayload, HandlerError> {
    let activity = load_activity(app_state).await?;
    let snapshot = app_state
        .analyzer
        .snapshot(&activity.moods, &activity.chats, Utc::now());
    Ok(snapshot.into())
}

//=========================================================================================
// Chat Handlers
//=========================================================================================

/// The companion's opening message.
#[utoipa::path(
    get,
    path = "/chat/greeting",
    responses((status = 200, description = "Greeting and starter suggestions", body = ReplyPayload))
)]
pub async fn greeting_handler(State(app_state): State<Arc<AppState>>) -> Json<ReplyPayload> {
    Json(app_state.responder.greeting().into())
}

/// Home-screen buttons that prefill a chat message.
#[utoipa::path(
    get,
    path = "/chat/quick-moods",
    responses((status = 200, description = "Quick mood buttons", body = [QuickMoodPayload]))
)]
pub async fn quick_moods_handler() -> Json<Vec<QuickMoodPayload>> {
    Json(QUICK_MOODS.iter().map(Into::into).collect())
}

/// Send one message and receive the companion's reply.
///
/// The message and the reply are stored together, or not at all, and the
/// engagement snapshot is recomputed afterwards.
#[utoipa::path(
    post,
    path = "/chat",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Reply generated", body = ChatResponse),
        (status = 400, description = "Message is empty"),
        (status = 409, description = "Concurrent write, retry"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn chat_handler(
    State(app_state): State<Arc<AppState>>,
    Json(req): Json<ChatRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let message = validate_utterance(&req.message)
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;

    let reply = app_state.responder.classify(message);
    info!(intent = %reply.intent, "Replying to chat message");

    app_state
        .store
        .append_turn(message.to_string(), reply.text.clone())
        .await
        .map_err(|e| port_failure("store chat turn", e))?;

    let snapshot = current_snapshot(&app_state).await?;
    Ok(Json(ChatResponse {
        reply: reply.into(),
        snapshot,
    }))
}

/// Every chat turn, in the order it was stored.
#[utoipa::path(
    get,
    path = "/chat/history",
    responses(
        (status = 200, description = "Chat history", body = [ChatEventPayload]),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn chat_history_handler(
    State(app_state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, HandlerError> {
    let activity = load_activity(&app_state).await?;
    let history: Vec<ChatEventPayload> = activity.chats.into_iter().map(Into::into).collect();
    Ok(Json(history))
}

//=========================================================================================
// Mood Handlers
//=========================================================================================

fn build_mood_entry(req: MoodRequest) -> Result<MoodEntry, HandlerError> {
    let label = req.label.trim();
    if label.is_empty() {
        return Err((StatusCode::BAD_REQUEST, "Mood label is required".to_string()));
    }
    match (req.score, find_preset(label)) {
        (Some(raw), _) => {
            let score = MoodScore::new(raw).map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;
            let tags = req
                .tags
                .unwrap_or_else(|| vec![MANUAL_ENTRY_TAG.to_string()]);
            Ok(MoodEntry::new(label, score, tags, Utc::now()))
        }
        (None, Some(preset)) => {
            let mut entry = MoodEntry::from_preset(preset, Utc::now());
            if let Some(tags) = req.tags {
                entry.tags = tags;
            }
            Ok(entry)
        }
        (None, None) => Err((
            StatusCode::BAD_REQUEST,
            format!("A score is required for the custom mood '{}'", label),
        )),
    }
}

/// Record a mood check-in.
#[utoipa::path(
    post,
    path = "/moods",
    request_body = MoodRequest,
    responses(
        (status = 201, description = "Mood recorded", body = MoodResponse),
        (status = 400, description = "Missing label or score out of range"),
        (status = 409, description = "Concurrent write, retry"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn create_mood_handler(
    State(app_state): State<Arc<AppState>>,
    Json(req): Json<MoodRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let entry = build_mood_entry(req)?;
    info!(mood = %entry.mood_label, score = entry.score.get(), "Recording mood");

    app_state
        .store
        .append_mood(entry.clone())
        .await
        .map_err(|e| port_failure("store mood entry", e))?;

    let snapshot = current_snapshot(&app_state).await?;
    Ok((
        StatusCode::CREATED,
        Json(MoodResponse {
            entry: entry.into(),
            snapshot,
        }),
    ))
}

/// Every mood entry, in the order it was stored.
#[utoipa::path(
    get,
    path = "/moods",
    responses(
        (status = 200, description = "Mood history", body = [MoodEntryPayload]),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn list_moods_handler(
    State(app_state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, HandlerError> {
    let activity = load_activity(&app_state).await?;
    let moods: Vec<MoodEntryPayload> = activity.moods.into_iter().map(Into::into).collect();
    Ok(Json(moods))
}

/// One-tap mood options.
#[utoipa::path(
    get,
    path = "/moods/presets",
    responses((status = 200, description = "Mood presets", body = [MoodPresetPayload]))
)]
pub async fn mood_presets_handler() -> Json<Vec<MoodPresetPayload>> {
    Json(MOOD_PRESETS.iter().map(Into::into).collect())
}

//=========================================================================================
// Analytics Handlers
//=========================================================================================

/// Recompute the engagement snapshot on demand.
#[utoipa::path(
    get,
    path = "/snapshot",
    responses(
        (status = 200, description = "Current engagement snapshot", body = SnapshotPayload),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn snapshot_handler(
    State(app_state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, HandlerError> {
    Ok(Json(current_snapshot(&app_state).await?))
}

/// Latest moods and messages for the activity feed.
#[utoipa::path(
    get,
    path = "/activity/recent",
    responses(
        (status = 200, description = "Recent activity", body = RecentActivityPayload),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn recent_activity_handler(
    State(app_state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, HandlerError> {
    let activity = load_activity(&app_state).await?;
    let recent: RecentActivityPayload = recent_activity(&activity.moods, &activity.chats).into();
    Ok(Json(recent))
}

//=========================================================================================
// Journal and Support Handlers
//=========================================================================================

/// A short encouragement for a journal entry.
#[utoipa::path(
    post,
    path = "/journal/reflection",
    request_body = ReflectionRequest,
    responses(
        (status = 200, description = "Reflection selected", body = ReflectionResponse),
        (status = 400, description = "Entry is empty")
    )
)]
pub async fn reflection_handler(
    Json(req): Json<ReflectionRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    if req.content.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "Journal entry is empty".to_string()));
    }
    let seed = req.seed.unwrap_or_else(|| seed_for_content(&req.content));
    Ok(Json(ReflectionResponse {
        reflection: reflection_for(seed).to_string(),
    }))
}

/// Journaling prompts.
#[utoipa::path(
    get,
    path = "/journal/prompts",
    responses((status = 200, description = "Prompts", body = PromptsResponse))
)]
pub async fn journal_prompts_handler() -> Json<PromptsResponse> {
    Json(PromptsResponse {
        prompts: JOURNAL_PROMPTS.iter().map(|p| p.to_string()).collect(),
    })
}

/// Crisis contacts and coping strategies.
#[utoipa::path(
    get,
    path = "/support",
    responses((status = 200, description = "Support resources", body = SupportResponse))
)]
pub async fn support_handler() -> Json<SupportResponse> {
    Json(SupportResponse {
        contacts: CRISIS_CONTACTS.iter().map(Into::into).collect(),
        strategies: COPING_STRATEGIES.iter().map(Into::into).collect(),
    })
}
