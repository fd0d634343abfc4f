//! services/api/src/web/protocol.rs
//!
//! Defines the JSON payloads exchanged between the browser client and the
//! local MindMate service.

use chrono::{DateTime, Utc};
use mindmate_core::analytics::RecentActivity;
use mindmate_core::domain::{ChatEvent, ClassifiedReply, EngagementSnapshot, MoodEntry};
use mindmate_core::presets::{MoodPreset, QuickMood};
use mindmate_core::responder::quick_mood_utterance;
use mindmate_core::support::{CopingStrategy, CrisisContact};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

//=========================================================================================
// Requests Sent FROM the Client (Browser) TO the Server
//=========================================================================================

/// One chat turn typed by the user.
#[derive(Deserialize, ToSchema, Debug)]
pub struct ChatRequest {
    pub message: String,
}

/// A mood check-in. `score` may be omitted for one of the preset labels.
#[derive(Deserialize, ToSchema, Debug)]
pub struct MoodRequest {
    pub label: String,
    pub score: Option<i64>,
    pub tags: Option<Vec<String>>,
}

/// A journal entry to reflect on. Without a `seed` the reflection is chosen
/// from the entry's length.
#[derive(Deserialize, ToSchema, Debug)]
pub struct ReflectionRequest {
    pub content: String,
    pub seed: Option<u64>,
}

//=========================================================================================
// Responses Sent FROM the Server TO the Client (Browser)
//=========================================================================================

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
pub struct ReplyPayload {
    pub intent: String,
    pub text: String,
    pub suggestions: Vec<String>,
}

impl From<ClassifiedReply> for ReplyPayload {
    fn from(reply: ClassifiedReply) -> Self {
        Self {
            intent: reply.intent.as_str().to_string(),
            text: reply.text,
            suggestions: reply.suggestions,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, Copy)]
pub struct SnapshotPayload {
    pub weekly_progress: u8,
    pub streak_days: u32,
    /// One of `positive`, `neutral`, `negative`.
    #[schema(value_type = String)]
    pub trend: mindmate_core::domain::MoodTrend,
}

impl From<EngagementSnapshot> for SnapshotPayload {
    fn from(snapshot: EngagementSnapshot) -> Self {
        Self {
            weekly_progress: snapshot.weekly_progress,
            streak_days: snapshot.streak_days,
            trend: snapshot.trend,
        }
    }
}

#[derive(Serialize, ToSchema, Debug)]
pub struct ChatResponse {
    pub reply: ReplyPayload,
    pub snapshot: SnapshotPayload,
}

#[derive(Serialize, ToSchema, Debug)]
pub struct ChatEventPayload {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub text: String,
    /// Either `user_message` or `ai_response`.
    pub kind: String,
}

impl From<ChatEvent> for ChatEventPayload {
    fn from(event: ChatEvent) -> Self {
        Self {
            id: event.id,
            timestamp: event.timestamp,
            text: event.text,
            kind: event.kind.as_str().to_string(),
        }
    }
}

#[derive(Serialize, ToSchema, Debug)]
pub struct MoodEntryPayload {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub mood_label: String,
    pub score: u8,
    pub tags: Vec<String>,
}

impl From<MoodEntry> for MoodEntryPayload {
    fn from(entry: MoodEntry) -> Self {
        Self {
            id: entry.id,
            timestamp: entry.timestamp,
            mood_label: entry.mood_label,
            score: entry.score.get(),
            tags: entry.tags,
        }
    }
}

#[derive(Serialize, ToSchema, Debug)]
pub struct MoodResponse {
    pub entry: MoodEntryPayload,
    pub snapshot: SnapshotPayload,
}

#[derive(Serialize, ToSchema, Debug)]
pub struct MoodPresetPayload {
    pub label: String,
    pub emoji: String,
    pub score: u8,
}

impl From<&MoodPreset> for MoodPresetPayload {
    fn from(preset: &MoodPreset) -> Self {
        Self {
            label: preset.label.to_string(),
            emoji: preset.emoji.to_string(),
            score: preset.score.get(),
        }
    }
}

#[derive(Serialize, ToSchema, Debug)]
pub struct QuickMoodPayload {
    pub label: String,
    pub emoji: String,
    /// Chat text the button prefills.
    pub prefill: String,
}

impl From<&QuickMood> for QuickMoodPayload {
    fn from(mood: &QuickMood) -> Self {
        Self {
            label: mood.label.to_string(),
            emoji: mood.emoji.to_string(),
            prefill: quick_mood_utterance(mood.label),
        }
    }
}

#[derive(Serialize, ToSchema, Debug)]
pub struct RecentActivityPayload {
    pub recent_moods: Vec<MoodEntryPayload>,
    pub recent_messages: Vec<ChatEventPayload>,
    pub total_user_messages: usize,
}

impl From<RecentActivity> for RecentActivityPayload {
    fn from(activity: RecentActivity) -> Self {
        Self {
            recent_moods: activity.recent_moods.into_iter().map(Into::into).collect(),
            recent_messages: activity.recent_messages.into_iter().map(Into::into).collect(),
            total_user_messages: activity.total_user_messages,
        }
    }
}

#[derive(Serialize, ToSchema, Debug)]
pub struct ReflectionResponse {
    pub reflection: String,
}

#[derive(Serialize, ToSchema, Debug)]
pub struct PromptsResponse {
    pub prompts: Vec<String>,
}

#[derive(Serialize, ToSchema, Debug)]
pub struct CrisisContactPayload {
    pub name: String,
    pub number: String,
    pub description: String,
    pub available: String,
}

impl From<&CrisisContact> for CrisisContactPayload {
    fn from(contact: &CrisisContact) -> Self {
        Self {
            name: contact.name.to_string(),
            number: contact.number.to_string(),
            description: contact.description.to_string(),
            available: contact.available.to_string(),
        }
    }
}

#[derive(Serialize, ToSchema, Debug)]
pub struct CopingStrategyPayload {
    pub title: String,
    pub description: String,
    pub action: String,
}

impl From<&CopingStrategy> for CopingStrategyPayload {
    fn from(strategy: &CopingStrategy) -> Self {
        Self {
            title: strategy.title.to_string(),
            description: strategy.description.to_string(),
            action: strategy.action.to_string(),
        }
    }
}

#[derive(Serialize, ToSchema, Debug)]
pub struct SupportResponse {
    pub contacts: Vec<CrisisContactPayload>,
    pub strategies: Vec<CopingStrategyPayload>,
}
