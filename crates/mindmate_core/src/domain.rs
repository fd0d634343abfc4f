//! crates/mindmate_core/src/domain.rs
//!
//! Defines the pure, core data structures for the companion.
//! These types are independent of any database or transport; they derive
//! `serde` traits only so hosts can render or persist them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

//=========================================================================================
// Domain Errors
//=========================================================================================

/// Errors raised when a value violates a domain invariant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    #[error("Mood score {0} is outside the range 1..=10")]
    ScoreOutOfRange(i64),
    #[error("Utterance is empty")]
    EmptyUtterance,
    #[error("Invalid rule for intent '{intent}': {reason}")]
    InvalidRule { intent: Intent, reason: String },
}

//=========================================================================================
// Mood Entries
//=========================================================================================

/// A self-reported mood score, always within `1..=10`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct MoodScore(u8);

impl MoodScore {
    pub const MIN: i64 = 1;
    pub const MAX: i64 = 10;

    pub fn new(value: i64) -> Result<Self, DomainError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(DomainError::ScoreOutOfRange(value))
        }
    }

    /// For compile-time constants; an out-of-range value fails const evaluation.
    pub(crate) const fn from_const(value: u8) -> Self {
        assert!(value >= 1 && value <= 10);
        Self(value)
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for MoodScore {
    type Error = DomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<MoodScore> for i64 {
    fn from(score: MoodScore) -> Self {
        i64::from(score.0)
    }
}

/// A single mood check-in. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodEntry {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub mood_label: String,
    pub score: MoodScore,
    pub tags: Vec<String>,
}

impl MoodEntry {
    pub fn new(
        mood_label: impl Into<String>,
        score: MoodScore,
        tags: Vec<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp,
            mood_label: mood_label.into(),
            score,
            tags,
        }
    }
}

//=========================================================================================
// Chat Events
//=========================================================================================

/// Who produced a chat turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatKind {
    UserMessage,
    AiResponse,
}

impl ChatKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ChatKind::UserMessage => "user_message",
            ChatKind::AiResponse => "ai_response",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "user_message" => Some(ChatKind::UserMessage),
            "ai_response" => Some(ChatKind::AiResponse),
            _ => None,
        }
    }
}

/// One turn of conversation, either the user's utterance or the generated reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatEvent {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub text: String,
    pub kind: ChatKind,
}

impl ChatEvent {
    pub fn new(text: impl Into<String>, kind: ChatKind, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp,
            text: text.into(),
            kind,
        }
    }

    pub fn user_message(text: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self::new(text, ChatKind::UserMessage, timestamp)
    }

    pub fn ai_response(text: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self::new(text, ChatKind::AiResponse, timestamp)
    }
}

//=========================================================================================
// Intent Rules and Replies
//=========================================================================================

/// The conversational bucket an utterance was classified into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Anxiety,
    Sadness,
    Positive,
    Work,
    Family,
    Social,
    Default,
}

impl Intent {
    pub fn as_str(self) -> &'static str {
        match self {
            Intent::Anxiety => "anxiety",
            Intent::Sadness => "sadness",
            Intent::Positive => "positive",
            Intent::Work => "work",
            Intent::Family => "family",
            Intent::Social => "social",
            Intent::Default => "default",
        }
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Placeholder a response template uses to echo the user's utterance.
pub const UTTERANCE_PLACEHOLDER: &str = "{utterance}";

/// A keyword-triggered response rule. Keywords are lower case and matched by
/// substring containment against the lower-cased utterance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntentRule {
    pub intent: Intent,
    pub keywords: Vec<String>,
    pub response_template: String,
    pub suggestions: Vec<String>,
}

impl IntentRule {
    pub fn new(
        intent: Intent,
        keywords: &[&str],
        response_template: &str,
        suggestions: &[&str],
    ) -> Self {
        Self {
            intent,
            keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
            response_template: response_template.to_string(),
            suggestions: suggestions.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// `normalized` must already be lower case.
    pub fn matches(&self, normalized: &str) -> bool {
        self.keywords.iter().any(|k| normalized.contains(k.as_str()))
    }

    pub fn render(&self, utterance: &str) -> String {
        self.response_template
            .replace(UTTERANCE_PLACEHOLDER, utterance)
    }
}

/// The engine's answer to one utterance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedReply {
    pub intent: Intent,
    pub text: String,
    pub suggestions: Vec<String>,
}

//=========================================================================================
// Engagement Statistics
//=========================================================================================

/// Coarse direction of the most recent mood scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoodTrend {
    Positive,
    Neutral,
    Negative,
}

/// Derived statistics over the activity history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngagementSnapshot {
    /// Always within `0..=100`.
    pub weekly_progress: u8,
    pub streak_days: u32,
    pub trend: MoodTrend,
}
