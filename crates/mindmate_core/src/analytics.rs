//! crates/mindmate_core/src/analytics.rs
//!
//! The Analytics Engine: a pure function from the activity history and the
//! current instant to a progress score, an activity streak and a mood trend.

use std::collections::BTreeSet;

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, Offset, Utc};
use serde::Serialize;

use crate::domain::{ChatEvent, ChatKind, EngagementSnapshot, MoodEntry, MoodTrend};

/// Length of the trailing window used for progress and streak.
pub const WINDOW_DAYS: i64 = 7;

const POINTS_PER_MESSAGE: usize = 10;
const MESSAGE_CAP: usize = 50;
const POINTS_PER_MOOD: usize = 25;
const MOOD_CAP: usize = 50;
const PROGRESS_CAP: usize = 100;

const TREND_SAMPLE: usize = 3;
const TREND_MIN_ENTRIES: usize = 2;
const POSITIVE_ABOVE: u32 = 7;
const NEGATIVE_BELOW: u32 = 4;

const RECENT_MOODS: usize = 3;
const RECENT_MESSAGES: usize = 2;

//=========================================================================================
// Engagement Snapshot
//=========================================================================================

/// Computes snapshots, taking calendar dates in a fixed UTC offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngagementAnalyzer {
    offset: FixedOffset,
}

impl Default for EngagementAnalyzer {
    fn default() -> Self {
        Self::utc()
    }
}

impl EngagementAnalyzer {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    pub fn utc() -> Self {
        Self::new(Utc.fix())
    }

    pub fn snapshot(
        &self,
        moods: &[MoodEntry],
        chats: &[ChatEvent],
        now: DateTime<Utc>,
    ) -> EngagementSnapshot {
        let window_start = now - Duration::days(WINDOW_DAYS);
        let in_window = |ts: DateTime<Utc>| ts >= window_start && ts <= now;

        let recent_messages: Vec<DateTime<Utc>> = chats
            .iter()
            .filter(|c| c.kind == ChatKind::UserMessage && in_window(c.timestamp))
            .map(|c| c.timestamp)
            .collect();
        let recent_moods: Vec<DateTime<Utc>> = moods
            .iter()
            .filter(|m| in_window(m.timestamp))
            .map(|m| m.timestamp)
            .collect();

        let chat_contribution = recent_messages
            .len()
            .saturating_mul(POINTS_PER_MESSAGE)
            .min(MESSAGE_CAP);
        let mood_contribution = recent_moods
            .len()
            .saturating_mul(POINTS_PER_MOOD)
            .min(MOOD_CAP);
        let weekly_progress = (chat_contribution + mood_contribution).min(PROGRESS_CAP) as u8;

        let active_days: BTreeSet<NaiveDate> = recent_messages
            .iter()
            .chain(recent_moods.iter())
            .map(|ts| ts.with_timezone(&self.offset).date_naive())
            .collect();

        EngagementSnapshot {
            weekly_progress,
            streak_days: active_days.len() as u32,
            trend: mood_trend(moods),
        }
    }
}

/// `EngagementAnalyzer::utc().snapshot(..)`.
pub fn compute_snapshot(
    moods: &[MoodEntry],
    chats: &[ChatEvent],
    now: DateTime<Utc>,
) -> EngagementSnapshot {
    EngagementAnalyzer::utc().snapshot(moods, chats, now)
}

/// Trend of the last few entries by insertion order, regardless of the window.
pub fn mood_trend(moods: &[MoodEntry]) -> MoodTrend {
    if moods.len() < TREND_MIN_ENTRIES {
        return MoodTrend::Neutral;
    }
    let recent = &moods[moods.len().saturating_sub(TREND_SAMPLE)..];
    let count = recent.len() as u32;
    let sum: u32 = recent.iter().map(|m| u32::from(m.score.get())).sum();

    // Compare sums instead of averages: avg > 7 <=> sum > 7n.
    if sum > POSITIVE_ABOVE * count {
        MoodTrend::Positive
    } else if sum < NEGATIVE_BELOW * count {
        MoodTrend::Negative
    } else {
        MoodTrend::Neutral
    }
}

//=========================================================================================
// Recent Activity
//=========================================================================================

/// The latest records for an activity feed, newest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecentActivity {
    pub recent_moods: Vec<MoodEntry>,
    pub recent_messages: Vec<ChatEvent>,
    pub total_user_messages: usize,
}

pub fn recent_activity(moods: &[MoodEntry], chats: &[ChatEvent]) -> RecentActivity {
    let user_messages: Vec<&ChatEvent> = chats
        .iter()
        .filter(|c| c.kind == ChatKind::UserMessage)
        .collect();

    RecentActivity {
        recent_moods: moods.iter().rev().take(RECENT_MOODS).cloned().collect(),
        recent_messages: user_messages
            .iter()
            .rev()
            .take(RECENT_MESSAGES)
            .map(|c| (*c).clone())
            .collect(),
        total_user_messages: user_messages.len(),
    }
}
