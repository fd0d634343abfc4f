//! crates/mindmate_core/src/presets.rs
//!
//! One-tap mood options and the scores they record.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::{MoodEntry, MoodScore};

/// Tag attached to entries created from a preset.
pub const MANUAL_ENTRY_TAG: &str = "manual_entry";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MoodPreset {
    pub label: &'static str,
    pub emoji: &'static str,
    pub score: MoodScore,
}

pub static MOOD_PRESETS: [MoodPreset; 6] = [
    MoodPreset { label: "Happy", emoji: "😊", score: MoodScore::from_const(8) },
    MoodPreset { label: "Calm", emoji: "😌", score: MoodScore::from_const(7) },
    MoodPreset { label: "Okay", emoji: "😐", score: MoodScore::from_const(5) },
    MoodPreset { label: "Sad", emoji: "😔", score: MoodScore::from_const(3) },
    MoodPreset { label: "Anxious", emoji: "😰", score: MoodScore::from_const(2) },
    MoodPreset { label: "Angry", emoji: "😡", score: MoodScore::from_const(2) },
];

/// A home-screen button that prefills the chat box rather than recording a mood.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuickMood {
    pub label: &'static str,
    pub emoji: &'static str,
}

pub static QUICK_MOODS: [QuickMood; 6] = [
    QuickMood { label: "Happy", emoji: "😊" },
    QuickMood { label: "Sad", emoji: "😔" },
    QuickMood { label: "Anxious", emoji: "😰" },
    QuickMood { label: "Tired", emoji: "😴" },
    QuickMood { label: "Angry", emoji: "😡" },
    QuickMood { label: "Grateful", emoji: "🤗" },
];

pub fn find_preset(label: &str) -> Option<&'static MoodPreset> {
    MOOD_PRESETS
        .iter()
        .find(|p| p.label.eq_ignore_ascii_case(label.trim()))
}

impl MoodEntry {
    pub fn from_preset(preset: &MoodPreset, timestamp: DateTime<Utc>) -> Self {
        MoodEntry::new(
            preset.label,
            preset.score,
            vec![MANUAL_ENTRY_TAG.to_string()],
            timestamp,
        )
    }
}
