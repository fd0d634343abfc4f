//! crates/mindmate_core/src/reflection.rs
//!
//! Journal encouragement and prompts. Selection is an explicit function of a
//! seed so the same journal entry always receives the same reflection.

pub const REFLECTIONS: [&str; 4] = [
    "Your writing shows remarkable self-awareness and emotional intelligence.",
    "I appreciate how honestly you're exploring your feelings. This kind of reflection is valuable for growth.",
    "There's a lot of strength in how you're processing these experiences.",
    "Your ability to articulate your thoughts shows great emotional maturity.",
];

pub const JOURNAL_PROMPTS: [&str; 6] = [
    "What am I grateful for today?",
    "What challenged me today and how did I handle it?",
    "What made me smile recently?",
    "What do I want to let go of?",
    "How am I growing as a person?",
    "What does my ideal day look like?",
];

pub fn reflection_for(seed: u64) -> &'static str {
    REFLECTIONS[(seed % REFLECTIONS.len() as u64) as usize]
}

/// Seed derived from the entry text: its length in characters.
pub fn seed_for_content(content: &str) -> u64 {
    content.chars().count() as u64
}
