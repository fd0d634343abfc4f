//! crates/mindmate_core/src/support.rs
//!
//! Static crisis contacts and coping strategies surfaced by hosts.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CrisisContact {
    pub name: &'static str,
    pub number: &'static str,
    pub description: &'static str,
    pub available: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CopingStrategy {
    pub title: &'static str,
    pub description: &'static str,
    pub action: &'static str,
}

pub const CRISIS_CONTACTS: [CrisisContact; 4] = [
    CrisisContact {
        name: "National Suicide Prevention Lifeline",
        number: "988",
        description: "24/7 free and confidential support for people in distress",
        available: "24/7",
    },
    CrisisContact {
        name: "Crisis Text Line",
        number: "Text HOME to 741741",
        description: "Free, 24/7 support for those in crisis",
        available: "24/7",
    },
    CrisisContact {
        name: "SAMHSA National Helpline",
        number: "1-800-662-HELP (4357)",
        description: "Treatment referral and information service",
        available: "24/7",
    },
    CrisisContact {
        name: "Emergency Services",
        number: "911",
        description: "For immediate medical emergencies",
        available: "24/7",
    },
];

pub const COPING_STRATEGIES: [CopingStrategy; 4] = [
    CopingStrategy {
        title: "Breathing Exercise",
        description: "Breathe in for 4, hold for 4, exhale for 6",
        action: "Start breathing exercise",
    },
    CopingStrategy {
        title: "Grounding Technique",
        description: "5 things you see, 4 you hear, 3 you touch, 2 you smell, 1 you taste",
        action: "Begin grounding",
    },
    CopingStrategy {
        title: "Talk to MindMate",
        description: "Get immediate support from your AI companion",
        action: "Open chat",
    },
    CopingStrategy {
        title: "Call a Friend",
        description: "Reach out to someone you trust",
        action: "View contacts",
    },
];
