//! crates/mindmate_core/src/responder.rs
//!
//! The rule-based Response Engine. An utterance is lower-cased for matching,
//! tested against an ordered list of keyword rules, and answered with the
//! first matching rule's template and suggestions.
//!
//! Rule order is observable behavior: an utterance that hits keywords of two
//! rules resolves to the earlier one. Any change to the built-in rules must
//! bump `RULESET_VERSION`.

use tracing::debug;

use crate::domain::{ClassifiedReply, DomainError, Intent, IntentRule, UTTERANCE_PLACEHOLDER};

/// Version of the built-in rule set returned by `ResponseEngine::default()`.
pub const RULESET_VERSION: u32 = 1;

const MIN_SUGGESTIONS: usize = 3;
const MAX_SUGGESTIONS: usize = 4;

//=========================================================================================
// Built-in Rules
//=========================================================================================

fn builtin_rules() -> Vec<IntentRule> {
    vec![
        IntentRule::new(
            Intent::Anxiety,
            &[
                "anxious",
                "anxiety",
                "worried",
                "worry",
                "nervous",
                "panic",
                "overwhelmed",
                "scared",
                "afraid",
            ],
            "I hear you when you say \"{utterance}\". Anxiety can feel overwhelming, so let's take this one step at a time: breathe in for 4 counts, hold for 4, and exhale for 6. You're not alone in this. What feels most pressing for you right now?",
            &[
                "Guide me through a breathing exercise",
                "What is making me feel this way?",
                "I'd like some coping strategies",
                "Help me relax",
            ],
        ),
        IntentRule::new(
            Intent::Sadness,
            &["sad", "depressed", "down", "unhappy", "hopeless", "crying", "heartbroken"],
            "Thank you for telling me \"{utterance}\". Your feelings are completely valid, and sometimes sadness is our heart's way of processing important experiences. Would you like to talk about what's contributing to these feelings?",
            &[
                "Tell me more about this",
                "What can help me feel better?",
                "Can you suggest an activity?",
                "How do I stay hopeful?",
            ],
        ),
        IntentRule::new(
            Intent::Positive,
            &["happy", "good", "great", "grateful", "excited", "joy", "calm", "wonderful"],
            "It's wonderful to hear \"{utterance}\"! These moments of joy are precious, and reflecting on them can help us appreciate them even more. What's contributing to this good feeling today?",
            &[
                "Let me share what went well",
                "How can I keep this going?",
                "I want to practice gratitude",
            ],
        ),
        IntentRule::new(
            Intent::Work,
            &["work", "job", "boss", "deadline", "office", "career", "colleague", "meeting"],
            "It sounds like work is weighing on you: \"{utterance}\". Demanding days can leave us drained, and noticing that is already a form of self-care. What part of your work feels heaviest right now?",
            &[
                "Help me plan my breaks",
                "How do I handle deadlines?",
                "How can I set better boundaries?",
                "What does balance look like for me?",
            ],
        ),
        IntentRule::new(
            Intent::Family,
            &[
                "family",
                "mother",
                "father",
                "dad",
                "parents",
                "brother",
                "sister",
                "daughter",
                "husband",
                "wife",
            ],
            "Family can bring up strong feelings, and I'm glad you shared \"{utterance}\". Every relationship has its own history and pressures. How are things between you and your family at the moment?",
            &[
                "Help me prepare for a hard conversation",
                "How do I set boundaries with family?",
                "I want to understand their side",
                "How do I care for myself through this?",
            ],
        ),
        IntentRule::new(
            Intent::Social,
            &[
                "friend",
                "relationship",
                "partner",
                "lonely",
                "alone",
                "boyfriend",
                "girlfriend",
                "people",
            ],
            "Connections with others matter so much, and I hear you saying \"{utterance}\". It takes courage to talk about relationships. What would feeling more connected look like for you?",
            &[
                "How do I reach out to someone?",
                "Help me work through a conflict",
                "How can I feel less lonely?",
                "What makes a relationship healthy?",
            ],
        ),
    ]
}

fn default_rule() -> IntentRule {
    IntentRule::new(
        Intent::Default,
        &[],
        "Thank you for sharing that with me: \"{utterance}\". I'm here to listen and support you. Your feelings matter, and it takes courage to reach out. How can I best help you right now?",
        &[
            "Tell me more about this",
            "What can help me feel better?",
            "I'd like some coping strategies",
            "Can you suggest an activity?",
        ],
    )
}

//=========================================================================================
// Response Engine
//=========================================================================================

#[derive(Debug, Clone)]
pub struct ResponseEngine {
    rules: Vec<IntentRule>,
    fallback: IntentRule,
}

impl Default for ResponseEngine {
    fn default() -> Self {
        Self {
            rules: builtin_rules(),
            fallback: default_rule(),
        }
    }
}

impl ResponseEngine {
    /// Builds an engine from custom rules, evaluated in the given order.
    pub fn new(rules: Vec<IntentRule>, fallback: IntentRule) -> Result<Self, DomainError> {
        for (i, rule) in rules.iter().enumerate() {
            validate_rule(rule)?;
            if rule.intent == Intent::Default {
                return Err(invalid(
                    rule,
                    "the default intent may only be used by the fallback rule",
                ));
            }
            if rule.keywords.is_empty() {
                return Err(invalid(rule, "rule has no keywords"));
            }
            if rules[..i].iter().any(|earlier| earlier.intent == rule.intent) {
                return Err(invalid(rule, "intent appears more than once"));
            }
        }
        validate_rule(&fallback)?;
        if fallback.intent != Intent::Default {
            return Err(invalid(&fallback, "fallback rule must use the default intent"));
        }
        Ok(Self { rules, fallback })
    }

    pub fn rules(&self) -> &[IntentRule] {
        &self.rules
    }

    /// Classifies one utterance. Total: every input yields a reply.
    pub fn classify(&self, utterance: &str) -> ClassifiedReply {
        let normalized = utterance.to_lowercase();
        let rule = self
            .rules
            .iter()
            .find(|rule| rule.matches(&normalized))
            .unwrap_or(&self.fallback);

        debug!(intent = %rule.intent, "Classified utterance");

        ClassifiedReply {
            intent: rule.intent,
            text: rule.render(utterance),
            suggestions: rule.suggestions.clone(),
        }
    }

    /// The opening message shown before the first turn.
    pub fn greeting(&self) -> ClassifiedReply {
        ClassifiedReply {
            intent: Intent::Default,
            text: "Hello! I'm MindMate, your caring AI companion. I'm here to listen and support you. How are you feeling today?".to_string(),
            suggestions: vec![
                "Tell me about your day".to_string(),
                "I'm feeling anxious".to_string(),
                "I need some encouragement".to_string(),
                "Help me relax".to_string(),
            ],
        }
    }
}

fn validate_rule(rule: &IntentRule) -> Result<(), DomainError> {
    if !rule.response_template.contains(UTTERANCE_PLACEHOLDER) {
        return Err(invalid(rule, "template does not echo the utterance"));
    }
    if !rule.response_template.trim_end().ends_with('?') {
        return Err(invalid(rule, "template must close with a question"));
    }
    if !(MIN_SUGGESTIONS..=MAX_SUGGESTIONS).contains(&rule.suggestions.len()) {
        return Err(invalid(rule, "rule needs 3 or 4 suggestions"));
    }
    Ok(())
}

fn invalid(rule: &IntentRule, reason: &str) -> DomainError {
    DomainError::InvalidRule {
        intent: rule.intent,
        reason: reason.to_string(),
    }
}

//=========================================================================================
// Caller-side Helpers
//=========================================================================================

/// Rejects empty or whitespace-only input before it reaches the engine.
/// Returns the utterance unchanged.
pub fn validate_utterance(utterance: &str) -> Result<&str, DomainError> {
    if utterance.trim().is_empty() {
        Err(DomainError::EmptyUtterance)
    } else {
        Ok(utterance)
    }
}

/// The sentence a quick-mood button prefills, e.g. "I'm feeling happy today."
pub fn quick_mood_utterance(label: &str) -> String {
    format!("I'm feeling {} today.", label.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn builtin_rules_pass_validation() {
        let engine = ResponseEngine::default();
        let rebuilt = ResponseEngine::new(engine.rules.clone(), engine.fallback.clone());
        assert!(rebuilt.is_ok());
    }

    #[test]
    fn builtin_priority_order_is_fixed() {
        let order: Vec<Intent> = ResponseEngine::default()
            .rules()
            .iter()
            .map(|r| r.intent)
            .collect();
        assert_eq!(
            order,
            vec![
                Intent::Anxiety,
                Intent::Sadness,
                Intent::Positive,
                Intent::Work,
                Intent::Family,
                Intent::Social,
            ]
        );
    }

    #[test]
    fn anxiety_keyword_returns_anxiety_suggestions_in_order() {
        let engine = ResponseEngine::default();
        let reply = engine.classify("I'm so worried about tomorrow");
        assert_eq!(reply.intent, Intent::Anxiety);
        assert_eq!(
            reply.suggestions,
            vec![
                "Guide me through a breathing exercise",
                "What is making me feel this way?",
                "I'd like some coping strategies",
                "Help me relax",
            ]
        );
    }

    #[test]
    fn matching_ignores_case_but_echo_keeps_it() {
        let engine = ResponseEngine::default();
        let reply = engine.classify("I am ANXIOUS");
        assert_eq!(reply.intent, Intent::Anxiety);
        assert!(reply.text.contains("\"I am ANXIOUS\""));
    }

    #[test]
    fn unmatched_utterance_falls_back_to_default_and_echoes() {
        let engine = ResponseEngine::default();
        let utterance = "The weather is nice today";
        let reply = engine.classify(utterance);
        assert_eq!(reply.intent, Intent::Default);
        assert!(reply.text.contains(utterance));
        assert!(reply.text.ends_with('?'));
        assert_eq!(reply.suggestions.len(), 4);
    }

    #[test]
    fn earlier_rule_wins_when_keywords_overlap() {
        let engine = ResponseEngine::default();
        assert_eq!(engine.classify("I'm sad but also happy").intent, Intent::Sadness);
        assert_eq!(engine.classify("Nervous but happy").intent, Intent::Anxiety);
        assert_eq!(engine.classify("Feeling down about work").intent, Intent::Sadness);
        assert_eq!(engine.classify("Work with my sister").intent, Intent::Work);
    }

    #[test]
    fn each_category_is_reachable() {
        let engine = ResponseEngine::default();
        assert_eq!(engine.classify("My boss keeps adding tasks").intent, Intent::Work);
        assert_eq!(engine.classify("Dinner with my parents").intent, Intent::Family);
        assert_eq!(engine.classify("I feel lonely lately").intent, Intent::Social);
        assert_eq!(engine.classify("Such a great afternoon").intent, Intent::Positive);
    }

    #[test]
    fn every_reply_closes_with_a_question_and_echoes() {
        let engine = ResponseEngine::default();
        for utterance in [
            "anxious",
            "sad",
            "happy",
            "work",
            "family",
            "friend",
            "",
            "{utterance}",
            "ÜBER NERVOUS",
        ] {
            let reply = engine.classify(utterance);
            assert!(reply.text.ends_with('?'), "{utterance:?}");
            assert!(reply.text.contains(utterance), "{utterance:?}");
            assert!((3..=4).contains(&reply.suggestions.len()));
        }
    }

    #[test]
    fn custom_rules_are_validated() {
        let no_echo = IntentRule::new(Intent::Work, &["work"], "How is work?", &["a", "b", "c"]);
        assert!(matches!(
            ResponseEngine::new(vec![no_echo], default_rule()),
            Err(DomainError::InvalidRule { intent: Intent::Work, .. })
        ));

        let no_question = IntentRule::new(Intent::Work, &["work"], "Work: {utterance}.", &["a", "b", "c"]);
        assert!(ResponseEngine::new(vec![no_question], default_rule()).is_err());

        let too_few = IntentRule::new(Intent::Work, &["work"], "{utterance}?", &["a"]);
        assert!(ResponseEngine::new(vec![too_few], default_rule()).is_err());

        let ok = IntentRule::new(Intent::Work, &["work"], "{utterance}?", &["a", "b", "c"]);
        let bad_fallback = IntentRule::new(Intent::Social, &[], "{utterance}?", &["a", "b", "c"]);
        assert!(ResponseEngine::new(vec![ok.clone()], bad_fallback).is_err());
        assert!(ResponseEngine::new(vec![ok.clone(), ok], default_rule()).is_err());
    }

    #[test]
    fn custom_order_changes_resolution() {
        let happy = IntentRule::new(Intent::Positive, &["happy"], "{utterance}?", &["a", "b", "c"]);
        let sad = IntentRule::new(Intent::Sadness, &["sad"], "{utterance}?", &["a", "b", "c"]);
        let engine = ResponseEngine::new(vec![happy, sad], default_rule()).unwrap();
        assert_eq!(engine.classify("sad and happy").intent, Intent::Positive);
    }

    #[test]
    fn greeting_offers_starter_suggestions() {
        let greeting = ResponseEngine::default().greeting();
        assert!(greeting.text.starts_with("Hello! I'm MindMate"));
        assert_eq!(greeting.suggestions.len(), 4);
    }

    #[test]
    fn blank_utterances_are_rejected_by_the_helper() {
        assert_eq!(validate_utterance("   \n"), Err(DomainError::EmptyUtterance));
        assert_eq!(validate_utterance(" hi "), Ok(" hi "));
    }

    #[test]
    fn quick_mood_prefill_lowercases_label() {
        assert_eq!(quick_mood_utterance("Anxious"), "I'm feeling anxious today.");
    }
}
