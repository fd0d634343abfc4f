pub mod analytics;
pub mod domain;
pub mod ports;
pub mod presets;
pub mod reflection;
pub mod responder;
pub mod store;
pub mod support;

pub use analytics::{compute_snapshot, recent_activity, EngagementAnalyzer, RecentActivity};
pub use domain::{
    ChatEvent, ChatKind, ClassifiedReply, DomainError, EngagementSnapshot, Intent, IntentRule,
    MoodEntry, MoodScore, MoodTrend,
};
pub use ports::{ActivitySnapshot, ActivityStore, PortError, PortResult};
pub use responder::{validate_utterance, ResponseEngine, RULESET_VERSION};
pub use store::InMemoryActivityStore;
