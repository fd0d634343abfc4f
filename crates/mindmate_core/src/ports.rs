//! crates/mindmate_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the companion's core logic.
//! The engines never touch storage themselves; hosts inject an `ActivityStore`
//! and feed its snapshots to the pure computations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{ChatEvent, MoodEntry};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from concrete stores.
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Record at {attempted} precedes the last stored record at {last}")]
    OutOfOrder {
        last: DateTime<Utc>,
        attempted: DateTime<Utc>,
    },
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Activity Store Port
//=========================================================================================

/// Every stored record, each kind in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivitySnapshot {
    pub moods: Vec<MoodEntry>,
    pub chats: Vec<ChatEvent>,
}

/// Append-only log of mood entries and chat events.
///
/// Implementations must serialize appends and reject a record whose timestamp
/// is earlier than the last stored record of the same kind, so that insertion
/// order always equals timestamp order.
#[async_trait]
pub trait ActivityStore: Send + Sync {
    async fn append_mood(&self, entry: MoodEntry) -> PortResult<()>;

    async fn append_chat(&self, event: ChatEvent) -> PortResult<()>;

    /// Appends a user message and its reply as one unit: both are stored or
    /// neither is. The store stamps both events with the same instant, read
    /// after appends are serialized, and returns them in stored order.
    async fn append_turn(
        &self,
        user_text: String,
        reply_text: String,
    ) -> PortResult<(ChatEvent, ChatEvent)>;

    /// Returns a consistent view of every record.
    async fn read_all(&self) -> PortResult<ActivitySnapshot>;
}

/// Checks the monotonic-timestamp invariant for one append.
pub fn ensure_in_order(
    last: Option<DateTime<Utc>>,
    attempted: DateTime<Utc>,
) -> PortResult<()> {
    match last {
        Some(last) if attempted < last => Err(PortError::OutOfOrder { last, attempted }),
        _ => Ok(()),
    }
}
