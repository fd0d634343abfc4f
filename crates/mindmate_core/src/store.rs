//! crates/mindmate_core/src/store.rs
//!
//! An in-memory `ActivityStore`, used by tests and by hosts that do not need
//! durability.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::{ChatEvent, MoodEntry};
use crate::ports::{ensure_in_order, ActivitySnapshot, ActivityStore, PortResult};

#[derive(Debug)]
pub struct InMemoryActivityStore {
    inner: RwLock<ActivitySnapshot>,
    clock: fn() -> DateTime<Utc>,
}

impl Default for InMemoryActivityStore {
    fn default() -> Self {
        Self::with_clock(Utc::now)
    }
}

impl InMemoryActivityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses `clock` to stamp chat turns instead of the system time.
    pub fn with_clock(clock: fn() -> DateTime<Utc>) -> Self {
        Self {
            inner: RwLock::new(ActivitySnapshot::default()),
            clock,
        }
    }
}

#[async_trait]
impl ActivityStore for InMemoryActivityStore {
    async fn append_mood(&self, entry: MoodEntry) -> PortResult<()> {
        let mut guard = self.inner.write().await;
        ensure_in_order(guard.moods.last().map(|m| m.timestamp), entry.timestamp)?;
        debug!(mood_id = %entry.id, "Appending mood entry");
        guard.moods.push(entry);
        Ok(())
    }

    async fn append_chat(&self, event: ChatEvent) -> PortResult<()> {
        let mut guard = self.inner.write().await;
        ensure_in_order(guard.chats.last().map(|c| c.timestamp), event.timestamp)?;
        debug!(chat_id = %event.id, kind = event.kind.as_str(), "Appending chat event");
        guard.chats.push(event);
        Ok(())
    }

    async fn append_turn(
        &self,
        user_text: String,
        reply_text: String,
    ) -> PortResult<(ChatEvent, ChatEvent)> {
        let mut guard = self.inner.write().await;
        let now = (self.clock)();
        ensure_in_order(guard.chats.last().map(|c| c.timestamp), now)?;

        let user = ChatEvent::user_message(user_text, now);
        let reply = ChatEvent::ai_response(reply_text, now);
        debug!(user_id = %user.id, reply_id = %reply.id, "Appending chat turn");
        guard.chats.push(user.clone());
        guard.chats.push(reply.clone());
        Ok((user, reply))
    }

    async fn read_all(&self) -> PortResult<ActivitySnapshot> {
        Ok(self.inner.read().await.clone())
    }
}
