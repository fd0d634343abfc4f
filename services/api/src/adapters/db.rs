//! services/api/src/adapters/db.rs
//!
//! This module contains the database adapter, the concrete implementation of
//! the `ActivityStore` port from the `core` crate. It keeps the activity log
//! in a local SQLite file using `sqlx`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mindmate_core::domain::{ChatEvent, ChatKind, MoodEntry, MoodScore};
use mindmate_core::ports::{
    ensure_in_order, ActivitySnapshot, ActivityStore, PortError, PortResult,
};
use sqlx::{FromRow, SqlitePool};
use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A database adapter that implements the `ActivityStore` port.
pub struct SqliteActivityStore {
    pool: SqlitePool,
    /// Serializes appends so the ordering check and the insert are atomic.
    append_lock: Mutex<()>,
}

impl SqliteActivityStore {
    /// Creates a new `SqliteActivityStore`.
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            append_lock: Mutex::new(()),
        }
    }

    /// A helper function to run database migrations at startup.
    pub async fn run_migrations(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await
    }
}

//=========================================================================================
// "Impure" Database Record Structs
//=========================================================================================

#[derive(FromRow)]
struct MoodRecord {
    id: String,
    timestamp: DateTime<Utc>,
    mood_label: String,
    score: i64,
    tags: String,
}
impl MoodRecord {
    fn to_domain(self) -> PortResult<MoodEntry> {
        Ok(MoodEntry {
            id: parse_id(&self.id)?,
            timestamp: self.timestamp,
            mood_label: self.mood_label,
            score: MoodScore::new(self.score).map_err(|e| PortError::Unexpected(e.to_string()))?,
            tags: serde_json::from_str(&self.tags)
                .map_err(|e| PortError::Unexpected(format!("Corrupt tags for mood {}: {}", self.id, e)))?,
        })
    }
}

#[derive(FromRow)]
struct ChatRecord {
    id: String,
    timestamp: DateTime<Utc>,
    text: String,
    kind: String,
}
impl ChatRecord {
    fn to_domain(self) -> PortResult<ChatEvent> {
        let kind = ChatKind::parse(&self.kind).ok_or_else(|| {
            PortError::Unexpected(format!("Unknown chat kind '{}' for event {}", self.kind, self.id))
        })?;
        Ok(ChatEvent {
            id: parse_id(&self.id)?,
            timestamp: self.timestamp,
            text: self.text,
            kind,
        })
    }
}

fn parse_id(raw: &str) -> PortResult<Uuid> {
    Uuid::parse_str(raw).map_err(|e| PortError::Unexpected(format!("Invalid id '{}': {}", raw, e)))
}

fn unexpected(e: sqlx::Error) -> PortError {
    PortError::Unexpected(e.to_string())
}

//=========================================================================================
// `ActivityStore` Trait Implementation
//=========================================================================================

#[async_trait]
impl ActivityStore for SqliteActivityStore {
    async fn append_mood(&self, entry: MoodEntry) -> PortResult<()> {
        let _guard = self.append_lock.lock().await;

        let last: Option<DateTime<Utc>> =
            sqlx::query_scalar("SELECT timestamp FROM mood_entries ORDER BY seq DESC LIMIT 1")
                .fetch_optional(&self.pool)
                .await
                .map_err(unexpected)?;
        ensure_in_order(last, entry.timestamp)?;

        let tags = serde_json::to_string(&entry.tags)
            .map_err(|e| PortError::Unexpected(e.to_string()))?;
        sqlx::query(
            "INSERT INTO mood_entries (id, timestamp, mood_label, score, tags) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(entry.id.to_string())
        .bind(entry.timestamp)
        .bind(&entry.mood_label)
        .bind(i64::from(entry.score))
        .bind(tags)
        .execute(&self.pool)
        .await
        .map_err(unexpected)?;

        debug!(mood_id = %entry.id, "Stored mood entry");
        Ok(())
    }

    async fn append_chat(&self, event: ChatEvent) -> PortResult<()> {
        let _guard = self.append_lock.lock().await;

        let last: Option<DateTime<Utc>> =
            sqlx::query_scalar("SELECT timestamp FROM chat_events ORDER BY seq DESC LIMIT 1")
                .fetch_optional(&self.pool)
                .await
                .map_err(unexpected)?;
        ensure_in_order(last, event.timestamp)?;

        sqlx::query("INSERT INTO chat_events (id, timestamp, text, kind) VALUES (?, ?, ?, ?)")
            .bind(event.id.to_string())
            .bind(event.timestamp)
            .bind(&event.text)
            .bind(event.kind.as_str())
            .execute(&self.pool)
            .await
            .map_err(unexpected)?;

        debug!(chat_id = %event.id, kind = event.kind.as_str(), "Stored chat event");
        Ok(())
    }

    async fn append_turn(
        &self,
        user_text: String,
        reply_text: String,
    ) -> PortResult<(ChatEvent, ChatEvent)> {
        let _guard = self.append_lock.lock().await;
        let mut tx = self.pool.begin().await.map_err(unexpected)?;

        let last: Option<DateTime<Utc>> =
            sqlx::query_scalar("SELECT timestamp FROM chat_events ORDER BY seq DESC LIMIT 1")
                .fetch_optional(&mut *tx)
                .await
                .map_err(unexpected)?;
        let now = Utc::now();
        ensure_in_order(last, now)?;

        let user = ChatEvent::user_message(user_text, now);
        let reply = ChatEvent::ai_response(reply_text, now);
        for event in [&user, &reply] {
            sqlx::query("INSERT INTO chat_events (id, timestamp, text, kind) VALUES (?, ?, ?, ?)")
                .bind(event.id.to_string())
                .bind(event.timestamp)
                .bind(&event.text)
                .bind(event.kind.as_str())
                .execute(&mut *tx)
                .await
                .map_err(unexpected)?;
        }

        // Dropping `tx` on an early return rolls back the user message.
        tx.commit().await.map_err(unexpected)?;

        debug!(user_id = %user.id, reply_id = %reply.id, "Stored chat turn");
        Ok((user, reply))
    }

    async fn read_all(&self) -> PortResult<ActivitySnapshot> {
        // Both reads share one transaction so they see the same state.
        let mut tx = self.pool.begin().await.map_err(unexpected)?;

        let mood_records = sqlx::query_as::<_, MoodRecord>(
            "SELECT id, timestamp, mood_label, score, tags FROM mood_entries ORDER BY seq ASC",
        )
        .fetch_all(&mut *tx)
        .await
        .map_err(unexpected)?;

        let chat_records = sqlx::query_as::<_, ChatRecord>(
            "SELECT id, timestamp, text, kind FROM chat_events ORDER BY seq ASC",
        )
        .fetch_all(&mut *tx)
        .await
        .map_err(unexpected)?;

        tx.commit().await.map_err(unexpected)?;

        Ok(ActivitySnapshot {
            moods: mood_records
                .into_iter()
                .map(MoodRecord::to_domain)
                .collect::<PortResult<_>>()?,
            chats: chat_records
                .into_iter()
                .map(ChatRecord::to_domain)
                .collect::<PortResult<_>>()?,
        })
    }
}
