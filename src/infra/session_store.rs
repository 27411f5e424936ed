//! Server-side session storage.
//!
//! A session id (opaque, random) maps to a [`SessionRecord`] until it is
//! removed or its TTL runs out. Two backends: process memory and Redis.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use redis::{aio::ConnectionManager, AsyncCommands, Client};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::config::CACHE_PREFIX_SESSION;
use crate::errors::{AppError, AppResult};

/// What the server remembers about an authenticated client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub username: String,
    pub created_at: DateTime<Utc>,
}

impl SessionRecord {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            created_at: Utc::now(),
        }
    }
}

/// Session storage trait for dependency injection.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Store a record under `session_id` for `ttl_seconds`.
    async fn insert(&self, session_id: &str, record: &SessionRecord, ttl_seconds: u64)
        -> AppResult<()>;

    /// Look up a live record. Expired and unknown ids both yield `None`.
    async fn get(&self, session_id: &str) -> AppResult<Option<SessionRecord>>;

    /// Forget a session. Removing an unknown id is not an error.
    async fn remove(&self, session_id: &str) -> AppResult<()>;
}

// =============================================================================
// In-memory backend
// =============================================================================

struct Entry {
    record: SessionRecord,
    expires_at: DateTime<Utc>,
}

/// Session store kept in process memory.
///
/// Sessions do not survive a restart and are not shared between processes.
#[derive(Default)]
pub struct MemorySessionStore {
    entries: RwLock<HashMap<String, Entry>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries, including expired ones not yet swept.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn insert(
        &self,
        session_id: &str,
        record: &SessionRecord,
        ttl_seconds: u64,
    ) -> AppResult<()> {
        let now = Utc::now();
        let expires_at = i64::try_from(ttl_seconds)
            .ok()
            .and_then(Duration::try_seconds)
            .and_then(|ttl| now.checked_add_signed(ttl))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        let mut entries = self.entries.write().await;
        // Abandoned sessions are never read again, so sweep on every write
        entries.retain(|_, entry| now < entry.expires_at);
        entries.insert(
            session_id.to_string(),
            Entry {
                record: record.clone(),
                expires_at,
            },
        );
        Ok(())
    }

    async fn get(&self, session_id: &str) -> AppResult<Option<SessionRecord>> {
        {
            let entries = self.entries.read().await;
            match entries.get(session_id) {
                None => return Ok(None),
                Some(entry) if Utc::now() < entry.expires_at => {
                    return Ok(Some(entry.record.clone()))
                }
                Some(_) => {}
            }
        }

        // Expired
        self.entries.write().await.remove(session_id);
        Ok(None)
    }

    async fn remove(&self, session_id: &str) -> AppResult<()> {
        self.entries.write().await.remove(session_id);
        Ok(())
    }
}

// =============================================================================
// Redis backend
// =============================================================================

/// Session store backed by Redis, records serialized as JSON under
/// `session:<id>` with a Redis-side expiry.
#[derive(Clone)]
pub struct RedisSessionStore {
    connection: ConnectionManager,
}

impl RedisSessionStore {
    /// Connect to Redis.
    pub async fn connect(redis_url: &str) -> AppResult<Self> {
        let client = Client::open(redis_url)?;
        let connection = ConnectionManager::new(client).await?;

        tracing::info!("Redis session store connected");

        Ok(Self { connection })
    }

    fn key(session_id: &str) -> String {
        format!("{}{}", CACHE_PREFIX_SESSION, session_id)
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn insert(
        &self,
        session_id: &str,
        record: &SessionRecord,
        ttl_seconds: u64,
    ) -> AppResult<()> {
        let mut conn = self.connection.clone();
        let json = serde_json::to_string(record)
            .map_err(|e| AppError::internal(format!("Session serialization error: {}", e)))?;

        conn.set_ex::<_, _, ()>(Self::key(session_id), json, ttl_seconds)
            .await?;
        Ok(())
    }

    async fn get(&self, session_id: &str) -> AppResult<Option<SessionRecord>> {
        let mut conn = self.connection.clone();
        let value: Option<String> = conn.get(Self::key(session_id)).await?;

        match value {
            Some(json) => {
                let record = serde_json::from_str(&json).map_err(|e| {
                    AppError::internal(format!("Session deserialization error: {}", e))
                })?;
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }

    async fn remove(&self, session_id: &str) -> AppResult<()> {
        let mut conn = self.connection.clone();
        let _: () = conn.del(Self::key(session_id)).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_insert_and_get() {
        let store = MemorySessionStore::new();
        let record = SessionRecord::new("omarlopez");
        store.insert("abc", &record, 60).await.unwrap();

        let found = store.get("abc").await.unwrap();
        assert_eq!(found, Some(record));
    }

    #[tokio::test]
    async fn test_unknown_id() {
        let store = MemorySessionStore::new();
        assert!(store.get("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_remove() {
        let store = MemorySessionStore::new();
        store
            .insert("abc", &SessionRecord::new("omarlopez"), 60)
            .await
            .unwrap();

        store.remove("abc").await.unwrap();
        assert!(store.get("abc").await.unwrap().is_none());
        assert!(store.is_empty().await);

        // Removing twice is fine
        store.remove("abc").await.unwrap();
    }

    #[tokio::test]
    async fn test_expired_session_is_evicted() {
        let store = MemorySessionStore::new();
        store
            .insert("abc", &SessionRecord::new("omarlopez"), 0)
            .await
            .unwrap();
        assert_eq!(store.len().await, 1);

        assert!(store.get("abc").await.unwrap().is_none());
        assert_eq!(store.len().await, 0);
    }

    #[tokio::test]
    async fn test_insert_sweeps_abandoned_sessions() {
        let store = MemorySessionStore::new();
        for i in 0..100 {
            store
                .insert(&format!("old-{}", i), &SessionRecord::new("omarlopez"), 0)
                .await
                .unwrap();
        }
        store
            .insert("fresh", &SessionRecord::new("omarlopez"), 60)
            .await
            .unwrap();

        assert_eq!(store.len().await, 1);
        assert!(store.get("fresh").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_huge_ttl_does_not_overflow() {
        let store = MemorySessionStore::new();
        store
            .insert("abc", &SessionRecord::new("omarlopez"), u64::MAX)
            .await
            .unwrap();
        assert!(store.get("abc").await.unwrap().is_some());
    }

    #[test]
    fn test_redis_key_format() {
        assert_eq!(RedisSessionStore::key("abc"), "session:abc");
    }

    #[test]
    fn test_record_json_shape() {
        let record = SessionRecord::new("omarlopez");
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["username"], "omarlopez");
        assert!(json.get("created_at").is_some());
    }
}
