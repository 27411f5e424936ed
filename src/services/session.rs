//! Session manager - Tracks the authenticated user of each client.
//!
//! The client holds only an opaque session id in an HTTP-only cookie.
//! A [`SessionContext`] is built per request from that cookie, mutated by
//! the auth service, and written back into the response cookie jar.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use std::sync::Arc;
use uuid::Uuid;

use crate::config::Config;
use crate::errors::AppResult;
use crate::infra::{SessionRecord, SessionStore};

/// Cookie and lifetime settings for sessions
#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub cookie_name: String,
    pub ttl_seconds: u64,
    pub secure: bool,
}

impl From<&Config> for SessionSettings {
    fn from(config: &Config) -> Self {
        Self {
            cookie_name: config.session_cookie_name.clone(),
            ttl_seconds: config.session_ttl_seconds,
            secure: config.session_cookie_secure,
        }
    }
}

/// Pending change to the client's session cookie
#[derive(Debug, Clone, PartialEq, Eq)]
enum CookieChange {
    Set(String),
    Remove,
}

/// Per-request view of one client's session.
pub struct SessionContext {
    store: Arc<dyn SessionStore>,
    ttl_seconds: u64,
    session_id: Option<String>,
    change: Option<CookieChange>,
}

impl SessionContext {
    /// Create a context for a client presenting `session_id` (or none).
    pub fn new(store: Arc<dyn SessionStore>, ttl_seconds: u64, session_id: Option<String>) -> Self {
        Self {
            store,
            ttl_seconds,
            session_id,
            change: None,
        }
    }

    /// Mark the client as authenticated as `username`.
    ///
    /// A fresh id is always issued; any id the client presented is dropped.
    pub async fn establish(&mut self, username: &str) -> AppResult<()> {
        if let Some(old) = self.session_id.take() {
            self.store.remove(&old).await?;
        }

        let id = Uuid::new_v4().simple().to_string();
        self.store
            .insert(&id, &SessionRecord::new(username), self.ttl_seconds)
            .await?;

        self.session_id = Some(id.clone());
        self.change = Some(CookieChange::Set(id));
        Ok(())
    }

    /// Mark the client as anonymous.
    pub async fn clear(&mut self) -> AppResult<()> {
        if let Some(id) = self.session_id.take() {
            self.store.remove(&id).await?;
        }
        self.change = Some(CookieChange::Remove);
        Ok(())
    }

    /// The username the client is authenticated as, if any.
    pub async fn current(&self) -> AppResult<Option<String>> {
        match &self.session_id {
            Some(id) => Ok(self.store.get(id).await?.map(|record| record.username)),
            None => Ok(None),
        }
    }

    /// The session id the client will hold after this request.
    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }
}

/// Builds session contexts from cookies and writes them back.
#[derive(Clone)]
pub struct SessionManager {
    store: Arc<dyn SessionStore>,
    settings: SessionSettings,
}

impl SessionManager {
    pub fn new(store: Arc<dyn SessionStore>, settings: SessionSettings) -> Self {
        Self { store, settings }
    }

    /// Open the session context for the client that sent `jar`.
    pub fn context(&self, jar: &CookieJar) -> SessionContext {
        let session_id = jar
            .get(&self.settings.cookie_name)
            .map(|cookie| cookie.value().to_string())
            .filter(|value| !value.is_empty());

        SessionContext::new(self.store.clone(), self.settings.ttl_seconds, session_id)
    }

    /// Resolve the current username straight from the cookie jar.
    pub async fn current(&self, jar: &CookieJar) -> AppResult<Option<String>> {
        self.context(jar).current().await
    }

    /// Apply whatever the context changed to the response cookies.
    pub fn finish(&self, context: SessionContext, jar: CookieJar) -> CookieJar {
        match context.change {
            Some(CookieChange::Set(id)) => jar.add(self.session_cookie(id)),
            Some(CookieChange::Remove) => jar.remove(self.session_cookie(String::new())),
            None => jar,
        }
    }

    fn session_cookie(&self, value: String) -> Cookie<'static> {
        Cookie::build((self.settings.cookie_name.clone(), value))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.settings.secure)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::MemorySessionStore;

    fn manager() -> (Arc<MemorySessionStore>, SessionManager) {
        let store = Arc::new(MemorySessionStore::new());
        let settings = SessionSettings {
            cookie_name: "session".to_string(),
            ttl_seconds: 60,
            secure: false,
        };
        (store.clone(), SessionManager::new(store, settings))
    }

    #[tokio::test]
    async fn test_anonymous_by_default() {
        let (_, manager) = manager();
        let context = manager.context(&CookieJar::new());

        assert!(context.session_id().is_none());
        assert!(context.current().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_establish_sets_cookie() {
        let (_, manager) = manager();
        let mut context = manager.context(&CookieJar::new());
        context.establish("omarlopez").await.unwrap();

        assert_eq!(context.current().await.unwrap().as_deref(), Some("omarlopez"));

        let id = context.session_id().unwrap().to_string();
        let jar = manager.finish(context, CookieJar::new());
        let cookie = jar.get("session").unwrap();
        assert_eq!(cookie.value(), id);
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.path(), Some("/"));
    }

    #[tokio::test]
    async fn test_cookie_round_trip_resolves_user() {
        let (_, manager) = manager();
        let mut context = manager.context(&CookieJar::new());
        context.establish("omarlopez").await.unwrap();
        let jar = manager.finish(context, CookieJar::new());

        assert_eq!(
            manager.current(&jar).await.unwrap().as_deref(),
            Some("omarlopez")
        );
    }

    #[tokio::test]
    async fn test_establish_rotates_existing_session() {
        let (store, manager) = manager();
        let mut context = manager.context(&CookieJar::new());
        context.establish("omarlopez").await.unwrap();
        let first = context.session_id().unwrap().to_string();

        context.establish("omarlopez").await.unwrap();
        let second = context.session_id().unwrap().to_string();

        assert_ne!(first, second);
        assert!(store.get(&first).await.unwrap().is_none());
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_clear_removes_record_and_cookie() {
        let (store, manager) = manager();
        let mut context = manager.context(&CookieJar::new());
        context.establish("omarlopez").await.unwrap();
        let jar = manager.finish(context, CookieJar::new());

        let mut context = manager.context(&jar);
        context.clear().await.unwrap();
        assert!(context.current().await.unwrap().is_none());
        assert!(store.is_empty().await);

        let jar = manager.finish(context, jar);
        assert!(jar.get("session").is_none());
    }

    #[tokio::test]
    async fn test_unknown_cookie_is_anonymous() {
        let (_, manager) = manager();
        let jar = CookieJar::new().add(Cookie::new("session", "forged"));

        assert!(manager.current(&jar).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_untouched_context_leaves_jar_alone() {
        let (_, manager) = manager();
        let context = manager.context(&CookieJar::new());
        let jar = manager.finish(context, CookieJar::new());

        assert!(jar.get("session").is_none());
    }
}
