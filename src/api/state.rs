//! Application state - Dependency injection container.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::{Database, SessionStore, UserStore};
use crate::services::{AuthService, Authenticator, SessionManager, SessionSettings};

/// Application state shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Authentication service
    pub auth_service: Arc<dyn AuthService>,
    /// Session cookie handling and storage
    pub sessions: SessionManager,
    /// Database connection
    pub database: Arc<Database>,
}

impl AppState {
    /// Wire the default services over a database and a session store.
    pub fn from_config(
        database: Arc<Database>,
        session_store: Arc<dyn SessionStore>,
        config: &Config,
    ) -> Self {
        let users = Arc::new(UserStore::new(database.get_connection()));
        let auth_service = Arc::new(Authenticator::new(users));
        let sessions = SessionManager::new(session_store, SessionSettings::from(config));

        Self::new(auth_service, sessions, database)
    }

    /// Create new application state with manually injected services.
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        sessions: SessionManager,
        database: Arc<Database>,
    ) -> Self {
        Self {
            auth_service,
            sessions,
            database,
        }
    }
}
