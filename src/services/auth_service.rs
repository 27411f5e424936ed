//! Authentication service - Signup, login and logout decisions.
//!
//! The service owns no session state itself: each call receives the
//! caller's [`SessionContext`] and asks it to establish or clear identity.

use async_trait::async_trait;
use std::sync::Arc;

use super::SessionContext;
use crate::domain::{password, User};
use crate::errors::{AppError, AppResult};
use crate::infra::UserRepository;

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new user
    async fn signup(&self, username: String, password: String) -> AppResult<User>;

    /// Check credentials and, on success, authenticate the session
    async fn login(
        &self,
        session: &mut SessionContext,
        username: String,
        password: String,
    ) -> AppResult<User>;

    /// Make the session anonymous again
    async fn logout(&self, session: &mut SessionContext) -> AppResult<()>;
}

/// Concrete implementation of AuthService backed by a user repository.
pub struct Authenticator {
    users: Arc<dyn UserRepository>,
}

impl Authenticator {
    /// Create new auth service instance
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl AuthService for Authenticator {
    async fn signup(&self, username: String, password: String) -> AppResult<User> {
        if self.users.find_by_username(&username).await?.is_some() {
            tracing::info!(%username, "Signup rejected: username taken");
            return Err(AppError::UsernameTaken);
        }

        let password_hash = password::hash(&password)?;

        // A concurrent signup can still win between the lookup and the insert
        let user = match self.users.create(username, password_hash).await {
            Err(AppError::DuplicateUser) => return Err(AppError::UsernameTaken),
            other => other?,
        };

        tracing::info!(username = %user.username, "User signed up");
        Ok(user)
    }

    async fn login(
        &self,
        session: &mut SessionContext,
        username: String,
        password: String,
    ) -> AppResult<User> {
        let user = match self.users.find_by_username(&username).await? {
            Some(user) => user,
            None => {
                tracing::warn!(%username, "Login rejected: unknown username");
                return Err(AppError::UserNotFound);
            }
        };

        if !user.check_password(&password) {
            tracing::warn!(%username, "Login rejected: wrong password");
            return Err(AppError::PasswordMismatch);
        }

        session.establish(&user.username).await?;
        tracing::info!(username = %user.username, "User logged in");

        Ok(user)
    }

    async fn logout(&self, session: &mut SessionContext) -> AppResult<()> {
        // The session is cleared even when the lookup fails
        if let Ok(Some(username)) = session.current().await {
            tracing::info!(%username, "User logged out");
        }
        session.clear().await
    }
}
