//! User repository implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, Set, SqlErr,
};

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use crate::domain::User;
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by username
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// Create a new user.
    ///
    /// Fails with [`AppError::DuplicateUser`] if the username is already stored.
    async fn create(&self, username: String, password_hash: String) -> AppResult<User>;

    /// Count stored users
    async fn count(&self) -> AppResult<u64>;
}

/// Concrete implementation of UserRepository
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn create(&self, username: String, password_hash: String) -> AppResult<User> {
        let active_model = ActiveModel {
            username: Set(username),
            password_hash: Set(password_hash),
            created_at: Set(chrono::Utc::now()),
            ..Default::default()
        };

        let model = active_model.insert(&self.db).await.map_err(map_insert_error)?;
        Ok(User::from(model))
    }

    async fn count(&self) -> AppResult<u64> {
        UserEntity::find()
            .count(&self.db)
            .await
            .map_err(AppError::from)
    }
}

/// The UNIQUE constraint on `users.username` is the source of truth for
/// duplicates, so a violation surfaces as `DuplicateUser`.
fn map_insert_error(err: DbErr) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => AppError::DuplicateUser,
        _ => AppError::from(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::Database;

    async fn store() -> UserStore {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        UserStore::new(db.get_connection())
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let store = store().await;
        let created = store
            .create("omarlopez".to_string(), "hash".to_string())
            .await
            .unwrap();

        let found = store.find_by_username("omarlopez").await.unwrap().unwrap();
        assert_eq!(found.id, created.id);
        assert_eq!(found.password_hash, "hash");
    }

    #[tokio::test]
    async fn test_find_missing_user() {
        let store = store().await;
        assert!(store.find_by_username("notuser").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_username_is_rejected() {
        let store = store().await;
        store
            .create("omarlopez".to_string(), "first".to_string())
            .await
            .unwrap();

        let err = store
            .create("omarlopez".to_string(), "second".to_string())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::DuplicateUser));
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_usernames_are_case_sensitive() {
        let store = store().await;
        store.create("me1".to_string(), "h".to_string()).await.unwrap();

        assert!(store.find_by_username("ME1").await.unwrap().is_none());
    }
}
