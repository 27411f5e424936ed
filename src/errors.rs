//! Centralized error handling.
//!
//! Provides a unified error type for the entire application,
//! with automatic HTTP response conversion.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

use crate::config::{MSG_PASSWORD_MISMATCH, MSG_USERNAME_TAKEN, MSG_USER_NOT_FOUND};

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Authentication outcomes shown on the auth forms
    #[error("That username is taken. Please insert another one.")]
    UsernameTaken,

    #[error("Username does not exist. Please try again.")]
    UserNotFound,

    #[error("Password does not match. Please try again.")]
    PasswordMismatch,

    // Store errors
    #[error("User already exists")]
    DuplicateUser,

    // Validation
    #[error("{0}")]
    Validation(String),

    // External service errors
    #[error("Database error")]
    Database(#[from] sea_orm::DbErr),

    #[error("Session store error")]
    Cache(#[from] redis::RedisError),

    // Internal
    #[error("Internal server error")]
    Internal(String),
}

impl AppError {
    /// Get error code for client
    pub fn code(&self) -> &'static str {
        match self {
            AppError::UsernameTaken => "USERNAME_TAKEN",
            AppError::UserNotFound => "USER_NOT_FOUND",
            AppError::PasswordMismatch => "PASSWORD_MISMATCH",
            AppError::DuplicateUser => "DUPLICATE_USER",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Database(_) => "DATABASE_ERROR",
            AppError::Cache(_) => "SESSION_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Get HTTP status code
    pub fn status(&self) -> StatusCode {
        match self {
            // Auth failures re-render the form, so they are not HTTP errors
            AppError::UsernameTaken | AppError::UserNotFound | AppError::PasswordMismatch => {
                StatusCode::OK
            }
            AppError::DuplicateUser => StatusCode::CONFLICT,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Database(_) | AppError::Cache(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Whether the error is a form-level outcome the user can correct.
    pub fn is_form_error(&self) -> bool {
        matches!(
            self,
            AppError::UsernameTaken
                | AppError::UserNotFound
                | AppError::PasswordMismatch
                | AppError::Validation(_)
        )
    }

    /// Get user-facing message (hides internal details)
    pub fn user_message(&self) -> String {
        match self {
            AppError::UsernameTaken => MSG_USERNAME_TAKEN.to_string(),
            AppError::UserNotFound => MSG_USER_NOT_FOUND.to_string(),
            AppError::PasswordMismatch => MSG_PASSWORD_MISMATCH.to_string(),
            AppError::Validation(msg) => msg.clone(),

            // Hide details for internal errors
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "A database error occurred".to_string()
            }
            AppError::Cache(e) => {
                tracing::error!("Session store error: {:?}", e);
                "A session error occurred".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }

            _ => self.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = crate::api::views::error_page(self.code(), &self.user_message());

        (status, Html(body)).into_response()
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Convenience constructors
impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_messages_are_literal() {
        assert_eq!(
            AppError::UsernameTaken.to_string(),
            "That username is taken. Please insert another one."
        );
        assert_eq!(
            AppError::UserNotFound.to_string(),
            "Username does not exist. Please try again."
        );
        assert_eq!(
            AppError::PasswordMismatch.to_string(),
            "Password does not match. Please try again."
        );
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(AppError::UserNotFound.status(), StatusCode::OK);
        assert_eq!(AppError::DuplicateUser.status(), StatusCode::CONFLICT);
        assert_eq!(AppError::validation("bad").status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::internal("boom").status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_internal_message_is_hidden() {
        let err = AppError::internal("connection string leaked");
        assert_eq!(err.user_message(), "An internal error occurred");
    }

    #[test]
    fn test_form_errors() {
        assert!(AppError::UsernameTaken.is_form_error());
        assert!(AppError::validation("short").is_form_error());
        assert!(!AppError::DuplicateUser.is_form_error());
        assert!(!AppError::internal("x").is_form_error());
    }
}
