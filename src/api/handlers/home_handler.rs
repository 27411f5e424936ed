//! Homepage, account page and health check.

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, Json},
    Extension,
};
use serde::Serialize;

use crate::api::extractors::MaybeUser;
use crate::api::middleware::CurrentUser;
use crate::api::{views, AppState};

/// Homepage
pub async fn home(user: MaybeUser) -> Html<String> {
    Html(views::home_page(user.username()))
}

/// Account page (behind `require_auth`)
pub async fn account(Extension(user): Extension<CurrentUser>) -> Html<String> {
    Html(views::account_page(&user.username))
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    services: ServiceHealth,
}

/// Individual service health status
#[derive(Serialize)]
struct ServiceHealth {
    database: ServiceStatus,
}

/// Service status
#[derive(Serialize)]
struct ServiceStatus {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Health check endpoint with database connectivity check
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let database = match state.database.ping().await {
        Ok(_) => ServiceStatus {
            status: "healthy",
            error: None,
        },
        Err(e) => ServiceStatus {
            status: "unhealthy",
            error: Some(e.to_string()),
        },
    };

    let healthy = database.error.is_none();
    let response = HealthResponse {
        status: if healthy { "healthy" } else { "degraded" },
        services: ServiceHealth { database },
    };

    let status_code = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(response))
}
