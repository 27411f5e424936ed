//! Application route configuration.

use axum::{middleware, routing::get, Router};
use tower_http::trace::TraceLayer;

use super::handlers::auth_routes;
use super::handlers::home_handler::{account, health, home};
use super::middleware::{require_auth, session_middleware};
use super::AppState;

/// Create the application router with all routes configured
pub fn create_router(state: AppState) -> Router {
    // Pages that need a logged-in user
    let protected = Router::new()
        .route("/account", get(account))
        .route_layer(middleware::from_fn(require_auth));

    Router::new()
        .route("/", get(home))
        .route("/health", get(health))
        .merge(auth_routes())
        .merge(protected)
        // Every request gets its session resolved before routing
        .layer(middleware::from_fn_with_state(
            state.clone(),
            session_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
