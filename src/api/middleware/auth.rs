//! Session authentication middleware.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;

use crate::api::AppState;
use crate::config::ROUTE_LOGIN;
use crate::errors::AppError;

/// Authenticated user resolved from the session cookie
#[derive(Clone, Debug)]
pub struct CurrentUser {
    pub username: String,
}

/// Session middleware.
///
/// Resolves the session cookie and, when it belongs to a live session,
/// injects the CurrentUser into the request extensions.
pub async fn session_middleware(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if let Some(username) = state.sessions.current(&jar).await? {
        request.extensions_mut().insert(CurrentUser { username });
    }

    Ok(next.run(request).await)
}

/// Require an authenticated session, redirecting anonymous clients to the login page.
pub async fn require_auth(request: Request, next: Next) -> Response {
    if request.extensions().get::<CurrentUser>().is_some() {
        next.run(request).await
    } else {
        tracing::debug!(path = %request.uri().path(), "Anonymous request redirected to login");
        Redirect::to(ROUTE_LOGIN).into_response()
    }
}
