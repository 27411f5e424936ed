//! Authentication handlers.
//!
//! Auth failures are not HTTP errors: the form is rendered again with the
//! failure message.

use axum::{
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Router,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use validator::Validate;

use crate::api::extractors::{validation_message, AppForm, MaybeUser};
use crate::api::{views, AppState};
use crate::config::{ROUTE_HOME, ROUTE_LOGIN, ROUTE_SIGNUP};
use crate::errors::{AppError, AppResult};

/// Signup form; the rules apply to new accounts only
#[derive(Debug, Deserialize, Validate)]
pub struct SignupForm {
    #[validate(length(min = 3, max = 80, message = "Username must be between 3 and 80 characters"))]
    pub username: String,
    #[validate(length(min = 1, max = 200, message = "Password must be between 1 and 200 characters"))]
    pub password: String,
}

/// Login form. Any values are checked against the user store as given.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Create authentication routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route(ROUTE_SIGNUP, get(signup_form).post(signup))
        .route(ROUTE_LOGIN, get(login_form).post(login))
        .route("/logout", post(logout))
}

/// Show the signup form
pub async fn signup_form(user: MaybeUser) -> Html<String> {
    Html(views::signup_page(user.username(), None, ""))
}

/// Register a new user, then send them to the login page
pub async fn signup(
    State(state): State<AppState>,
    user: MaybeUser,
    AppForm(form): AppForm<SignupForm>,
) -> AppResult<Response> {
    let result = match form.validate() {
        Ok(()) => state
            .auth_service
            .signup(form.username.clone(), form.password)
            .await
            .map(|_| ()),
        Err(errors) => Err(AppError::validation(validation_message(&errors))),
    };

    match result {
        Ok(()) => Ok(Redirect::to(ROUTE_LOGIN).into_response()),
        Err(e) if e.is_form_error() => {
            let message = e.user_message();
            let page = views::signup_page(user.username(), Some(message.as_str()), &form.username);
            Ok((e.status(), Html(page)).into_response())
        }
        Err(e) => Err(e),
    }
}

/// Show the login form
pub async fn login_form(user: MaybeUser) -> Html<String> {
    Html(views::login_page(user.username(), None, ""))
}

/// Check credentials and start a session
pub async fn login(
    State(state): State<AppState>,
    user: MaybeUser,
    jar: CookieJar,
    AppForm(form): AppForm<LoginForm>,
) -> AppResult<Response> {
    let mut session = state.sessions.context(&jar);

    match state
        .auth_service
        .login(&mut session, form.username.clone(), form.password)
        .await
    {
        Ok(_) => {
            let jar = state.sessions.finish(session, jar);
            Ok((jar, Redirect::to(ROUTE_HOME)).into_response())
        }
        Err(e) if e.is_form_error() => {
            let message = e.user_message();
            let page = views::login_page(user.username(), Some(message.as_str()), &form.username);
            Ok((e.status(), Html(page)).into_response())
        }
        Err(e) => Err(e),
    }
}

/// End the session and return to the homepage
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> AppResult<Response> {
    let mut session = state.sessions.context(&jar);
    state.auth_service.logout(&mut session).await?;

    let jar = state.sessions.finish(session, jar);
    Ok((jar, Redirect::to(ROUTE_HOME)).into_response())
}
