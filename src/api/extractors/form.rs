//! Form extractor - Decodes url-encoded bodies into the application error type.
//!
//! Field rules are checked by the handlers, which re-render their form on a
//! violation. Only bodies that cannot be decoded at all are rejected here.

use axum::{
    async_trait,
    extract::{rejection::FormRejection, FromRequest, Request},
    Form,
};
use serde::de::DeserializeOwned;
use validator::ValidationErrors;

use crate::errors::AppError;

/// Decoded form body.
///
/// # Example
///
/// ```rust,ignore
/// use serde::Deserialize;
/// use validator::Validate;
/// use books_auth::api::extractors::{validation_message, AppForm};
///
/// #[derive(Deserialize, Validate)]
/// struct SignupForm {
///     #[validate(length(min = 3))]
///     username: String,
/// }
///
/// async fn signup(AppForm(form): AppForm<SignupForm>) {
///     if let Err(errors) = form.validate() {
///         let message = validation_message(&errors);
///         // render the form again with `message`
///     }
/// }
/// ```
pub struct AppForm<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for AppForm<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
    Form<T>: FromRequest<S, Rejection = FormRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Form(value) = Form::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::validation(e.body_text()))?;

        Ok(AppForm(value))
    }
}

/// Format validation errors into a user-friendly string
pub fn validation_message(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field))
            })
        })
        .collect();
    // HashMap order is unstable
    messages.sort();
    messages.join(", ")
}
