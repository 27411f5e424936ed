//! Custom request extractors.

mod current_user;
mod form;

pub use current_user::MaybeUser;
pub use form::{validation_message, AppForm};
