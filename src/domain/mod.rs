//! Domain layer - Core business entities and logic
//!
//! Contains the user entity and the password hashing functions.
//! Nothing here touches the database or HTTP.

pub mod password;
pub mod user;

pub use user::User;
