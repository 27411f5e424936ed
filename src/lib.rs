//! Books Auth - authentication core of the books catalog.
//!
//! Signup, login and logout over a relational user store, with the
//! authenticated identity carried by a server-side session.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: User entity and password hashing
//! - **services**: Auth service and session manager
//! - **infra**: Database, user repository, session stores
//! - **api**: HTTP handlers, middleware, routes and pages
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Run migrations
//! cargo run -- migrate up
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::User;
pub use errors::{AppError, AppResult};
