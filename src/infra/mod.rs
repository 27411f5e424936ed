//! Infrastructure layer - External systems integration
//!
//! - Database connection and migrations
//! - User repository
//! - Session storage (memory or Redis)

pub mod db;
pub mod repositories;
pub mod session_store;

pub use db::{Database, Migrator};
pub use repositories::{UserRepository, UserStore};
pub use session_store::{MemorySessionStore, RedisSessionStore, SessionRecord, SessionStore};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::MockUserRepository;
