//! Application-wide constants
//!
//! Centralized location for magic values to improve maintainability.

// =============================================================================
// Authentication messages
// =============================================================================

/// Shown when signup is attempted with a username that already exists
pub const MSG_USERNAME_TAKEN: &str = "That username is taken. Please insert another one.";

/// Shown when login is attempted with an unknown username
pub const MSG_USER_NOT_FOUND: &str = "Username does not exist. Please try again.";

/// Shown when login is attempted with a wrong password
pub const MSG_PASSWORD_MISMATCH: &str = "Password does not match. Please try again.";

// =============================================================================
// Sessions
// =============================================================================

/// Default session lifetime in seconds (1 day)
pub const DEFAULT_SESSION_TTL_SECONDS: u64 = 86_400;

/// Default name of the session cookie
pub const DEFAULT_SESSION_COOKIE_NAME: &str = "session";

/// Key prefix for session records in Redis
pub const CACHE_PREFIX_SESSION: &str = "session:";

/// Session backend keeping records in process memory
pub const SESSION_BACKEND_MEMORY: &str = "memory";

/// Session backend keeping records in Redis
pub const SESSION_BACKEND_REDIS: &str = "redis";

// =============================================================================
// Routes
// =============================================================================

/// Homepage path
pub const ROUTE_HOME: &str = "/";

/// Login page path
pub const ROUTE_LOGIN: &str = "/login";

/// Signup page path
pub const ROUTE_SIGNUP: &str = "/signup";

// =============================================================================
// Server Configuration
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 3000;

// =============================================================================
// Database & Cache
// =============================================================================

/// Default database connection URL (for development)
pub const DEFAULT_DATABASE_URL: &str = "sqlite://books.db?mode=rwc";

/// Default Redis URL (for development)
pub const DEFAULT_REDIS_URL: &str = "redis://127.0.0.1:6379";
