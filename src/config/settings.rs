//! Application settings loaded from environment variables.

use std::env;

use super::constants::{
    DEFAULT_DATABASE_URL, DEFAULT_REDIS_URL, DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT,
    DEFAULT_SESSION_COOKIE_NAME, DEFAULT_SESSION_TTL_SECONDS, SESSION_BACKEND_MEMORY,
    SESSION_BACKEND_REDIS,
};

/// Where session records are kept
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionBackend {
    Memory,
    Redis,
}

impl SessionBackend {
    /// Parse a backend name, falling back to in-memory storage.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            SESSION_BACKEND_REDIS => SessionBackend::Redis,
            SESSION_BACKEND_MEMORY => SessionBackend::Memory,
            other => {
                tracing::warn!("Unknown SESSION_BACKEND '{}', using memory", other);
                SessionBackend::Memory
            }
        }
    }
}

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub redis_url: String,
    pub session_backend: SessionBackend,
    pub session_ttl_seconds: u64,
    pub session_cookie_name: String,
    pub session_cookie_secure: bool,
    pub server_host: String,
    pub server_port: u16,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("redis_url", &"[REDACTED]")
            .field("session_backend", &self.session_backend)
            .field("session_ttl_seconds", &self.session_ttl_seconds)
            .field("session_cookie_name", &self.session_cookie_name)
            .field("session_cookie_secure", &self.session_cookie_secure)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            redis_url: DEFAULT_REDIS_URL.to_string(),
            session_backend: SessionBackend::Memory,
            session_ttl_seconds: DEFAULT_SESSION_TTL_SECONDS,
            session_cookie_name: DEFAULT_SESSION_COOKIE_NAME.to_string(),
            session_cookie_secure: false,
            server_host: DEFAULT_SERVER_HOST.to_string(),
            server_port: DEFAULT_SERVER_PORT,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Missing or unparsable values fall back to the defaults in
    /// [`crate::config`] constants.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            redis_url: env::var("REDIS_URL")
                .unwrap_or_else(|_| DEFAULT_REDIS_URL.to_string()),
            session_backend: env::var("SESSION_BACKEND")
                .map(|v| SessionBackend::parse(&v))
                .unwrap_or(SessionBackend::Memory),
            session_ttl_seconds: env::var("SESSION_TTL_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_SESSION_TTL_SECONDS),
            session_cookie_name: env::var("SESSION_COOKIE_NAME")
                .unwrap_or_else(|_| DEFAULT_SESSION_COOKIE_NAME.to_string()),
            session_cookie_secure: env::var("SESSION_COOKIE_SECURE")
                .ok()
                .map(|v| parse_bool(&v))
                .unwrap_or(false),
            server_host: env::var("SERVER_HOST")
                .unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_SERVER_PORT),
        }
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn parse_bool(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
