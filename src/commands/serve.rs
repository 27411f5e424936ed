//! Serve command - Starts the HTTP server.

use std::sync::Arc;

use crate::api::{create_router, AppState};
use crate::cli::args::ServeArgs;
use crate::config::{Config, SessionBackend};
use crate::errors::{AppError, AppResult};
use crate::infra::{Database, MemorySessionStore, RedisSessionStore, SessionStore};

/// Execute the serve command
pub async fn execute(args: ServeArgs, mut config: Config) -> AppResult<()> {
    tracing::info!("Starting server...");

    if let Some(host) = args.host {
        config.server_host = host;
    }
    if let Some(port) = args.port {
        config.server_port = port;
    }

    let db = Arc::new(Database::connect(&config.database_url).await?);

    let session_store: Arc<dyn SessionStore> = match config.session_backend {
        SessionBackend::Memory => {
            tracing::info!("Using in-memory session store");
            Arc::new(MemorySessionStore::new())
        }
        SessionBackend::Redis => Arc::new(RedisSessionStore::connect(&config.redis_url).await?),
    };

    let app_state = AppState::from_config(db, session_store, &config);
    let app = create_router(app_state);

    let addr = config.server_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind to {}: {}", addr, e)))?;

    tracing::info!("Server running on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    Ok(())
}
