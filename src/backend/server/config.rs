/**
 * Server Configuration
 *
 * This module loads server configuration from environment variables with
 * sensible defaults for local development.
 *
 * # Configuration Sources
 *
 * - `SERVER_PORT` - Listen port (default 3000)
 * - `CORS_ORIGINS` - Comma-separated allowed origins (default `*`)
 * - `DATABASE_URL` - SQLite URL for snapshot persistence (optional)
 * - `SEND_TIMEOUT_MS` - Per-frame outbound send timeout (default 5000)
 * - `UPDATE_MODE` - `append` or `replace` (default `append`)
 *
 * # Error Handling
 *
 * Configuration errors are logged but do not prevent server startup.
 * A missing or unreachable database leaves persistence disabled and the
 * server runs without it.
 */

use crate::backend::persistence::{PersistenceGateway, SqliteGateway};
use crate::backend::rooms::UpdateMode;
use std::sync::Arc;
use std::time::Duration;

/// Runtime configuration for the hub
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Listen port
    pub port: u16,
    /// Allowed CORS origins; `["*"]` means any origin
    pub cors_origins: Vec<String>,
    /// SQLite URL for the snapshot gateway, if configured
    pub database_url: Option<String>,
    /// Upper bound on one outbound socket send
    pub send_timeout: Duration,
    /// Document update contract for this deployment
    pub update_mode: UpdateMode,
}

impl ServerConfig {
    /// Load configuration from the environment
    pub fn from_env() -> Self {
        let port = std::env::var("SERVER_PORT")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(3000);

        let cors_origins = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        let send_timeout_ms = std::env::var("SEND_TIMEOUT_MS")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(5_000);

        let update_mode = match std::env::var("UPDATE_MODE").as_deref() {
            Ok("replace") => UpdateMode::Replace,
            Ok("append") | Err(_) => UpdateMode::Append,
            Ok(other) => {
                tracing::warn!("Unknown UPDATE_MODE '{other}', defaulting to append");
                UpdateMode::Append
            }
        };

        Self {
            port,
            cors_origins,
            database_url: std::env::var("DATABASE_URL").ok(),
            send_timeout: Duration::from_millis(send_timeout_ms),
            update_mode,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            cors_origins: vec!["*".to_string()],
            database_url: None,
            send_timeout: Duration::from_millis(5_000),
            update_mode: UpdateMode::Append,
        }
    }
}

/// Connect the snapshot gateway if a database is configured
///
/// Returns `None` when `DATABASE_URL` is unset or the connection fails;
/// the server runs without persistence in that case.
pub async fn load_gateway(config: &ServerConfig) -> Option<Arc<dyn PersistenceGateway>> {
    let Some(database_url) = config.database_url.as_deref() else {
        tracing::warn!("DATABASE_URL not set. Snapshot persistence will be disabled.");
        return None;
    };

    tracing::info!("Connecting to snapshot store...");
    match SqliteGateway::connect(database_url).await {
        Ok(gateway) => {
            tracing::info!("Snapshot store ready");
            Some(Arc::new(gateway))
        }
        Err(err) => {
            tracing::error!("Failed to open snapshot store: {err}");
            tracing::warn!("Snapshot persistence will be disabled.");
            None
        }
    }
}
