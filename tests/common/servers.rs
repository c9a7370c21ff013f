//! Test server construction helpers
//!
//! Builders for REST-only and WebSocket-capable test servers, plus a
//! config helper for an on-disk SQLite snapshot store.

use axum_test::TestServer;
use concurrencypad::backend::server::config::ServerConfig;
use concurrencypad::backend::server::init::create_app;

/// REST-only test server (mock transport)
pub async fn rest_server(config: ServerConfig) -> TestServer {
    let app = create_app(config).await;
    TestServer::new(app).unwrap()
}

/// Test server on a real HTTP transport, required for WebSocket upgrades
pub async fn ws_server(config: ServerConfig) -> TestServer {
    let app = create_app(config).await;
    TestServer::builder().http_transport().build(app).unwrap()
}

/// Config pointing the snapshot gateway at a SQLite file inside `dir`
pub fn sqlite_config(dir: &tempfile::TempDir) -> ServerConfig {
    let path = dir.path().join("snapshots.db");
    ServerConfig {
        database_url: Some(format!("sqlite://{}?mode=rwc", path.display())),
        ..ServerConfig::default()
    }
}
