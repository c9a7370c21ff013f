/**
 * ConcurrencyPad Server Entry Point
 *
 * This is the main entry point for the ConcurrencyPad hub server.
 * It initializes the Axum HTTP server with the room WebSocket endpoint
 * and REST surface.
 */

use concurrencypad::backend::server::config::ServerConfig;
use concurrencypad::backend::server::init::create_app;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file if present
    dotenv::dotenv().ok();

    // Initialize tracing with INFO level by default
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&env_filter))
        .init();

    tracing::info!("[Startup] Server initialization started");

    let config = ServerConfig::from_env();
    let port = config.port;

    // Create the Axum app
    let app = create_app(config).await;

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("[Startup] Starting server on {addr}");

    // Run the server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
