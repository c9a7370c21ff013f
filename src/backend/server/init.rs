/**
 * Server Initialization
 *
 * Builds a ready-to-serve application from configuration: connects the
 * persistence gateway (when configured), wires the component graph, and
 * hands the state to the router.
 */

use crate::backend::routes::create_router;
use crate::backend::server::config::{load_gateway, ServerConfig};
use crate::backend::server::state::AppState;
use axum::Router;
use std::sync::Arc;

/// Create the application router from configuration
pub async fn create_app(config: ServerConfig) -> Router {
    let config = Arc::new(config);
    let gateway = load_gateway(&config).await;
    let state = AppState::new(config, gateway);
    create_router(state)
}
