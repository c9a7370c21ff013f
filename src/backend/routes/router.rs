/**
 * Router Configuration
 *
 * This module provides the main router creation function that combines
 * the WebSocket endpoint and REST routes into a single Axum router.
 *
 * # Route Order
 *
 * Routes are added in a specific order to ensure proper matching:
 * 1. WebSocket route (upgrade before generic matching)
 * 2. API routes (metrics, rooms, persistence, simulation)
 * 3. Fallback handler (404)
 *
 * # Cross-Origin Policy
 *
 * The CORS layer comes from configuration. A lone `*` origin allows any
 * origin without credentials; explicit origins are allowed with
 * credentials, matching browser rules for credentialed requests.
 */

use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::realtime::websocket_endpoint;
use crate::backend::server::state::AppState;
use axum::http::{HeaderValue, Method, StatusCode};
use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Create the Axum router with all routes configured
///
/// # Arguments
///
/// * `app_state` - Application state containing the hub components
///
/// # Returns
///
/// Configured Axum Router ready to serve requests
pub fn create_router(app_state: AppState) -> Router<()> {
    // Start with the real-time endpoint
    let router = Router::new().route(
        "/api/ws/{room_id}",
        axum::routing::get(websocket_endpoint),
    );

    // Add REST routes
    let router = configure_api_routes(router);

    // Fallback handler for 404
    let router = router.fallback(|| async { (StatusCode::NOT_FOUND, "404 Not Found") });

    let cors = cors_layer(&app_state.config.cors_origins);

    // Use AppState as router state
    router
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

/// Build the CORS layer from the configured origin list
fn cors_layer(origins: &[String]) -> CorsLayer {
    let methods = [Method::GET, Method::POST, Method::PUT, Method::DELETE];

    if origins.iter().any(|origin| origin == "*") {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(methods)
            .allow_headers(Any);
    }

    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| origin.parse::<HeaderValue>().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(parsed))
        .allow_methods(methods)
        .allow_headers([axum::http::header::CONTENT_TYPE])
        .allow_credentials(true)
}
