/**
 * API Route Handlers
 *
 * This module wires the REST surface onto the router and hosts the two
 * trivial handlers (banner, health) that have no component of their own.
 *
 * # Routes
 *
 * ## Service
 * - `GET /api/` - API banner
 * - `GET /api/health` - Liveness probe
 *
 * ## Metrics
 * - `GET /api/metrics` - Aggregate stats snapshot
 * - `GET /api/metrics/events` - Recent lifecycle events
 *
 * ## Rooms
 * - `GET /api/rooms` - Room directory
 * - `GET /api/rooms/{room_id}` - Single-room view
 * - `GET /api/rooms/{room_id}/users` - Presence list
 * - `POST /api/rooms/{room_id}/persist` - Persist the snapshot
 * - `GET /api/rooms/{room_id}/load` - Load a persisted snapshot
 *
 * ## Simulation
 * - `POST /api/simulate/users/{room_id}` - Inject synthetic users
 * - `DELETE /api/simulate/users/{room_id}` - Remove synthetic users
 */

use crate::backend::metrics::handlers::{get_metric_events, get_metrics};
use crate::backend::rooms::handlers::{
    get_room, get_room_users, list_rooms, load_room, persist_room, remove_simulated_users,
    simulate_users,
};
use crate::backend::server::state::AppState;
use axum::{Json, Router};
use chrono::Utc;
use serde_json::{json, Value};

/// Handle `GET /api/` and `GET /api`
async fn api_banner() -> Json<Value> {
    Json(json!({
        "message": "ConcurrencyPad - Real-time Collaborative Editor API"
    }))
}

/// Handle `GET /api/health`
async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

/// Configure REST routes
///
/// Every view endpoint answers 200 regardless of whether the room has ever
/// been seen; unknown rooms look empty rather than missing.
///
/// # Arguments
///
/// * `router` - The router to add routes to
///
/// # Returns
///
/// Router with API routes configured
pub fn configure_api_routes(router: Router<AppState>) -> Router<AppState> {
    router
        // Service endpoints
        .route("/api", axum::routing::get(api_banner))
        .route("/api/", axum::routing::get(api_banner))
        .route("/api/health", axum::routing::get(health_check))
        // Metrics endpoints
        .route("/api/metrics", axum::routing::get(get_metrics))
        .route("/api/metrics/events", axum::routing::get(get_metric_events))
        // Room directory endpoints
        .route("/api/rooms", axum::routing::get(list_rooms))
        .route("/api/rooms/{room_id}", axum::routing::get(get_room))
        .route(
            "/api/rooms/{room_id}/users",
            axum::routing::get(get_room_users),
        )
        // Snapshot persistence endpoints
        .route(
            "/api/rooms/{room_id}/persist",
            axum::routing::post(persist_room),
        )
        .route("/api/rooms/{room_id}/load", axum::routing::get(load_room))
        // Load-simulation endpoints
        .route(
            "/api/simulate/users/{room_id}",
            axum::routing::post(simulate_users).delete(remove_simulated_users),
        )
}
