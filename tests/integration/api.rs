//! REST API integration tests
//!
//! Covers the service endpoints, the room directory, snapshot
//! persistence, and the load-simulation interface.

use crate::common::servers::{rest_server, sqlite_config};
use axum_test::TestServer;
use concurrencypad::backend::server::config::ServerConfig;
use serde_json::Value;

async fn default_server() -> TestServer {
    rest_server(ServerConfig::default()).await
}

#[tokio::test]
async fn test_api_banner() {
    let server = default_server().await;
    let response = server.get("/api").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(
        body["message"],
        "ConcurrencyPad - Real-time Collaborative Editor API"
    );
}

#[tokio::test]
async fn test_health_check_reports_healthy() {
    let server = default_server().await;
    let response = server.get("/api/health").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert!(body["timestamp"].as_str().is_some());
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let server = default_server().await;
    let response = server.get("/api/nope").await;
    response.assert_status_not_found();
}

#[tokio::test]
async fn test_metrics_snapshot_shape() {
    let server = default_server().await;
    let response = server.get("/api/metrics").await;
    response.assert_status_ok();
    let body: Value = response.json();

    for field in [
        "active_connections",
        "messages_per_sec",
        "p50_latency_ms",
        "p95_latency_ms",
        "error_count",
        "reconnect_count",
        "total_doc_size_bytes",
        "uptime_seconds",
        "total_messages",
        "rooms_active",
    ] {
        assert!(body.get(field).is_some(), "missing field {field}");
    }
    assert_eq!(body["active_connections"], 0);
    assert_eq!(body["rooms_active"], 0);
}

#[tokio::test]
async fn test_metric_events_respect_limit() {
    let server = default_server().await;

    // Simulation is the easiest way to generate events through the API
    server
        .post("/api/simulate/users/demo")
        .add_query_param("count", 8)
        .await;

    let response = server
        .get("/api/metrics/events")
        .add_query_param("limit", 3)
        .await;
    response.assert_status_ok();
    let events: Vec<Value> = response.json();
    assert_eq!(events.len(), 3);
    assert_eq!(events[2]["type"], "simulate");
}

#[tokio::test]
async fn test_unknown_room_looks_empty_not_missing() {
    let server = default_server().await;

    let response = server.get("/api/rooms/never-seen").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["id"], "never-seen");
    assert_eq!(body["user_count"], 0);
    assert_eq!(body["doc_size"], 0);
    assert_eq!(body["users"], Value::Array(vec![]));

    let response = server.get("/api/rooms/never-seen/users").await;
    response.assert_status_ok();
    let users: Vec<Value> = response.json();
    assert!(users.is_empty());
}

#[tokio::test]
async fn test_room_directory_starts_empty() {
    let server = default_server().await;
    let response = server.get("/api/rooms").await;
    response.assert_status_ok();
    let rooms: Vec<Value> = response.json();
    assert!(rooms.is_empty());
}

#[tokio::test]
async fn test_persist_without_document_is_structured_failure() {
    let dir = tempfile::tempdir().unwrap();
    let server = rest_server(sqlite_config(&dir)).await;

    let response = server.post("/api/rooms/empty-room/persist").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "No document found");
}

#[tokio::test]
async fn test_load_missing_record_is_structured_failure() {
    let dir = tempfile::tempdir().unwrap();
    let server = rest_server(sqlite_config(&dir)).await;

    let response = server.get("/api/rooms/nothing-saved/load").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "No persisted document found");
}

#[tokio::test]
async fn test_simulate_then_remove_users() {
    let server = default_server().await;

    let response = server
        .post("/api/simulate/users/demo")
        .add_query_param("count", 5)
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["simulated_users"], 5);
    assert_eq!(body["total_users"], 5);

    let response = server.get("/api/rooms/demo/users").await;
    let users: Vec<Value> = response.json();
    assert_eq!(users.len(), 5);
    assert_eq!(users[0]["name"], "SimUser-1");
    assert_eq!(users[0]["simulated"], true);
    assert!(users[0]["id"].as_str().unwrap().starts_with("sim-"));

    let response = server.delete("/api/simulate/users/demo").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["removed"], 5);

    let response = server.get("/api/rooms/demo/users").await;
    let users: Vec<Value> = response.json();
    assert!(users.is_empty());
}

#[tokio::test]
async fn test_simulate_count_defaults_to_ten() {
    let server = default_server().await;
    let response = server.post("/api/simulate/users/demo").await;
    let body: Value = response.json();
    assert_eq!(body["simulated_users"], 10);
}
