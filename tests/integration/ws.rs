//! WebSocket integration tests
//!
//! Exercises the full connection lifecycle against a live server: initial
//! push, join fan-out, update rebroadcast with sender exclusion, explicit
//! resync, and the REST persistence flow fed by WebSocket updates.

use crate::common::servers::{sqlite_config, ws_server};
use axum_test::{TestServer, TestWebSocket};
use concurrencypad::backend::server::config::ServerConfig;
use serde_json::{json, Value};

async fn connect(server: &TestServer, room: &str, client_id: &str) -> TestWebSocket {
    server
        .get_websocket(&format!("/api/ws/{room}"))
        .add_query_param("client_id", client_id)
        .await
        .into_websocket()
        .await
}

/// Send a join and wait for the sender's own `user_joined` echo, which
/// doubles as the acknowledgement that the join has been processed.
async fn join(ws: &mut TestWebSocket, name: &str) {
    ws.send_json(&json!({"type": "join", "name": name})).await;
    loop {
        let msg: Value = ws.receive_json().await;
        if msg["type"] == "user_joined" && msg["user"]["name"] == name {
            return;
        }
    }
}

#[tokio::test]
async fn test_initial_push_is_users_list() {
    let server = ws_server(ServerConfig::default()).await;
    let mut ws = connect(&server, "fresh", "alice").await;

    // No snapshot exists, so the first frame is the (empty) presence list
    let msg: Value = ws.receive_json().await;
    assert_eq!(msg["type"], "users");
    assert_eq!(msg["users"], Value::Array(vec![]));
}

#[tokio::test]
async fn test_join_is_broadcast_to_everyone() {
    let server = ws_server(ServerConfig::default()).await;
    let mut alice = connect(&server, "demo", "alice").await;
    let _users: Value = alice.receive_json().await;
    join(&mut alice, "Alice").await;

    let mut bob = connect(&server, "demo", "bob").await;
    let users: Value = bob.receive_json().await;
    assert_eq!(users["type"], "users");
    assert_eq!(users["users"][0]["name"], "Alice");

    join(&mut bob, "Bob").await;

    // Alice sees Bob arrive
    let msg: Value = alice.receive_json().await;
    assert_eq!(msg["type"], "user_joined");
    assert_eq!(msg["user"]["id"], "bob");
    assert_eq!(msg["user"]["name"], "Bob");
}

#[tokio::test]
async fn test_update_reaches_peers_but_not_sender() {
    let server = ws_server(ServerConfig::default()).await;
    let mut alice = connect(&server, "demo", "alice").await;
    let _users: Value = alice.receive_json().await;
    join(&mut alice, "Alice").await;

    let mut bob = connect(&server, "demo", "bob").await;
    let _users: Value = bob.receive_json().await;
    join(&mut bob, "Bob").await;
    let _bob_joined: Value = alice.receive_json().await;

    let payload = hex::encode(b"hello");
    alice
        .send_json(&json!({"type": "update", "data": payload}))
        .await;

    let msg: Value = bob.receive_json().await;
    assert_eq!(msg["type"], "update");
    assert_eq!(msg["data"], payload);
    assert_eq!(msg["from"], "alice");

    // The sender's next frame is the pong for this ping, never an echo of
    // its own update.
    alice
        .send_json(&json!({"type": "ping", "timestamp": 7}))
        .await;
    let msg: Value = alice.receive_json().await;
    assert_eq!(msg["type"], "pong");
    assert_eq!(msg["timestamp"], 7);
}

#[tokio::test]
async fn test_sync_request_returns_accumulated_document() {
    let server = ws_server(ServerConfig::default()).await;
    let mut alice = connect(&server, "demo", "alice").await;
    let _users: Value = alice.receive_json().await;
    join(&mut alice, "Alice").await;

    alice
        .send_json(&json!({"type": "update", "data": hex::encode(b"one ")}))
        .await;
    alice
        .send_json(&json!({"type": "update", "data": hex::encode(b"two")}))
        .await;
    alice.send_json(&json!({"type": "sync_request"})).await;

    // Default mode appends, so the snapshot is the concatenation
    let msg: Value = alice.receive_json().await;
    assert_eq!(msg["type"], "sync");
    assert_eq!(msg["data"], hex::encode(b"one two"));
}

#[tokio::test]
async fn test_late_joiner_receives_snapshot_first() {
    let server = ws_server(ServerConfig::default()).await;
    let mut alice = connect(&server, "demo", "alice").await;
    let _users: Value = alice.receive_json().await;
    join(&mut alice, "Alice").await;

    alice
        .send_json(&json!({"type": "update", "data": hex::encode(b"state")}))
        .await;
    // Resync acknowledges the update has been applied
    alice.send_json(&json!({"type": "sync_request"})).await;
    let _sync: Value = alice.receive_json().await;

    let mut bob = connect(&server, "demo", "bob").await;
    let first: Value = bob.receive_json().await;
    assert_eq!(first["type"], "sync");
    assert_eq!(first["data"], hex::encode(b"state"));
    let second: Value = bob.receive_json().await;
    assert_eq!(second["type"], "users");
}

#[tokio::test]
async fn test_malformed_frame_gets_error_reply_and_connection_survives() {
    let server = ws_server(ServerConfig::default()).await;
    let mut alice = connect(&server, "demo", "alice").await;
    let _users: Value = alice.receive_json().await;

    alice.send_text("{definitely not json").await;
    let msg: Value = alice.receive_json().await;
    assert_eq!(msg["type"], "error");
    assert_eq!(msg["message"], "Invalid JSON");

    // Still connected and serviced
    alice
        .send_json(&json!({"type": "ping", "timestamp": 1}))
        .await;
    let msg: Value = alice.receive_json().await;
    assert_eq!(msg["type"], "pong");
}

#[tokio::test]
async fn test_malformed_frame_counts_as_error_not_message() {
    let server = ws_server(ServerConfig::default()).await;
    let mut alice = connect(&server, "demo", "alice").await;
    let _users: Value = alice.receive_json().await;

    alice.send_text("garbage").await;
    // The error reply doubles as the acknowledgement that the frame has
    // been fully processed.
    let msg: Value = alice.receive_json().await;
    assert_eq!(msg["type"], "error");

    let response = server.get("/api/metrics").await;
    let stats: Value = response.json();
    assert_eq!(stats["error_count"], 1);
    assert_eq!(stats["total_messages"], 0);
    assert_eq!(stats["p50_latency_ms"], 0.0);
}

#[tokio::test]
async fn test_persist_with_document_but_no_gateway() {
    let server = ws_server(ServerConfig::default()).await;
    let mut alice = connect(&server, "demo", "alice").await;
    let _users: Value = alice.receive_json().await;

    alice
        .send_json(&json!({"type": "update", "data": hex::encode(b"doc")}))
        .await;
    alice.send_json(&json!({"type": "sync_request"})).await;
    let _sync: Value = alice.receive_json().await;

    let response = server.post("/api/rooms/demo/persist").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Persistence not configured");
}

#[tokio::test]
async fn test_persist_then_load_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let server = ws_server(sqlite_config(&dir)).await;

    let mut alice = connect(&server, "demo", "alice").await;
    let _users: Value = alice.receive_json().await;
    alice
        .send_json(&json!({"type": "update", "data": hex::encode(b"persist me")}))
        .await;
    alice.send_json(&json!({"type": "sync_request"})).await;
    let _sync: Value = alice.receive_json().await;

    let response = server.post("/api/rooms/demo/persist").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["size"], 10);

    let response = server.get("/api/rooms/demo/load").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["size"], 10);

    let response = server.get("/api/rooms/demo").await;
    let room: Value = response.json();
    assert_eq!(room["doc_size"], 10);
}

#[tokio::test]
async fn test_room_directory_reflects_live_connections() {
    let server = ws_server(ServerConfig::default()).await;
    let mut alice = connect(&server, "demo", "alice").await;
    let _users: Value = alice.receive_json().await;
    join(&mut alice, "Alice").await;

    let response = server.get("/api/rooms").await;
    let rooms: Vec<Value> = response.json();
    assert_eq!(rooms.len(), 1);
    assert_eq!(rooms[0]["id"], "demo");
    assert_eq!(rooms[0]["user_count"], 1);
    assert_eq!(rooms[0]["users"][0]["name"], "Alice");
}
