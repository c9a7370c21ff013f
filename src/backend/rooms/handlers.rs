/**
 * Room REST Handlers
 *
 * Read-only room views plus snapshot persistence and the load-simulation
 * interface:
 *
 * - `GET /api/rooms` - All rooms known to the connection registry
 * - `GET /api/rooms/{id}` - Single-room view
 * - `GET /api/rooms/{id}/users` - Presence list
 * - `POST /api/rooms/{id}/persist` - Push the snapshot to the gateway
 * - `GET /api/rooms/{id}/load` - Pull a persisted snapshot back in
 * - `POST /api/simulate/users/{id}?count=N` - Inject synthetic users
 * - `DELETE /api/simulate/users/{id}` - Remove all synthetic users
 *
 * Every view endpoint answers 200 for rooms that have never been seen;
 * unknown rooms simply look empty.
 */

use crate::backend::error::HubError;
use crate::backend::persistence::PersistedRoom;
use crate::backend::server::state::AppState;
use crate::shared::protocol::{RoomInfo, ServerMessage, UserPresence};
use axum::{
    extract::{Path, Query, State},
    Json,
};
use bytes::Bytes;
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

/// Colors cycled through for synthetic users
const SIM_COLORS: [&str; 6] = [
    "#F43F5E", "#10B981", "#3B82F6", "#F59E0B", "#8B5CF6", "#EC4899",
];

/// Handle `GET /api/rooms`
pub async fn list_rooms(State(state): State<AppState>) -> Json<Vec<RoomInfo>> {
    let mut rooms = Vec::new();
    for (room_id, user_count) in state.hub.room_summaries().await {
        let doc_size = state.store.doc_size(&room_id).await;
        let users = state.presence.list(&room_id).await;
        rooms.push(RoomInfo {
            name: room_id.clone(),
            id: room_id,
            user_count,
            doc_size,
            users,
        });
    }
    Json(rooms)
}

/// Handle `GET /api/rooms/{room_id}`
pub async fn get_room(
    State(state): State<AppState>,
    Path(room_id): Path<String>,
) -> Json<RoomInfo> {
    let user_count = state.hub.connection_count(&room_id).await;
    let doc_size = state.store.doc_size(&room_id).await;
    let users = state.presence.list(&room_id).await;
    Json(RoomInfo {
        name: room_id.clone(),
        id: room_id,
        user_count,
        doc_size,
        users,
    })
}

/// Handle `GET /api/rooms/{room_id}/users`
pub async fn get_room_users(
    State(state): State<AppState>,
    Path(room_id): Path<String>,
) -> Json<Vec<UserPresence>> {
    Json(state.presence.list(&room_id).await)
}

/// Handle `POST /api/rooms/{room_id}/persist`
///
/// Pushes the room's current snapshot to the persistence gateway. Empty or
/// absent snapshots and an unconfigured gateway are structured failures,
/// not HTTP errors; an actual gateway failure surfaces as a 500.
pub async fn persist_room(
    State(state): State<AppState>,
    Path(room_id): Path<String>,
) -> Result<Json<Value>, HubError> {
    let snapshot = state
        .store
        .snapshot(&room_id)
        .await
        .filter(|snapshot| !snapshot.is_empty());
    let Some(snapshot) = snapshot else {
        return Ok(Json(json!({"success": false, "error": "No document found"})));
    };
    let Some(gateway) = state.gateway.as_ref() else {
        return Ok(Json(
            json!({"success": false, "error": "Persistence not configured"}),
        ));
    };

    let record = PersistedRoom {
        room_id: room_id.clone(),
        data: hex::encode(&snapshot),
        updated_at: Utc::now().to_rfc3339(),
        size: snapshot.len(),
    };
    gateway.save(&record).await?;

    tracing::info!(
        "[Rooms] Persisted {} bytes for room {room_id}",
        snapshot.len()
    );
    Ok(Json(json!({"success": true, "size": snapshot.len()})))
}

/// Handle `GET /api/rooms/{room_id}/load`
///
/// Pulls the persisted record into the room store, replacing the current
/// snapshot wholesale.
pub async fn load_room(
    State(state): State<AppState>,
    Path(room_id): Path<String>,
) -> Result<Json<Value>, HubError> {
    let Some(gateway) = state.gateway.as_ref() else {
        return Ok(Json(
            json!({"success": false, "error": "Persistence not configured"}),
        ));
    };

    let Some(record) = gateway.load(&room_id).await? else {
        return Ok(Json(
            json!({"success": false, "error": "No persisted document found"}),
        ));
    };

    let snapshot = hex::decode(&record.data)
        .map_err(|err| HubError::storage(format!("corrupt persisted record: {err}")))?;
    let size = snapshot.len();
    state
        .store
        .replace_snapshot(&room_id, Bytes::from(snapshot))
        .await;
    state.metrics.record_doc_size(&room_id, size);

    tracing::info!("[Rooms] Loaded {size} bytes into room {room_id}");
    Ok(Json(json!({"success": true, "size": record.size})))
}

/// Query parameters for the simulation endpoint
#[derive(Debug, Deserialize)]
pub struct SimulateQuery {
    /// Number of synthetic users to inject (default 10)
    pub count: Option<usize>,
}

/// Handle `POST /api/simulate/users/{room_id}?count=N`
///
/// Injects synthetic presence entries for load testing, broadcasting a
/// `user_joined` for each exactly as an organic join would.
pub async fn simulate_users(
    State(state): State<AppState>,
    Path(room_id): Path<String>,
    Query(query): Query<SimulateQuery>,
) -> Json<Value> {
    let count = query.count.unwrap_or(10);
    let mut simulated = Vec::with_capacity(count);

    for i in 0..count {
        let short: String = Uuid::new_v4().simple().to_string().chars().take(8).collect();
        let user = UserPresence {
            id: format!("sim-{short}"),
            name: format!("SimUser-{}", i + 1),
            color: SIM_COLORS[i % SIM_COLORS.len()].to_string(),
            avatar_url: None,
            cursor_position: Some(json!({"line": i % 20, "column": (i * 5) % 80})),
            selection: None,
            simulated: true,
        };
        state.presence.upsert(&room_id, user.clone()).await;
        state.metrics.add_event(
            "simulate",
            &room_id,
            &user.id,
            &format!("Simulated user {}", user.name),
        );
        simulated.push(user);
    }

    for user in &simulated {
        state
            .hub
            .broadcast(
                &room_id,
                &ServerMessage::UserJoined { user: user.clone() },
                None,
            )
            .await;
    }

    let total_users = state.presence.count(&room_id).await;
    Json(json!({
        "success": true,
        "simulated_users": simulated.len(),
        "total_users": total_users,
    }))
}

/// Handle `DELETE /api/simulate/users/{room_id}`
///
/// Removes exactly the synthetic entries, never organically joined users.
pub async fn remove_simulated_users(
    State(state): State<AppState>,
    Path(room_id): Path<String>,
) -> Json<Value> {
    let removed = state.presence.remove_simulated(&room_id).await;
    for user_id in &removed {
        state
            .hub
            .broadcast(
                &room_id,
                &ServerMessage::UserLeft {
                    user_id: user_id.clone(),
                },
                None,
            )
            .await;
    }
    Json(json!({"success": true, "removed": removed.len()}))
}
