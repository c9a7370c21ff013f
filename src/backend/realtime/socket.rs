/**
 * WebSocket Endpoint
 *
 * Upgrade handler and per-connection loop for `GET /api/ws/{room_id}`.
 * The client id comes from the `client_id` query parameter and is
 * auto-generated when absent.
 *
 * # Per-Connection Tasks
 *
 * Each connection runs two halves:
 *
 * - A **writer task** draining the connection's outbound queue into the
 *   socket sink. Every send is bounded by the configured timeout; a send
 *   error or timeout ends the writer, which closes the queue and lets the
 *   hub reap the endpoint on its next delivery attempt.
 * - The **receive loop**, which times each inbound frame, hands it to the
 *   sync engine, and records the handling latency for dispatched frames.
 *   Malformed frames count toward the error counter only.
 *
 * # Teardown
 *
 * Whatever ends the receive loop - peer close, stream error, or a fatal
 * dispatch error - the connection is deregistered and a `user_left`
 * notification is broadcast best-effort.
 */

use crate::backend::realtime::hub::Frame;
use crate::backend::server::state::AppState;
use crate::shared::protocol::ServerMessage;
use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Path, Query, State,
    },
    response::Response,
};
use futures_util::{SinkExt, StreamExt};
use serde::Deserialize;
use std::time::Instant;
use tokio::sync::mpsc;
use uuid::Uuid;

/// Query parameters for the WebSocket endpoint
#[derive(Debug, Deserialize)]
pub struct WsQuery {
    /// Client id; auto-generated when absent
    pub client_id: Option<String>,
}

/// Handle `GET /api/ws/{room_id}` upgrade requests
pub async fn websocket_endpoint(
    State(state): State<AppState>,
    Path(room_id): Path<String>,
    Query(query): Query<WsQuery>,
    ws: WebSocketUpgrade,
) -> Response {
    let client_id = query
        .client_id
        .unwrap_or_else(|| Uuid::new_v4().to_string());
    ws.on_upgrade(move |socket| handle_socket(state, socket, room_id, client_id))
}

/// Drive one connection from registration to teardown
async fn handle_socket(state: AppState, socket: WebSocket, room_id: String, client_id: String) {
    let (mut sink, mut stream) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel::<Frame>();
    let send_timeout = state.config.send_timeout;

    // Writer half: bounded sends so one unresponsive peer cannot stall
    // anyone queueing frames for it.
    let writer_room = room_id.clone();
    let writer_client = client_id.clone();
    tokio::spawn(async move {
        while let Some(frame) = rx.recv().await {
            let message = match frame {
                Frame::Text(text) => Message::Text(text.into()),
                Frame::Binary(bytes) => Message::Binary(bytes.into()),
            };
            match tokio::time::timeout(send_timeout, sink.send(message)).await {
                Ok(Ok(())) => {}
                Ok(Err(err)) => {
                    tracing::debug!(
                        "[Socket] send to {writer_client} in {writer_room} failed: {err}"
                    );
                    break;
                }
                Err(_) => {
                    tracing::warn!(
                        "[Socket] send to {writer_client} in {writer_room} timed out"
                    );
                    break;
                }
            }
        }
    });

    state.hub.connect(&room_id, &client_id, tx).await;

    // Initial push: existing snapshot first, then the presence list.
    if let Some(snapshot) = state.store.snapshot(&room_id).await {
        if let Err(err) = state
            .hub
            .send_to(
                &room_id,
                &client_id,
                &ServerMessage::Sync {
                    data: hex::encode(&snapshot),
                },
            )
            .await
        {
            tracing::debug!("[Socket] initial sync push to {client_id} failed: {err}");
        }
    }
    let users = state.presence.list(&room_id).await;
    if let Err(err) = state
        .hub
        .send_to(&room_id, &client_id, &ServerMessage::Users { users })
        .await
    {
        tracing::debug!("[Socket] initial users push to {client_id} failed: {err}");
    }

    tracing::info!("[Socket] {client_id} joined room {room_id}");

    // Receive loop: one decoded frame per turn.
    while let Some(frame) = stream.next().await {
        let frame = match frame {
            Ok(frame) => frame,
            Err(err) => {
                tracing::debug!("[Socket] stream error for {client_id}: {err}");
                break;
            }
        };

        let started = Instant::now();
        let result = match frame {
            Message::Text(text) => {
                state
                    .sync
                    .handle_text(&room_id, &client_id, text.as_str())
                    .await
            }
            Message::Binary(bytes) => state
                .sync
                .handle_binary(&room_id, &client_id, &bytes)
                .await
                .map(|()| true),
            Message::Close(_) => break,
            // Ping/pong frames are answered by the protocol layer
            _ => continue,
        };

        match result {
            Ok(true) => {
                let latency_ms = started.elapsed().as_secs_f64() * 1000.0;
                state.metrics.record_message(latency_ms);
            }
            // Malformed frame: already counted as an error, never as a
            // handled message.
            Ok(false) => {}
            Err(err) => {
                state.metrics.record_error();
                tracing::error!("[Socket] fatal dispatch error for {client_id}: {err}");
                break;
            }
        }
    }

    // Terminal state: always deregister, then best-effort departure notice.
    state.hub.disconnect(&room_id, &client_id).await;
    state
        .hub
        .broadcast(
            &room_id,
            &ServerMessage::UserLeft {
                user_id: client_id.clone(),
            },
            None,
        )
        .await;

    tracing::info!("[Socket] {client_id} left room {room_id}");
}
