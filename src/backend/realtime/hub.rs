/**
 * Connection Hub
 *
 * Registry of live connections per room plus the broadcast fan-out.
 * Endpoints are registered as unbounded frame senders; the actual socket
 * write happens in each connection's writer task, so hub-side delivery
 * never blocks on a slow peer.
 *
 * # Broadcast Contract
 *
 * `broadcast` takes a snapshot of the subscriber set at call time and fans
 * out over that snapshot with the registry lock released. Endpoints whose
 * channel has closed are collected during the pass and disconnected only
 * after the full fan-out completes, so the subscriber set used for one
 * broadcast is never perturbed mid-iteration and one broken peer cannot
 * hide the message from the others.
 *
 * # Registration
 *
 * At most one endpoint exists per `(room_id, client_id)` pair. A new
 * connection with the same client id displaces the prior registration
 * without closing the old socket; the displaced writer sees its channel
 * close and winds down on its own.
 */

use crate::backend::error::HubError;
use crate::backend::metrics::MetricsCollector;
use crate::backend::rooms::PresenceTracker;
use crate::shared::protocol::ServerMessage;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};

/// One outbound WebSocket frame, queued for a connection's writer task
#[derive(Debug, Clone)]
pub enum Frame {
    Text(String),
    Binary(Vec<u8>),
}

/// Handle to one connection's outbound queue
pub type ClientSender = mpsc::UnboundedSender<Frame>;

/// Per-room registry of live connections
#[derive(Debug)]
pub struct ConnectionHub {
    /// room id -> client id -> outbound sender. Room entries persist after
    /// their last client leaves; an empty set still counts as an active
    /// room for the REST views, matching lazily created room bookkeeping.
    connections: RwLock<HashMap<String, HashMap<String, ClientSender>>>,
    presence: Arc<PresenceTracker>,
    metrics: Arc<MetricsCollector>,
}

impl ConnectionHub {
    pub fn new(presence: Arc<PresenceTracker>, metrics: Arc<MetricsCollector>) -> Self {
        Self {
            connections: RwLock::new(HashMap::new()),
            presence,
            metrics,
        }
    }

    /// Register an endpoint, displacing any prior one for the same pair
    ///
    /// Safe to call for rooms that have never been referenced; the room
    /// entry is created on the way in. Displacing an existing endpoint
    /// counts as a reconnect.
    pub async fn connect(&self, room_id: &str, client_id: &str, sender: ClientSender) {
        let displaced = {
            let mut connections = self.connections.write().await;
            connections
                .entry(room_id.to_string())
                .or_default()
                .insert(client_id.to_string(), sender)
                .is_some()
        };
        if displaced {
            self.metrics.record_reconnect();
        }
        self.metrics
            .add_event("connect", room_id, client_id, "User connected");
        tracing::debug!("[Hub] {client_id} connected to room {room_id}");
    }

    /// Remove an endpoint and its presence entry
    ///
    /// Idempotent: a second call for an already-removed client does
    /// nothing, not even an event.
    pub async fn disconnect(&self, room_id: &str, client_id: &str) {
        let removed_endpoint = {
            let mut connections = self.connections.write().await;
            connections
                .get_mut(room_id)
                .and_then(|room| room.remove(client_id))
                .is_some()
        };
        let removed_presence = self.presence.remove(room_id, client_id).await.is_some();

        if removed_endpoint || removed_presence {
            self.metrics
                .add_event("disconnect", room_id, client_id, "User disconnected");
            tracing::debug!("[Hub] {client_id} disconnected from room {room_id}");
        }
    }

    /// Fan a structured message out to every endpoint in a room
    ///
    /// Delivery failures are swallowed and converted into deferred
    /// disconnects after the pass; they never surface to the caller.
    pub async fn broadcast(
        &self,
        room_id: &str,
        message: &ServerMessage,
        exclude_client: Option<&str>,
    ) {
        let payload = match serde_json::to_string(message) {
            Ok(payload) => payload,
            Err(err) => {
                tracing::error!("[Hub] Failed to serialize broadcast: {err}");
                return;
            }
        };
        self.fan_out(room_id, Frame::Text(payload), exclude_client)
            .await;
    }

    /// Binary variant of [`broadcast`](Self::broadcast), same contract
    pub async fn broadcast_binary(
        &self,
        room_id: &str,
        bytes: &[u8],
        exclude_client: Option<&str>,
    ) {
        self.fan_out(room_id, Frame::Binary(bytes.to_vec()), exclude_client)
            .await;
    }

    async fn fan_out(&self, room_id: &str, frame: Frame, exclude_client: Option<&str>) {
        // Snapshot the subscriber set, then deliver with the lock released.
        let subscribers: Vec<(String, ClientSender)> = {
            let connections = self.connections.read().await;
            match connections.get(room_id) {
                Some(room) => room
                    .iter()
                    .filter(|(client_id, _)| Some(client_id.as_str()) != exclude_client)
                    .map(|(client_id, sender)| (client_id.clone(), sender.clone()))
                    .collect(),
                None => return,
            }
        };

        let mut failed = Vec::new();
        for (client_id, sender) in subscribers {
            if sender.send(frame.clone()).is_err() {
                failed.push(client_id);
            }
        }

        // Second pass: clean up peers whose writer has gone away.
        for client_id in failed {
            tracing::debug!("[Hub] Dropping unreachable peer {client_id} in room {room_id}");
            self.disconnect(room_id, &client_id).await;
        }
    }

    /// Deliver a message to exactly one endpoint (sync/pong/error replies)
    pub async fn send_to(
        &self,
        room_id: &str,
        client_id: &str,
        message: &ServerMessage,
    ) -> Result<(), HubError> {
        let payload = serde_json::to_string(message)?;
        let sender = {
            let connections = self.connections.read().await;
            connections
                .get(room_id)
                .and_then(|room| room.get(client_id))
                .cloned()
        };
        let Some(sender) = sender else {
            return Err(HubError::delivery(format!(
                "no endpoint for {client_id} in room {room_id}"
            )));
        };
        if sender.send(Frame::Text(payload)).is_err() {
            self.disconnect(room_id, client_id).await;
            return Err(HubError::delivery(format!(
                "endpoint for {client_id} in room {room_id} is closed"
            )));
        }
        Ok(())
    }

    /// Number of live connections in one room
    pub async fn connection_count(&self, room_id: &str) -> usize {
        self.connections
            .read()
            .await
            .get(room_id)
            .map(|room| room.len())
            .unwrap_or(0)
    }

    /// Total live connections across all rooms
    pub async fn total_connections(&self) -> usize {
        self.connections
            .read()
            .await
            .values()
            .map(|room| room.len())
            .sum()
    }

    /// Number of rooms the registry knows about
    pub async fn active_rooms(&self) -> usize {
        self.connections.read().await.len()
    }

    /// (room id, connection count) for every known room
    pub async fn room_summaries(&self) -> Vec<(String, usize)> {
        self.connections
            .read()
            .await
            .iter()
            .map(|(room_id, room)| (room_id.clone(), room.len()))
            .collect()
    }
}
