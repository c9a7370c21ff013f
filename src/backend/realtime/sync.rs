/**
 * Sync Engine
 *
 * Protocol dispatcher for the hub. Receives one decoded inbound message
 * per connection-turn, classifies it by its `type` tag, mutates the room
 * store / presence tracker as required, and fans the effect out through
 * the connection hub.
 *
 * # Dispatch Table
 *
 * | type           | precondition     | effect               | broadcast                     |
 * |----------------|------------------|----------------------|-------------------------------|
 * | `join`         | none             | upsert presence      | `user_joined` to all          |
 * | `cursor`       | presence exists  | update cursor        | `cursor` to others            |
 * | `selection`    | presence exists  | update selection     | `selection` to others         |
 * | `awareness`    | none             | none (relay)         | `awareness` to others         |
 * | `sync_request` | room has a doc   | none                 | direct `sync` reply           |
 * | `update`       | payload present  | apply_update         | `update` to others            |
 * | `ping`         | none             | none                 | direct `pong` reply           |
 * | anything else  | -                | none                 | none                          |
 *
 * Binary frames bypass classification entirely: they are applied to the
 * store and rebroadcast verbatim, exactly like an `update`.
 *
 * # Ordering
 *
 * Each dispatch turn acquires a per-room mutex held across the mutation
 * and the broadcast, so no concurrent turn in the same room can observe a
 * torn update or reorder one sender's messages. Turns in different rooms
 * never contend.
 */

use crate::backend::error::HubError;
use crate::backend::metrics::MetricsCollector;
use crate::backend::realtime::hub::ConnectionHub;
use crate::backend::rooms::{PresenceTracker, RoomStore};
use crate::shared::protocol::{ClientMessage, ServerMessage, UserPresence};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Message dispatcher; one instance shared by all connections
pub struct SyncEngine {
    hub: Arc<ConnectionHub>,
    store: Arc<RoomStore>,
    presence: Arc<PresenceTracker>,
    metrics: Arc<MetricsCollector>,
    /// Per-room dispatch locks; the outer mutex only guards map access
    room_locks: Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>,
}

impl SyncEngine {
    pub fn new(
        hub: Arc<ConnectionHub>,
        store: Arc<RoomStore>,
        presence: Arc<PresenceTracker>,
        metrics: Arc<MetricsCollector>,
    ) -> Self {
        Self {
            hub,
            store,
            presence,
            metrics,
            room_locks: Mutex::new(HashMap::new()),
        }
    }

    fn room_lock(&self, room_id: &str) -> Arc<tokio::sync::Mutex<()>> {
        let mut locks = self.room_locks.lock().unwrap();
        locks
            .entry(room_id.to_string())
            .or_insert_with(|| Arc::new(tokio::sync::Mutex::new(())))
            .clone()
    }

    /// Dispatch one structured (text) frame
    ///
    /// A malformed frame is recoverable: the sender gets a direct error
    /// reply, the connection stays open, and `Ok(false)` tells the caller
    /// the frame counted as an error, not a handled message. `Ok(true)` is
    /// a dispatched frame. An `Err` from this method is a fatal dispatch
    /// failure and terminates the connection.
    pub async fn handle_text(
        &self,
        room_id: &str,
        client_id: &str,
        text: &str,
    ) -> Result<bool, HubError> {
        let message: ClientMessage = match serde_json::from_str(text) {
            Ok(message) => message,
            Err(err) => {
                tracing::debug!("[Sync] Malformed frame from {client_id}: {err}");
                self.metrics.record_error();
                let _ = self
                    .hub
                    .send_to(
                        room_id,
                        client_id,
                        &ServerMessage::Error {
                            message: "Invalid JSON".to_string(),
                        },
                    )
                    .await;
                return Ok(false);
            }
        };

        let lock = self.room_lock(room_id);
        let _guard = lock.lock().await;

        match message {
            ClientMessage::Join {
                name,
                color,
                avatar_url,
            } => {
                let user = UserPresence::from_join(client_id, name, color, avatar_url);
                self.presence.upsert(room_id, user.clone()).await;
                self.metrics.add_event(
                    "join",
                    room_id,
                    client_id,
                    &format!("User {} joined", user.name),
                );
                self.hub
                    .broadcast(room_id, &ServerMessage::UserJoined { user }, None)
                    .await;
            }

            ClientMessage::Cursor { position } => {
                if self
                    .presence
                    .update_cursor(room_id, client_id, position.clone())
                    .await
                {
                    self.hub
                        .broadcast(
                            room_id,
                            &ServerMessage::Cursor {
                                user_id: client_id.to_string(),
                                position,
                            },
                            Some(client_id),
                        )
                        .await;
                }
            }

            ClientMessage::Selection { selection } => {
                if self
                    .presence
                    .update_selection(room_id, client_id, selection.clone())
                    .await
                {
                    self.hub
                        .broadcast(
                            room_id,
                            &ServerMessage::Selection {
                                user_id: client_id.to_string(),
                                selection,
                            },
                            Some(client_id),
                        )
                        .await;
                }
            }

            ClientMessage::Awareness { data } => {
                // Stateless relay
                self.hub
                    .broadcast(
                        room_id,
                        &ServerMessage::Awareness {
                            user_id: client_id.to_string(),
                            data,
                        },
                        Some(client_id),
                    )
                    .await;
            }

            ClientMessage::SyncRequest => {
                if let Some(snapshot) = self.store.snapshot(room_id).await {
                    if let Err(err) = self
                        .hub
                        .send_to(
                            room_id,
                            client_id,
                            &ServerMessage::Sync {
                                data: hex::encode(&snapshot),
                            },
                        )
                        .await
                    {
                        tracing::debug!("[Sync] sync reply to {client_id} failed: {err}");
                    }
                }
            }

            ClientMessage::Update { data } => {
                let encoded = data.unwrap_or_default();
                let update = hex::decode(&encoded)
                    .map_err(|err| HubError::connection(format!("invalid hex payload: {err}")))?;
                if !update.is_empty() {
                    let size = self.store.apply_update(room_id, &update).await;
                    self.metrics.record_doc_size(room_id, size);
                    self.hub
                        .broadcast(
                            room_id,
                            &ServerMessage::Update {
                                data: encoded,
                                from: client_id.to_string(),
                            },
                            Some(client_id),
                        )
                        .await;
                }
            }

            ClientMessage::Ping { timestamp } => {
                if let Err(err) = self
                    .hub
                    .send_to(room_id, client_id, &ServerMessage::Pong { timestamp })
                    .await
                {
                    tracing::debug!("[Sync] pong to {client_id} failed: {err}");
                }
            }

            ClientMessage::Unknown => {
                // Unrecognized type: silently ignored
                tracing::trace!("[Sync] Ignoring unknown message type from {client_id}");
            }
        }

        Ok(true)
    }

    /// Dispatch one binary frame: apply and rebroadcast verbatim
    pub async fn handle_binary(
        &self,
        room_id: &str,
        client_id: &str,
        bytes: &[u8],
    ) -> Result<(), HubError> {
        let lock = self.room_lock(room_id);
        let _guard = lock.lock().await;

        let size = self.store.apply_update(room_id, bytes).await;
        self.metrics.record_doc_size(room_id, size);
        self.hub
            .broadcast_binary(room_id, bytes, Some(client_id))
            .await;
        Ok(())
    }
}
