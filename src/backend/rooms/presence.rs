/**
 * Presence Tracker
 *
 * Per-room map of connected user metadata: display name, color, cursor,
 * selection. Entries are created on `join`, updated in place by
 * `cursor`/`selection` messages, and deleted on disconnect.
 *
 * Insertion order is preserved per room (the presence list clients receive
 * reflects join order), so rooms are backed by `IndexMap`.
 */

use crate::shared::protocol::UserPresence;
use indexmap::IndexMap;
use serde_json::Value;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Per-room presence entries, keyed by room id then client id
#[derive(Debug, Default)]
pub struct PresenceTracker {
    rooms: RwLock<HashMap<String, IndexMap<String, UserPresence>>>,
}

impl PresenceTracker {
    /// Create an empty tracker
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a presence entry
    ///
    /// Replacing an existing entry keeps its position in the room's join
    /// order.
    pub async fn upsert(&self, room_id: &str, presence: UserPresence) {
        let mut rooms = self.rooms.write().await;
        rooms
            .entry(room_id.to_string())
            .or_default()
            .insert(presence.id.clone(), presence);
    }

    /// Update the cursor position of an existing entry
    ///
    /// Returns `false` when no entry exists for the client; the caller
    /// skips the broadcast in that case.
    pub async fn update_cursor(
        &self,
        room_id: &str,
        client_id: &str,
        position: Option<Value>,
    ) -> bool {
        let mut rooms = self.rooms.write().await;
        match rooms.get_mut(room_id).and_then(|room| room.get_mut(client_id)) {
            Some(entry) => {
                entry.cursor_position = position;
                true
            }
            None => false,
        }
    }

    /// Update the selection range of an existing entry
    pub async fn update_selection(
        &self,
        room_id: &str,
        client_id: &str,
        selection: Option<Value>,
    ) -> bool {
        let mut rooms = self.rooms.write().await;
        match rooms.get_mut(room_id).and_then(|room| room.get_mut(client_id)) {
            Some(entry) => {
                entry.selection = selection;
                true
            }
            None => false,
        }
    }

    /// Remove a presence entry, returning it if present
    pub async fn remove(&self, room_id: &str, client_id: &str) -> Option<UserPresence> {
        let mut rooms = self.rooms.write().await;
        rooms
            .get_mut(room_id)
            .and_then(|room| room.shift_remove(client_id))
    }

    /// Presence entries for a room in join order
    pub async fn list(&self, room_id: &str) -> Vec<UserPresence> {
        self.rooms
            .read()
            .await
            .get(room_id)
            .map(|room| room.values().cloned().collect())
            .unwrap_or_default()
    }

    /// Number of presence entries in a room
    pub async fn count(&self, room_id: &str) -> usize {
        self.rooms
            .read()
            .await
            .get(room_id)
            .map(|room| room.len())
            .unwrap_or(0)
    }

    /// Remove every synthetic entry from a room
    ///
    /// Returns the removed client ids so the caller can broadcast a
    /// `user_left` per removal. Organic entries are untouched.
    pub async fn remove_simulated(&self, room_id: &str) -> Vec<String> {
        let mut rooms = self.rooms.write().await;
        let Some(room) = rooms.get_mut(room_id) else {
            return Vec::new();
        };
        let removed: Vec<String> = room
            .values()
            .filter(|user| user.simulated)
            .map(|user| user.id.clone())
            .collect();
        for id in &removed {
            room.shift_remove(id);
        }
        removed
    }
}
