/**
 * Room Snapshot Store
 *
 * Authoritative per-room document state. Each room holds exactly one
 * snapshot: an opaque byte sequence, possibly empty. Rooms are created
 * lazily on first reference and never explicitly destroyed.
 *
 * # Update Mode
 *
 * The store is constructed with one of two update modes and applies it for
 * its whole lifetime - mixing modes within one running store is a
 * correctness hazard, so the mode is fixed at construction:
 *
 * - `Append`: `new = old + incoming`, an unbounded update log
 * - `Replace`: `new = incoming`, the latest full state from any client wins
 *
 * Deployments default to `Append`, matching the update-log contract the
 * wire protocol was written against. There is no merge logic here; two
 * concurrent updates race and the later one observed by the hub wins.
 */

use bytes::Bytes;
use serde::Deserialize;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// How an incoming update combines with the current snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateMode {
    /// Concatenate every update ever received
    #[default]
    Append,
    /// Keep only the latest full-state snapshot
    Replace,
}

/// Per-room document snapshots, keyed by room id
#[derive(Debug)]
pub struct RoomStore {
    mode: UpdateMode,
    documents: RwLock<HashMap<String, Bytes>>,
}

impl RoomStore {
    /// Create an empty store with a fixed update mode
    pub fn new(mode: UpdateMode) -> Self {
        Self {
            mode,
            documents: RwLock::new(HashMap::new()),
        }
    }

    /// The update mode this store was constructed with
    pub fn mode(&self) -> UpdateMode {
        self.mode
    }

    /// Current snapshot for a room, if the room has ever been written
    pub async fn snapshot(&self, room_id: &str) -> Option<Bytes> {
        self.documents.read().await.get(room_id).cloned()
    }

    /// Current snapshot size in bytes (0 for unknown rooms)
    pub async fn doc_size(&self, room_id: &str) -> usize {
        self.documents
            .read()
            .await
            .get(room_id)
            .map(|doc| doc.len())
            .unwrap_or(0)
    }

    /// Apply one update per the store's mode, returning the new size
    pub async fn apply_update(&self, room_id: &str, incoming: &[u8]) -> usize {
        let mut documents = self.documents.write().await;
        let snapshot = match self.mode {
            UpdateMode::Append => {
                let existing = documents.get(room_id).map(|b| b.as_ref()).unwrap_or(&[]);
                let mut merged = Vec::with_capacity(existing.len() + incoming.len());
                merged.extend_from_slice(existing);
                merged.extend_from_slice(incoming);
                Bytes::from(merged)
            }
            UpdateMode::Replace => Bytes::copy_from_slice(incoming),
        };
        let size = snapshot.len();
        documents.insert(room_id.to_string(), snapshot);
        size
    }

    /// Replace a room's snapshot wholesale, regardless of mode
    ///
    /// Used by the load endpoint when pulling a persisted record back in.
    pub async fn replace_snapshot(&self, room_id: &str, snapshot: Bytes) {
        self.documents
            .write()
            .await
            .insert(room_id.to_string(), snapshot);
    }
}
