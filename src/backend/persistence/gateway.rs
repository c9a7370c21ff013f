/**
 * Persistence Gateway
 *
 * The storage seam for room snapshots. The hub treats durable storage as
 * an opaque key/value store reachable through explicit load/save calls;
 * anything implementing this trait can back it.
 */

use crate::backend::error::HubError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Persisted snapshot record, keyed by room id
///
/// The snapshot bytes travel hex-encoded so the record stays a plain text
/// row regardless of backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedRoom {
    pub room_id: String,
    /// Hex-encoded snapshot bytes
    pub data: String,
    /// UTC timestamp of the save, RFC 3339
    pub updated_at: String,
    /// Decoded snapshot size in bytes
    pub size: usize,
}

/// Opaque snapshot store
#[async_trait]
pub trait PersistenceGateway: Send + Sync {
    /// Upsert a room's snapshot record
    async fn save(&self, record: &PersistedRoom) -> Result<(), HubError>;

    /// Fetch a room's snapshot record, if one was ever saved
    async fn load(&self, room_id: &str) -> Result<Option<PersistedRoom>, HubError>;
}
