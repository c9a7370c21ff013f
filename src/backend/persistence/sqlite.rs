/**
 * SQLite Snapshot Gateway
 *
 * sqlx-backed implementation of the persistence gateway. One row per room
 * in `room_snapshots`, upserted on save. The table is created on connect
 * so a fresh database file works out of the box.
 */

use crate::backend::error::HubError;
use crate::backend::persistence::gateway::{PersistedRoom, PersistenceGateway};
use async_trait::async_trait;
use sqlx::{Row, SqlitePool};

/// SQLite-backed snapshot store
#[derive(Debug, Clone)]
pub struct SqliteGateway {
    pool: SqlitePool,
}

impl SqliteGateway {
    /// Connect and ensure the snapshot table exists
    pub async fn connect(database_url: &str) -> Result<Self, HubError> {
        let pool = SqlitePool::connect(database_url)
            .await
            .map_err(|err| HubError::storage(format!("connect failed: {err}")))?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS room_snapshots (
                room_id TEXT PRIMARY KEY,
                data TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                size INTEGER NOT NULL
            )",
        )
        .execute(&pool)
        .await
        .map_err(|err| HubError::storage(format!("schema setup failed: {err}")))?;

        Ok(Self { pool })
    }
}

#[async_trait]
impl PersistenceGateway for SqliteGateway {
    async fn save(&self, record: &PersistedRoom) -> Result<(), HubError> {
        sqlx::query(
            "INSERT INTO room_snapshots (room_id, data, updated_at, size)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(room_id) DO UPDATE SET
                 data = excluded.data,
                 updated_at = excluded.updated_at,
                 size = excluded.size",
        )
        .bind(&record.room_id)
        .bind(&record.data)
        .bind(&record.updated_at)
        .bind(record.size as i64)
        .execute(&self.pool)
        .await
        .map_err(|err| HubError::storage(format!("save failed: {err}")))?;

        tracing::debug!(
            "[Persistence] Saved {} bytes for room {}",
            record.size,
            record.room_id
        );
        Ok(())
    }

    async fn load(&self, room_id: &str) -> Result<Option<PersistedRoom>, HubError> {
        let row = sqlx::query(
            "SELECT room_id, data, updated_at, size FROM room_snapshots WHERE room_id = ?1",
        )
        .bind(room_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| HubError::storage(format!("load failed: {err}")))?;

        Ok(row.map(|row| PersistedRoom {
            room_id: row.get::<String, _>("room_id"),
            data: row.get::<String, _>("data"),
            updated_at: row.get::<String, _>("updated_at"),
            size: row.get::<i64, _>("size") as usize,
        }))
    }
}
