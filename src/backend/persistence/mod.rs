//! Persistence Module
//!
//! Durable snapshot storage behind an opaque load/save seam. The hub only
//! ever sees the [`PersistenceGateway`] trait; the shipped implementation
//! stores records in SQLite via sqlx.
//!
//! # Module Structure
//!
//! ```text
//! persistence/
//! ├── mod.rs     - Module exports and documentation
//! ├── gateway.rs - PersistenceGateway trait and record shape
//! └── sqlite.rs  - SQLite-backed gateway
//! ```
//!
//! # Failure Semantics
//!
//! Gateway failures surface as [`HubError::Storage`](crate::backend::error::HubError)
//! to the REST caller and never crash the hub. An unconfigured gateway is
//! a structured failure on the persist/load endpoints, not a startup error.

/// Gateway trait and persisted record shape
pub mod gateway;

/// SQLite-backed gateway implementation
pub mod sqlite;

// Re-export commonly used types
pub use gateway::{PersistedRoom, PersistenceGateway};
pub use sqlite::SqliteGateway;
