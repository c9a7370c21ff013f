//! Backend Module
//!
//! This module contains all server-side code for the ConcurrencyPad hub.
//! It provides a complete Axum HTTP server with a room WebSocket endpoint,
//! message fan-out, metrics collection, and snapshot persistence.
//!
//! # Architecture
//!
//! The backend is organized into focused submodules:
//!
//! - **`server`** - Server initialization, application state, configuration
//! - **`routes`** - HTTP route configuration and router assembly
//! - **`rooms`** - Document snapshot store and presence tracking
//! - **`realtime`** - Connection hub, message dispatch, WebSocket endpoint
//! - **`metrics`** - Bounded counters, latency sampling, event log
//! - **`persistence`** - Snapshot storage gateway (SQLite)
//! - **`error`** - Backend-specific error types
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── server/         - Server initialization and state
//! ├── routes/         - Route configuration
//! ├── rooms/          - Snapshot store and presence
//! ├── realtime/       - Hub, sync engine, WebSocket handler
//! ├── metrics/        - Metrics collector and handlers
//! ├── persistence/    - Storage gateway
//! └── error/          - Error types
//! ```
//!
//! # Concurrency Model
//!
//! Each room's shared maps live behind their owning component
//! (`RoomStore`, `PresenceTracker`, `ConnectionHub`), never exposed raw.
//! The sync engine serializes mutate-then-broadcast turns per room with a
//! per-room mutex, so no connection can observe a torn update. Rooms are
//! independent units of mutation; there is no cross-room coordination.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Room snapshot store and presence tracking
pub mod rooms;

/// Connection hub, sync engine, and WebSocket endpoint
pub mod realtime;

/// Metrics collection
pub mod metrics;

/// Snapshot persistence gateway
pub mod persistence;

/// Backend error types
pub mod error;

/// Re-export commonly used types
pub use error::HubError;
pub use metrics::MetricsCollector;
pub use realtime::{ConnectionHub, SyncEngine};
pub use rooms::{PresenceTracker, RoomStore, UpdateMode};
pub use server::init::create_app;
