//! Rooms Module
//!
//! Per-room authoritative state: the document snapshot store and the
//! presence tracker, plus the REST handlers for room views, snapshot
//! persistence, and load simulation.
//!
//! # Module Structure
//!
//! ```text
//! rooms/
//! ├── mod.rs      - Module exports and documentation
//! ├── store.rs    - RoomStore (document snapshots)
//! ├── presence.rs - PresenceTracker (per-room user metadata)
//! └── handlers.rs - REST handlers for /api/rooms and /api/simulate
//! ```
//!
//! # Ownership
//!
//! `RoomStore` exclusively owns document snapshots; `PresenceTracker`
//! exclusively owns presence entries. Neither map is exposed raw - all
//! access goes through the owning component's API. Presence survives
//! independently of document state: removing a user never touches the
//! snapshot.

/// Document snapshot store
pub mod store;

/// Per-room presence tracking
pub mod presence;

/// REST handlers for room and simulation endpoints
pub mod handlers;

// Re-export commonly used types
pub use presence::PresenceTracker;
pub use store::{RoomStore, UpdateMode};
