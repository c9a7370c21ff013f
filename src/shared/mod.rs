//! Shared Module
//!
//! This module contains types that are shared between the WebSocket wire
//! protocol and the REST API surface. All types are designed for JSON
//! serialization and transmission over HTTP.

/// Wire protocol messages and presence records
pub mod protocol;

/// Re-export commonly used types for convenience
pub use protocol::{ClientMessage, ServerMessage, UserPresence, RoomInfo};
