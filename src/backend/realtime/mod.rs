//! Realtime Module
//!
//! The heart of the hub: the per-room connection registry with
//! exclusion-aware fan-out, the protocol dispatcher, and the WebSocket
//! endpoint that ties them to a live connection.
//!
//! # Module Structure
//!
//! ```text
//! realtime/
//! ├── mod.rs    - Module exports and documentation
//! ├── hub.rs    - ConnectionHub (registry + broadcast)
//! ├── sync.rs   - SyncEngine (message dispatch)
//! └── socket.rs - WebSocket endpoint and per-connection loop
//! ```
//!
//! # Connection Lifecycle
//!
//! ```text
//! Disconnected -> Connecting -> Joined -> Receiving <-> Dispatching -> ... -> Disconnected
//! ```
//!
//! `Connecting` ends with an initial push of the current snapshot (if any)
//! and the presence list. Malformed frames during `Receiving` get a direct
//! error reply and the loop continues; any other dispatch failure, or a
//! peer-initiated close, is terminal. On the terminal transition the hub
//! always deregisters the connection and best-effort broadcasts
//! `user_left`.
//!
//! # Failure Isolation
//!
//! Outbound delivery goes through an unbounded channel per connection; the
//! socket writer task drains it with a bounded send timeout. A slow or
//! broken peer therefore never blocks a broadcast pass - its channel
//! closes, the failed send is collected, and the peer is disconnected
//! after the fan-out completes.

/// Connection registry and broadcast fan-out
pub mod hub;

/// Protocol message dispatch
pub mod sync;

/// WebSocket endpoint
pub mod socket;

// Re-export commonly used types
pub use hub::{ClientSender, ConnectionHub, Frame};
pub use socket::websocket_endpoint;
pub use sync::SyncEngine;
