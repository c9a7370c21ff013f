//! Backend Error Module
//!
//! This module defines error types specific to the hub backend.
//! These errors are used in WebSocket dispatch and HTTP handlers and can
//! be converted to HTTP responses.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - Error type definitions
//! └── conversion.rs - Error conversion implementations
//! ```
//!
//! # Error Taxonomy
//!
//! - `Protocol` - Malformed inbound frame; recoverable, answered with a
//!   direct error reply while the connection stays open
//! - `Delivery` - Send to one peer failed; recoverable, triggers a deferred
//!   disconnect of that peer only
//! - `ConnectionFatal` - Any other failure while servicing a connection;
//!   terminates that connection only
//! - `Storage` - Persistence gateway failure; surfaced to the REST caller
//!   as a structured failure response, never crashes the hub
//!
//! No single connection's failure is allowed to affect any other
//! connection's liveness or any room's document integrity.

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

// Re-export commonly used types
pub use types::HubError;
