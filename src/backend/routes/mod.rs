//! Route Configuration Module
//!
//! This module configures all HTTP routes for the hub server.
//! Routes are organized by functionality into focused submodules.
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs        - Module exports and documentation
//! ├── router.rs     - Main router creation
//! └── api_routes.rs - REST endpoint wiring
//! ```
//!
//! # Route Organization
//!
//! Routes are added in a specific order to ensure proper matching:
//!
//! 1. **WebSocket route** - The real-time endpoint
//! 2. **API routes** - Metrics, rooms, persistence, simulation
//! 3. **Fallback handler** - 404 errors
//!
//! # Route Types
//!
//! ## Real-time
//!
//! - `GET /api/ws/{room_id}` - WebSocket upgrade for one room
//!
//! ## API Routes
//!
//! - `GET /api/` - API banner
//! - `GET /api/health` - Liveness probe
//! - `GET /api/metrics` - Aggregate stats
//! - `GET /api/metrics/events` - Recent lifecycle events
//! - `GET /api/rooms` - Room directory
//! - `GET /api/rooms/{room_id}` - Single-room view
//! - `GET /api/rooms/{room_id}/users` - Presence list
//! - `POST /api/rooms/{room_id}/persist` - Persist snapshot
//! - `GET /api/rooms/{room_id}/load` - Load persisted snapshot
//! - `POST /api/simulate/users/{room_id}` - Inject synthetic users
//! - `DELETE /api/simulate/users/{room_id}` - Remove synthetic users

/// Main router creation
pub mod router;

/// REST endpoint wiring
pub mod api_routes;

// Re-export commonly used functions
pub use router::create_router;
