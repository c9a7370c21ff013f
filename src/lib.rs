//! ConcurrencyPad - Main Library
//!
//! ConcurrencyPad is a real-time fan-out hub for collaborative editing
//! sessions, built on Axum and Tokio. Clients connect to a room over a
//! WebSocket, exchange presence and document-update messages, and the hub
//! rebroadcasts them to every other participant in the same room while
//! tracking aggregate health metrics.
//!
//! # Overview
//!
//! This library provides the core functionality for the hub, including:
//! - Per-room connection registry with exclusion-aware fan-out broadcast
//! - A type-tagged message dispatch protocol (join, cursor, selection,
//!   awareness, sync, update, ping)
//! - Append-mode document snapshots per room
//! - Bounded metrics collection (counters, latency percentiles, event log)
//! - Snapshot persistence through an opaque storage gateway (SQLite)
//!
//! # Module Structure
//!
//! The library is organized into two main modules:
//!
//! - **`shared`** - Types shared between the wire protocol and the REST
//!   surface: message enums, presence records, room views
//!
//! - **`backend`** - The server itself
//!   - Axum HTTP server with the WebSocket endpoint and REST routes
//!   - Room, presence, and connection state management
//!   - Metrics collection and the load-simulation interface
//!   - Snapshot persistence via sqlx/SQLite
//!
//! # Usage
//!
//! ```rust,no_run
//! use concurrencypad::backend::server::init::create_app;
//! use concurrencypad::backend::server::config::ServerConfig;
//!
//! # async fn example() {
//! let config = ServerConfig::from_env();
//! let app = create_app(config).await;
//! // Use app with an Axum server
//! # }
//! ```

pub mod shared;
pub mod backend;
