//! Metrics Module
//!
//! Bounded instrumentation for the hub: monotonic counters, a capped
//! latency sample buffer for percentile reporting, per-room document size
//! gauges, and a ring-buffered event log.
//!
//! # Module Structure
//!
//! ```text
//! metrics/
//! ├── mod.rs       - Module exports and documentation
//! ├── collector.rs - MetricsCollector and snapshot types
//! └── handlers.rs  - REST handlers for /api/metrics
//! ```
//!
//! # Resource Control
//!
//! Every buffer in this module has a fixed capacity and evicts oldest
//! entries first: 100 events, 1000 latency samples. Counters and gauges are
//! scalar. The collector can never grow without bound no matter how long
//! the hub runs.

/// Metrics collector and snapshot types
pub mod collector;

/// REST handlers for the metrics endpoints
pub mod handlers;

// Re-export commonly used types
pub use collector::{MetricEvent, MetricsCollector, MetricsSnapshot};
