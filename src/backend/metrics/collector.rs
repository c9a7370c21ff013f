/**
 * Metrics Collector
 *
 * Tracks hub health: message throughput, latency percentiles, error and
 * reconnect counters, per-room document sizes, and a bounded log of
 * lifecycle events.
 *
 * # Percentile Convention
 *
 * p50/p95 are computed by sorting the current latency buffer and indexing
 * at `floor(n * 0.50)` / `floor(n * 0.95)` (0 when the buffer is empty).
 * This index-floor convention is part of the reported output shape; do not
 * replace it with interpolating percentiles.
 *
 * # Thread Safety
 *
 * All mutable state lives behind a single `std::sync::Mutex`; every
 * recording method is a short synchronous critical section, safe to call
 * from any async task without holding the lock across an await.
 */

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Instant;
use uuid::Uuid;

/// Maximum retained lifecycle events, oldest evicted first
const MAX_EVENTS: usize = 100;

/// Maximum retained latency samples, oldest evicted first
const MAX_LATENCIES: usize = 1000;

/// Immutable lifecycle event record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricEvent {
    pub id: String,
    /// UTC timestamp, RFC 3339
    pub timestamp: String,
    #[serde(rename = "type")]
    pub event_type: String,
    pub room_id: String,
    pub user_id: String,
    pub details: String,
}

/// Aggregate stats shape returned by `GET /api/metrics`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub active_connections: usize,
    pub messages_per_sec: f64,
    pub p50_latency_ms: f64,
    pub p95_latency_ms: f64,
    pub error_count: u64,
    pub reconnect_count: u64,
    pub total_doc_size_bytes: usize,
    pub uptime_seconds: f64,
    pub total_messages: u64,
    pub rooms_active: usize,
}

#[derive(Debug, Default)]
struct MetricsInner {
    message_count: u64,
    error_count: u64,
    reconnect_count: u64,
    latencies: VecDeque<f64>,
    doc_sizes: HashMap<String, usize>,
    events: VecDeque<MetricEvent>,
}

/// Bounded metrics collector shared across the hub
#[derive(Debug)]
pub struct MetricsCollector {
    start_time: Instant,
    inner: Mutex<MetricsInner>,
}

impl MetricsCollector {
    /// Create a collector with its uptime clock started now
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            inner: Mutex::new(MetricsInner::default()),
        }
    }

    /// Count one handled message; sample its latency when positive
    pub fn record_message(&self, latency_ms: f64) {
        let mut inner = self.inner.lock().unwrap();
        inner.message_count += 1;
        if latency_ms > 0.0 {
            inner.latencies.push_back(latency_ms);
            while inner.latencies.len() > MAX_LATENCIES {
                inner.latencies.pop_front();
            }
        }
    }

    /// Count one error (protocol or dispatch failure)
    pub fn record_error(&self) {
        self.inner.lock().unwrap().error_count += 1;
    }

    /// Count one client reconnect
    pub fn record_reconnect(&self) {
        self.inner.lock().unwrap().reconnect_count += 1;
    }

    /// Last-write-wins document size gauge per room
    pub fn record_doc_size(&self, room_id: &str, size: usize) {
        self.inner
            .lock()
            .unwrap()
            .doc_sizes
            .insert(room_id.to_string(), size);
    }

    /// Append a lifecycle event to the bounded event log
    pub fn add_event(&self, event_type: &str, room_id: &str, user_id: &str, details: &str) {
        let event = MetricEvent {
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now().to_rfc3339(),
            event_type: event_type.to_string(),
            room_id: room_id.to_string(),
            user_id: user_id.to_string(),
            details: details.to_string(),
        };

        let mut inner = self.inner.lock().unwrap();
        inner.events.push_back(event);
        while inner.events.len() > MAX_EVENTS {
            inner.events.pop_front();
        }
    }

    /// Compute the aggregate stats snapshot
    ///
    /// Connection and room counts are owned by the hub registry, so the
    /// caller supplies them.
    pub fn get_stats(&self, active_connections: usize, rooms_active: usize) -> MetricsSnapshot {
        let inner = self.inner.lock().unwrap();

        let uptime = self.start_time.elapsed().as_secs_f64();
        let messages_per_sec = if uptime > 0.0 {
            inner.message_count as f64 / uptime
        } else {
            0.0
        };

        let (p50_latency, p95_latency) = if inner.latencies.is_empty() {
            (0.0, 0.0)
        } else {
            let mut sorted: Vec<f64> = inner.latencies.iter().copied().collect();
            sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());
            let p50_idx = (sorted.len() as f64 * 0.5) as usize;
            let p95_idx = (sorted.len() as f64 * 0.95) as usize;
            (
                sorted.get(p50_idx).copied().unwrap_or(0.0),
                sorted.get(p95_idx).copied().unwrap_or(0.0),
            )
        };

        let total_doc_size = inner.doc_sizes.values().sum();

        MetricsSnapshot {
            active_connections,
            messages_per_sec: round2(messages_per_sec),
            p50_latency_ms: round2(p50_latency),
            p95_latency_ms: round2(p95_latency),
            error_count: inner.error_count,
            reconnect_count: inner.reconnect_count,
            total_doc_size_bytes: total_doc_size,
            uptime_seconds: uptime.round(),
            total_messages: inner.message_count,
            rooms_active,
        }
    }

    /// Return the most recent `limit` events, oldest-first within the window
    pub fn get_events(&self, limit: usize) -> Vec<MetricEvent> {
        let inner = self.inner.lock().unwrap();
        let skip = inner.events.len().saturating_sub(limit);
        inner.events.iter().skip(skip).cloned().collect()
    }
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new()
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
