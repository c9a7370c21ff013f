/**
 * Metrics REST Handlers
 *
 * Read-only views over the metrics collector:
 * - `GET /api/metrics` - Aggregate stats snapshot
 * - `GET /api/metrics/events?limit=N` - Recent lifecycle events
 */

use crate::backend::metrics::collector::{MetricEvent, MetricsCollector, MetricsSnapshot};
use crate::backend::server::state::AppState;
use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

/// Query parameters for the events endpoint
#[derive(Debug, Deserialize)]
pub struct EventsQuery {
    /// Maximum number of events to return (default 50)
    pub limit: Option<usize>,
}

/// Handle `GET /api/metrics`
///
/// Connection and room counts come from the hub registry; everything else
/// from the collector.
pub async fn get_metrics(State(state): State<AppState>) -> Json<MetricsSnapshot> {
    let active_connections = state.hub.total_connections().await;
    let rooms_active = state.hub.active_rooms().await;
    Json(state.metrics.get_stats(active_connections, rooms_active))
}

/// Handle `GET /api/metrics/events?limit=N`
pub async fn get_metric_events(
    State(metrics): State<Arc<MetricsCollector>>,
    Query(query): Query<EventsQuery>,
) -> Json<Vec<MetricEvent>> {
    let limit = query.limit.unwrap_or(50);
    Json(metrics.get_events(limit))
}
