/**
 * Application State Management
 *
 * This module defines the application state structure and the `FromRef`
 * implementations for Axum state extraction.
 *
 * # Architecture
 *
 * `AppState` is the central state container, holding the hub's components
 * and the optional persistence gateway. Every component is behind an `Arc`
 * so handlers and connection tasks share the same instances.
 *
 * # Ownership
 *
 * Each shared map lives inside exactly one component: snapshots in
 * `RoomStore`, presence in `PresenceTracker`, the endpoint registry in
 * `ConnectionHub`. Nothing outside a component touches its map directly.
 */

use crate::backend::metrics::MetricsCollector;
use crate::backend::persistence::PersistenceGateway;
use crate::backend::realtime::{ConnectionHub, SyncEngine};
use crate::backend::rooms::{PresenceTracker, RoomStore};
use crate::backend::server::config::ServerConfig;
use axum::extract::FromRef;
use std::sync::Arc;

/// Application state shared by all handlers and connection tasks
#[derive(Clone)]
pub struct AppState {
    /// Bounded metrics collector
    pub metrics: Arc<MetricsCollector>,

    /// Per-room presence entries
    pub presence: Arc<PresenceTracker>,

    /// Per-room document snapshots
    pub store: Arc<RoomStore>,

    /// Connection registry and broadcast fan-out
    pub hub: Arc<ConnectionHub>,

    /// Protocol dispatcher
    pub sync: Arc<SyncEngine>,

    /// Snapshot persistence gateway
    ///
    /// `None` when no database is configured; the persist/load endpoints
    /// answer with a structured failure in that case.
    pub gateway: Option<Arc<dyn PersistenceGateway>>,

    /// Runtime configuration
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Wire up all components for one hub instance
    pub fn new(config: Arc<ServerConfig>, gateway: Option<Arc<dyn PersistenceGateway>>) -> Self {
        let metrics = Arc::new(MetricsCollector::new());
        let presence = Arc::new(PresenceTracker::new());
        let store = Arc::new(RoomStore::new(config.update_mode));
        let hub = Arc::new(ConnectionHub::new(presence.clone(), metrics.clone()));
        let sync = Arc::new(SyncEngine::new(
            hub.clone(),
            store.clone(),
            presence.clone(),
            metrics.clone(),
        ));

        Self {
            metrics,
            presence,
            store,
            hub,
            sync,
            gateway,
            config,
        }
    }
}

/// Allow handlers to extract the metrics collector directly
impl FromRef<AppState> for Arc<MetricsCollector> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.metrics.clone()
    }
}
