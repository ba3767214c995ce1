use std::sync::Arc;

use solar_db::{DocumentStore, LifecycleService, SnapshotFeed, StoreResult};
use solar_events::EventBus;

use crate::config::ServerConfig;
use crate::ws::WsManager;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: everything is behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    /// Quote and plant operations over the configured store.
    pub lifecycle: LifecycleService,
    /// Latest snapshot of each collection, pushed to WebSocket clients.
    pub feed: Arc<SnapshotFeed>,
    /// WebSocket connection manager (browser clients).
    pub ws_manager: Arc<WsManager>,
}

impl AppState {
    /// Wire the lifecycle service and start the snapshot feed over `store`.
    pub async fn new(
        config: ServerConfig,
        store: Arc<dyn DocumentStore>,
        bus: &EventBus,
    ) -> StoreResult<Self> {
        let feed = SnapshotFeed::start(Arc::clone(&store), bus).await?;
        Ok(Self {
            config: Arc::new(config),
            lifecycle: LifecycleService::new(store),
            feed,
            ws_manager: Arc::new(WsManager::new()),
        })
    }

    pub fn store(&self) -> &Arc<dyn DocumentStore> {
        self.lifecycle.store()
    }
}
