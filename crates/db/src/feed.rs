//! Live, ordered snapshots of both collections.
//!
//! [`SnapshotFeed`] keeps the last snapshot of each collection in a
//! `tokio::sync::watch` channel and re-reads a collection from the store
//! every time a [`ChangeEvent`] for it arrives on the [`EventBus`].
//! Subscribers always see the complete ordered collection, never a diff.

use std::sync::Arc;

use solar_core::plant::Plant;
use solar_core::quote::Quote;
use solar_events::{Collection, EventBus};
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;

use crate::error::StoreResult;
use crate::store::DocumentStore;

/// The full ordered contents of one collection.
pub type Snapshot<T> = Arc<Vec<T>>;

struct Channels {
    quotes: watch::Sender<Snapshot<Quote>>,
    plants: watch::Sender<Snapshot<Plant>>,
}

impl Channels {
    async fn reload(&self, store: &dyn DocumentStore, collection: Collection) -> StoreResult<()> {
        match collection {
            Collection::Quotes => {
                let quotes = store.list_quotes().await?;
                tracing::debug!(count = quotes.len(), "Quotes snapshot refreshed");
                self.quotes.send_replace(Arc::new(quotes));
            }
            Collection::Plants => {
                let plants = store.list_plants().await?;
                tracing::debug!(count = plants.len(), "Plants snapshot refreshed");
                self.plants.send_replace(Arc::new(plants));
            }
        }
        Ok(())
    }

    async fn reload_logged(&self, store: &dyn DocumentStore, collection: Collection) {
        if let Err(e) = self.reload(store, collection).await {
            tracing::error!(
                error = %e,
                collection = %collection,
                "Snapshot reload failed, keeping previous snapshot"
            );
        }
    }
}

pub struct SnapshotFeed {
    channels: Arc<Channels>,
    task: JoinHandle<()>,
}

impl SnapshotFeed {
    /// Load both collections and start following the bus.
    ///
    /// The bus subscription is taken before the initial load so that no
    /// write between the two is missed.
    pub async fn start(store: Arc<dyn DocumentStore>, bus: &EventBus) -> StoreResult<Arc<Self>> {
        let mut receiver = bus.subscribe();

        let quotes = store.list_quotes().await?;
        let plants = store.list_plants().await?;
        tracing::info!(
            backend = store.backend(),
            quotes = quotes.len(),
            plants = plants.len(),
            "Snapshot feed started"
        );

        let channels = Arc::new(Channels {
            quotes: watch::channel(Arc::new(quotes)).0,
            plants: watch::channel(Arc::new(plants)).0,
        });

        let task_channels = Arc::clone(&channels);
        let task = tokio::spawn(async move {
            loop {
                match receiver.recv().await {
                    Ok(event) => {
                        task_channels
                            .reload_logged(store.as_ref(), event.collection)
                            .await;
                    }
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        tracing::warn!(skipped = n, "Snapshot feed lagged, reloading everything");
                        for collection in Collection::ALL {
                            task_channels.reload_logged(store.as_ref(), collection).await;
                        }
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        tracing::info!("Event bus closed, snapshot feed stopping");
                        break;
                    }
                }
            }
        });

        Ok(Arc::new(Self { channels, task }))
    }

    /// Receiver for the quotes snapshot, newest first.
    pub fn quotes(&self) -> watch::Receiver<Snapshot<Quote>> {
        self.channels.quotes.subscribe()
    }

    /// Receiver for the plants snapshot, newest first.
    pub fn plants(&self) -> watch::Receiver<Snapshot<Plant>> {
        self.channels.plants.subscribe()
    }

    /// Invoke `callback` with the current quotes snapshot and again after
    /// every change. Abort the returned handle to unsubscribe.
    pub fn on_quotes<F>(&self, callback: F) -> JoinHandle<()>
    where
        F: Fn(Snapshot<Quote>) + Send + 'static,
    {
        observe(self.quotes(), callback)
    }

    /// Invoke `callback` with the current plants snapshot and again after
    /// every change. Abort the returned handle to unsubscribe.
    pub fn on_plants<F>(&self, callback: F) -> JoinHandle<()>
    where
        F: Fn(Snapshot<Plant>) + Send + 'static,
    {
        observe(self.plants(), callback)
    }
}

impl Drop for SnapshotFeed {
    fn drop(&mut self) {
        self.task.abort();
    }
}

fn observe<T, F>(mut receiver: watch::Receiver<Snapshot<T>>, callback: F) -> JoinHandle<()>
where
    T: Send + Sync + 'static,
    F: Fn(Snapshot<T>) + Send + 'static,
{
    tokio::spawn(async move {
        let current = receiver.borrow_and_update().clone();
        callback(current);
        while receiver.changed().await.is_ok() {
            let snapshot = receiver.borrow_and_update().clone();
            callback(snapshot);
        }
    })
}
