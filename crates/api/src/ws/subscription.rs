use axum::extract::ws::Message;
use solar_core::plant::Plant;
use solar_core::quote::Quote;
use solar_db::{Snapshot, SnapshotFeed};
use tokio::sync::watch;

use crate::ws::message::SnapshotMessage;

/// One connection's view of the snapshot feed.
///
/// Yields the current quotes and plants snapshots first, then every later
/// change, all from the same pair of watch receivers. A snapshot is never
/// followed by an older one. Intermediate snapshots may be skipped when
/// writes arrive faster than the client drains them.
pub struct SnapshotSubscription {
    quotes: watch::Receiver<Snapshot<Quote>>,
    plants: watch::Receiver<Snapshot<Plant>>,
    quotes_pending: bool,
    plants_pending: bool,
}

impl SnapshotSubscription {
    pub fn new(feed: &SnapshotFeed) -> Self {
        Self {
            quotes: feed.quotes(),
            plants: feed.plants(),
            quotes_pending: true,
            plants_pending: true,
        }
    }

    /// Next frame to push, or `None` once the feed has stopped.
    ///
    /// Cancel-safe: dropping the future before it completes loses nothing.
    pub async fn next(&mut self) -> Option<Message> {
        loop {
            let message = if self.quotes_pending {
                self.quotes_pending = false;
                self.encode_quotes()
            } else if self.plants_pending {
                self.plants_pending = false;
                self.encode_plants()
            } else {
                tokio::select! {
                    changed = self.quotes.changed() => {
                        changed.ok()?;
                        self.encode_quotes()
                    }
                    changed = self.plants.changed() => {
                        changed.ok()?;
                        self.encode_plants()
                    }
                }
            };
            if message.is_some() {
                return message;
            }
        }
    }

    fn encode_quotes(&mut self) -> Option<Message> {
        let snapshot = self.quotes.borrow_and_update().clone();
        SnapshotMessage::quotes(&snapshot).to_message()
    }

    fn encode_plants(&mut self) -> Option<Message> {
        let snapshot = self.plants.borrow_and_update().clone();
        SnapshotMessage::plants(&snapshot).to_message()
    }
}
