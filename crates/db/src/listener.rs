//! Bridge from PostgreSQL `NOTIFY` into the in-process [`EventBus`].
//!
//! Mutations on [`PgStore`](crate::PgStore) notify on
//! [`CHANGES_CHANNEL`]; this task turns each payload back into a
//! [`ChangeEvent`] so that every server instance sharing the database
//! refreshes its snapshots.

use std::sync::Arc;
use std::time::Duration;

use solar_events::{ChangeEvent, ChangeKind, Collection, EventBus};
use sqlx::postgres::PgListener;
use tokio::task::JoinHandle;

use crate::repositories::CHANGES_CHANNEL;
use crate::DbPool;

/// Wait before re-establishing a failed listener connection.
const RETRY_DELAY: Duration = Duration::from_secs(5);

/// Spawn the notification bridge.
///
/// The task runs until aborted. Whenever notifications may have been missed
/// (initial connect, dropped connection, undecodable payload) a reload event
/// is published for both collections.
pub fn listen_for_changes(pool: DbPool, bus: Arc<EventBus>) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            if let Err(e) = run(&pool, &bus).await {
                tracing::error!(error = %e, "Change listener failed, retrying");
                publish_reload(&bus);
                tokio::time::sleep(RETRY_DELAY).await;
            }
        }
    })
}

async fn run(pool: &DbPool, bus: &EventBus) -> Result<(), sqlx::Error> {
    let mut listener = PgListener::connect_with(pool).await?;
    listener.listen(CHANGES_CHANNEL).await?;
    tracing::info!(channel = CHANGES_CHANNEL, "Listening for store changes");
    publish_reload(bus);

    loop {
        // `None` means the connection was lost; the next call reconnects.
        match listener.try_recv().await? {
            Some(notification) => {
                match serde_json::from_str::<ChangeEvent>(notification.payload()) {
                    Ok(event) => bus.publish(event),
                    Err(e) => {
                        tracing::warn!(
                            error = %e,
                            payload = notification.payload(),
                            "Undecodable change notification"
                        );
                        publish_reload(bus);
                    }
                }
            }
            None => {
                tracing::warn!("Change listener connection lost, reconnecting");
                publish_reload(bus);
            }
        }
    }
}

fn publish_reload(bus: &EventBus) {
    for collection in Collection::ALL {
        bus.publish(ChangeEvent::new(collection, ChangeKind::Updated));
    }
}
