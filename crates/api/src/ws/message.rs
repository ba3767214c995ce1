//! Wire format of pushed snapshots.

use axum::extract::ws::Message;
use serde::Serialize;
use solar_core::plant::Plant;
use solar_core::quote::Quote;
use solar_core::views::PlantView;
use solar_events::Collection;

/// `{"type":"snapshot","collection":"quotes"|"plants","data":[...]}`
#[derive(Debug, Serialize)]
pub struct SnapshotMessage<T: Serialize> {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub collection: Collection,
    pub data: T,
}

impl<'a> SnapshotMessage<&'a [Quote]> {
    pub fn quotes(quotes: &'a [Quote]) -> Self {
        Self {
            kind: "snapshot",
            collection: Collection::Quotes,
            data: quotes,
        }
    }
}

impl SnapshotMessage<Vec<PlantView>> {
    /// Plants are pushed with their derived progress.
    pub fn plants(plants: &[Plant]) -> Self {
        Self {
            kind: "snapshot",
            collection: Collection::Plants,
            data: plants.iter().map(PlantView::from).collect(),
        }
    }
}

impl<T: Serialize> SnapshotMessage<T> {
    /// Encode as a text frame. Returns `None` (and logs) if serialization fails.
    pub fn to_message(&self) -> Option<Message> {
        match serde_json::to_string(self) {
            Ok(text) => Some(Message::Text(text.into())),
            Err(e) => {
                tracing::error!(error = %e, collection = %self.collection, "Failed to encode snapshot");
                None
            }
        }
    }
}
