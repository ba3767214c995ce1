//! In-process change bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`EventBus`] is designed to be shared via `Arc<EventBus>` between the
//! store, the snapshot feed and the PostgreSQL notification bridge.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use solar_core::types::RecordId;
use tokio::sync::broadcast;

// ---------------------------------------------------------------------------
// Collection
// ---------------------------------------------------------------------------

/// The two shared collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Quotes,
    Plants,
}

impl Collection {
    pub const ALL: [Collection; 2] = [Collection::Quotes, Collection::Plants];

    pub fn as_str(self) -> &'static str {
        match self {
            Collection::Quotes => "quotes",
            Collection::Plants => "plants",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ChangeEvent
// ---------------------------------------------------------------------------

/// What happened to a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Created,
    Updated,
    Deleted,
}

/// A write to one of the collections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeEvent {
    pub collection: Collection,
    pub kind: ChangeKind,
    /// Affected record, when known.
    pub record_id: Option<RecordId>,
    /// When the change was observed (UTC).
    pub timestamp: DateTime<Utc>,
}

impl ChangeEvent {
    pub fn new(collection: Collection, kind: ChangeKind) -> Self {
        Self {
            collection,
            kind,
            record_id: None,
            timestamp: Utc::now(),
        }
    }

    /// Attach the affected record id.
    pub fn with_record(mut self, id: impl Into<RecordId>) -> Self {
        self.record_id = Some(id.into());
        self
    }

    pub fn created(collection: Collection, id: impl Into<RecordId>) -> Self {
        Self::new(collection, ChangeKind::Created).with_record(id)
    }

    pub fn updated(collection: Collection, id: impl Into<RecordId>) -> Self {
        Self::new(collection, ChangeKind::Updated).with_record(id)
    }

    pub fn deleted(collection: Collection, id: impl Into<RecordId>) -> Self {
        Self::new(collection, ChangeKind::Deleted).with_record(id)
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 1024;

/// In-process fan-out change bus.
///
/// # Usage
///
/// ```rust
/// use solar_events::bus::{ChangeEvent, Collection, EventBus};
///
/// let bus = EventBus::default();
/// let mut rx = bus.subscribe();
///
/// bus.publish(ChangeEvent::created(Collection::Quotes, "q-1"));
/// ```
pub struct EventBus {
    sender: broadcast::Sender<ChangeEvent>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full the oldest un-consumed events are dropped and
    /// slow receivers observe `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    ///
    /// Events published with no subscribers are dropped.
    pub fn publish(&self, event: ChangeEvent) {
        tracing::trace!(
            collection = %event.collection,
            kind = ?event.kind,
            record_id = ?event.record_id,
            "Publishing change event",
        );
        // A SendError only means there are zero receivers.
        let _ = self.sender.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
