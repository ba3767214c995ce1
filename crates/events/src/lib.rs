//! Solar Control change bus.
//!
//! [`EventBus`] is the in-process publish/subscribe hub for
//! [`ChangeEvent`]s. Stores publish an event after every successful
//! mutation; the snapshot feed listens and reloads the affected collection.

pub mod bus;

pub use bus::{ChangeEvent, ChangeKind, Collection, EventBus};
