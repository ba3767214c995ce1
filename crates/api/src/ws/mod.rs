//! WebSocket snapshot push.
//!
//! Provides connection management, heartbeat monitoring, the HTTP upgrade
//! handler and the per-connection snapshot subscription.

mod handler;
mod heartbeat;
pub mod manager;
pub mod message;
pub mod subscription;

pub use handler::ws_handler;
pub use heartbeat::start_heartbeat;
pub use manager::WsManager;
pub use message::SnapshotMessage;
pub use subscription::SnapshotSubscription;
