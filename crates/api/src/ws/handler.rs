use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};

use crate::state::AppState;
use crate::ws::subscription::SnapshotSubscription;

/// GET /api/v1/ws -- upgrade to a snapshot push connection.
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Manage a single WebSocket connection after upgrade.
///
/// 1. Registers the connection with `WsManager` for pings and shutdown.
/// 2. Spawns a sender task that pushes the current snapshots, then every
///    later one, interleaved with frames queued by the manager.
/// 3. Drains inbound frames until the client goes away, then cleans up.
async fn handle_socket(socket: WebSocket, state: AppState) {
    let ws_manager = state.ws_manager;
    let conn_id = uuid::Uuid::new_v4().to_string();
    tracing::info!(conn_id = %conn_id, "WebSocket connected");

    let mut rx = ws_manager.add(conn_id.clone()).await;
    let mut snapshots = SnapshotSubscription::new(&state.feed);

    let (mut sink, mut stream) = socket.split();

    let sender_conn_id = conn_id.clone();
    let send_task = tokio::spawn(async move {
        loop {
            let message = tokio::select! {
                biased;
                queued = rx.recv() => match queued {
                    Some(message) => message,
                    None => break,
                },
                snapshot = snapshots.next() => match snapshot {
                    Some(message) => message,
                    None => {
                        tracing::debug!(conn_id = %sender_conn_id, "Snapshot feed stopped");
                        break;
                    }
                },
            };
            let closing = matches!(message, Message::Close(_));
            if sink.send(message).await.is_err() {
                tracing::debug!(conn_id = %sender_conn_id, "WebSocket sink closed");
                break;
            }
            if closing {
                break;
            }
        }
    });

    // The push channel is one-way; inbound frames other than Close are ignored.
    while let Some(result) = stream.next().await {
        match result {
            Ok(Message::Close(_)) => break,
            Ok(Message::Pong(_)) => {
                tracing::trace!(conn_id = %conn_id, "Pong received");
            }
            Ok(_) => {}
            Err(e) => {
                tracing::debug!(conn_id = %conn_id, error = %e, "WebSocket receive error");
                break;
            }
        }
    }

    ws_manager.remove(&conn_id).await;
    send_task.abort();
    tracing::info!(conn_id = %conn_id, "WebSocket disconnected");
}
