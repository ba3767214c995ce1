//! `WsManager` and snapshot subscription tests.
//!
//! These exercise the connection manager and the push path directly,
//! without performing any HTTP upgrades.

mod common;

use std::time::Duration;

use axum::extract::ws::Message;
use serde_json::json;
use solar_api::state::AppState;
use solar_api::ws::{SnapshotSubscription, WsManager};
use solar_core::quote::CreateQuote;

fn text_json(message: Message) -> serde_json::Value {
    match message {
        Message::Text(text) => serde_json::from_str(text.as_str()).unwrap(),
        other => panic!("expected a text frame, got {other:?}"),
    }
}

/// Wait until the feed has published a quotes snapshot of `len` rows.
async fn wait_for_quotes(state: &AppState, len: usize) {
    let mut quotes = state.feed.quotes();
    tokio::time::timeout(Duration::from_secs(2), quotes.wait_for(|q| q.len() == len))
        .await
        .expect("feed should catch up in time")
        .expect("feed should still be running");
}

// ---------------------------------------------------------------------------
// WsManager
// ---------------------------------------------------------------------------

#[tokio::test]
async fn add_and_remove_track_connection_count() {
    let manager = WsManager::new();
    assert_eq!(manager.connection_count().await, 0);

    let _rx = manager.add("conn-1".to_string()).await;
    assert_eq!(manager.connection_count().await, 1);

    manager.remove("nonexistent").await;
    assert_eq!(manager.connection_count().await, 1);

    manager.remove("conn-1").await;
    assert_eq!(manager.connection_count().await, 0);
}

#[tokio::test]
async fn shutdown_all_sends_close_and_clears() {
    let manager = WsManager::new();
    let mut rx = manager.add("conn-1".to_string()).await;

    manager.shutdown_all().await;

    assert!(matches!(rx.recv().await, Some(Message::Close(None))));
    assert_eq!(manager.connection_count().await, 0);
}

// ---------------------------------------------------------------------------
// Snapshot subscription
// ---------------------------------------------------------------------------

fn quote_input(name: &str) -> CreateQuote {
    CreateQuote {
        client_name: name.to_string(),
        kwh: Some(10.0),
        budget_value: Some(100.0),
        ..Default::default()
    }
}

async fn next_snapshot(subscription: &mut SnapshotSubscription) -> serde_json::Value {
    let message = tokio::time::timeout(Duration::from_secs(2), subscription.next())
        .await
        .expect("snapshot should arrive in time")
        .expect("feed should still be running");
    text_json(message)
}

#[tokio::test]
async fn subscription_starts_with_current_snapshots() {
    let state = common::test_state().await;
    let quote = state.lifecycle.create_quote(quote_input("Ana")).await.unwrap();
    wait_for_quotes(&state, 1).await;

    let mut subscription = SnapshotSubscription::new(&state.feed);

    let first = next_snapshot(&mut subscription).await;
    assert_eq!(first["type"], "snapshot");
    assert_eq!(first["collection"], "quotes");
    assert_eq!(first["data"][0]["id"], json!(quote.id));

    let second = next_snapshot(&mut subscription).await;
    assert_eq!(second["collection"], "plants");
    assert_eq!(second["data"], json!([]));
}

#[tokio::test]
async fn writes_are_pushed_as_full_snapshots() {
    let state = common::test_state().await;
    let mut subscription = SnapshotSubscription::new(&state.feed);
    next_snapshot(&mut subscription).await;
    next_snapshot(&mut subscription).await;

    let quote = state.lifecycle.create_quote(quote_input("Ana")).await.unwrap();

    let pushed = next_snapshot(&mut subscription).await;
    assert_eq!(pushed["collection"], "quotes");
    assert_eq!(pushed["data"][0]["id"], json!(quote.id));

    state.lifecycle.approve_quote(&quote.id).await.unwrap();

    // Both collections change; wait until each has been pushed once.
    let mut seen_quotes_empty = false;
    let mut seen_plant = false;
    while !(seen_quotes_empty && seen_plant) {
        let pushed = next_snapshot(&mut subscription).await;
        match pushed["collection"].as_str() {
            Some("quotes") => seen_quotes_empty |= pushed["data"] == json!([]),
            Some("plants") => {
                seen_plant |= pushed["data"][0]["clientName"] == "Ana"
                    && pushed["data"][0]["progress"] == 0
            }
            other => panic!("unexpected collection {other:?}"),
        }
    }
}

#[tokio::test]
async fn writes_before_the_first_read_are_never_followed_by_older_snapshots() {
    let state = common::test_state().await;
    let mut subscription = SnapshotSubscription::new(&state.feed);

    // The feed moves on before the connection reads anything.
    state.lifecycle.create_quote(quote_input("Ana")).await.unwrap();
    wait_for_quotes(&state, 1).await;
    state.lifecycle.create_quote(quote_input("Bia")).await.unwrap();
    wait_for_quotes(&state, 2).await;

    let mut last_quotes_len = 0;
    loop {
        let pushed = tokio::time::timeout(Duration::from_millis(200), subscription.next()).await;
        let Ok(Some(message)) = pushed else { break };
        let pushed = text_json(message);
        if pushed["collection"] == "quotes" {
            let len = pushed["data"].as_array().map_or(0, Vec::len);
            assert!(len >= last_quotes_len, "received an older quotes snapshot");
            last_quotes_len = len;
        }
    }
    assert_eq!(last_quotes_len, 2);
}
