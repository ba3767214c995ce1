#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{HeaderValue, Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use solar_api::config::{LogFormat, ServerConfig, StoreBackend};
use solar_api::router::build_app_router;
use solar_api::state::AppState;
use solar_db::{DocumentStore, MemoryStore};
use solar_events::EventBus;

/// Build a test `ServerConfig` with safe defaults and the in-memory store.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec![HeaderValue::from_static("http://localhost:5173")],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        store_backend: StoreBackend::Memory,
        database_url: None,
        db_max_connections: 1,
        log_format: LogFormat::Pretty,
    }
}

/// Application state over a fresh in-memory store.
pub async fn test_state() -> AppState {
    let bus = Arc::new(EventBus::default());
    let store: Arc<dyn DocumentStore> = Arc::new(MemoryStore::new(Arc::clone(&bus)));
    state_with_store(store, &bus).await
}

pub async fn state_with_store(store: Arc<dyn DocumentStore>, bus: &EventBus) -> AppState {
    AppState::new(test_config(), store, bus)
        .await
        .expect("test state should start")
}

/// Build the full application router over a fresh in-memory store.
///
/// The router is `Clone`; clone it once per request.
pub async fn build_test_app() -> Router {
    build_app_router(test_state().await)
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn post_empty(app: Router, uri: &str) -> Response {
    send(app, Method::POST, uri, None).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn delete(app: Router, uri: &str) -> Response {
    send(app, Method::DELETE, uri, None).await
}

async fn send(app: Router, method: Method, uri: &str, body: Option<serde_json::Value>) -> Response {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Create a quote through the API and return its `data` object.
pub async fn create_quote(app: &Router, body: serde_json::Value) -> serde_json::Value {
    let response = post_json(app.clone(), "/api/v1/quotes", body).await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["data"].clone()
}

/// Create and approve a quote, returning the plant's `data` object.
pub async fn create_plant(app: &Router, client_name: &str) -> serde_json::Value {
    let quote = create_quote(
        app,
        serde_json::json!({"clientName": client_name, "kwh": 100, "budgetValue": 5000}),
    )
    .await;
    let id = quote["id"].as_str().unwrap();
    let response = post_empty(app.clone(), &format!("/api/v1/quotes/{id}/approve")).await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["data"].clone()
}
