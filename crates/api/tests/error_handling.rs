//! `AppError` to HTTP response mapping, plus store failures surfacing
//! through the router.

mod common;

use std::sync::Arc;

use async_trait::async_trait;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use http_body_util::BodyExt;
use serde_json::json;
use solar_api::error::AppError;
use solar_api::router::build_app_router;
use solar_core::error::CoreError;
use solar_core::plant::Plant;
use solar_core::quote::{NewQuote, Quote};
use solar_core::status::{Milestone, PlantStatus};
use solar_db::{DocumentStore, StoreError, StoreResult};
use solar_events::EventBus;

async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

// ---------------------------------------------------------------------------
// Direct mapping
// ---------------------------------------------------------------------------

#[tokio::test]
async fn not_found_error_returns_404() {
    let err = AppError::Core(CoreError::NotFound {
        entity: "Plant",
        id: "p-1".to_string(),
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "Plant with id p-1 not found");
}

#[tokio::test]
async fn validation_error_inside_store_error_returns_400() {
    let err = AppError::from(StoreError::Core(CoreError::Validation(
        "clientName must not be empty".into(),
    )));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "clientName must not be empty");
}

#[tokio::test]
async fn database_error_returns_500_and_sanitizes_message() {
    let err = AppError::from(StoreError::Database(sqlx::Error::Protocol(
        "password authentication failed".into(),
    )));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert_eq!(json["error"], "An internal error occurred");
}

#[tokio::test]
async fn bad_request_error_returns_400() {
    let (status, json) = error_to_response(AppError::BadRequest("bad date".into())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "BAD_REQUEST");
}

// ---------------------------------------------------------------------------
// Through the router
// ---------------------------------------------------------------------------

/// Reads succeed with empty collections; every write and the health check
/// fail as if the database were gone.
struct UnavailableStore;

fn unavailable() -> StoreError {
    StoreError::Database(sqlx::Error::PoolTimedOut)
}

#[async_trait]
impl DocumentStore for UnavailableStore {
    fn backend(&self) -> &'static str {
        "unavailable"
    }

    async fn health_check(&self) -> StoreResult<()> {
        Err(unavailable())
    }

    async fn insert_quote(&self, _quote: NewQuote) -> StoreResult<Quote> {
        Err(unavailable())
    }

    async fn list_quotes(&self) -> StoreResult<Vec<Quote>> {
        Ok(Vec::new())
    }

    async fn find_quote(&self, _id: &str) -> StoreResult<Option<Quote>> {
        Ok(None)
    }

    async fn delete_quote(&self, _id: &str) -> StoreResult<bool> {
        Err(unavailable())
    }

    async fn promote_quote(&self, _id: &str) -> StoreResult<Option<Plant>> {
        Err(unavailable())
    }

    async fn list_plants(&self) -> StoreResult<Vec<Plant>> {
        Ok(Vec::new())
    }

    async fn find_plant(&self, _id: &str) -> StoreResult<Option<Plant>> {
        Ok(None)
    }

    async fn update_milestone(
        &self,
        _id: &str,
        _milestone: Milestone,
        _status: PlantStatus,
    ) -> StoreResult<Option<Plant>> {
        Err(unavailable())
    }

    async fn delete_plant(&self, _id: &str) -> StoreResult<bool> {
        Err(unavailable())
    }
}

async fn unavailable_app() -> axum::Router {
    let bus = EventBus::default();
    let state = common::state_with_store(Arc::new(UnavailableStore), &bus).await;
    build_app_router(state)
}

#[tokio::test]
async fn store_failures_surface_as_500() {
    let app = unavailable_app().await;

    let response = common::post_json(
        app.clone(),
        "/api/v1/quotes",
        json!({"clientName": "Ana", "kwh": 1, "budgetValue": 1}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let response = common::post_empty(app.clone(), "/api/v1/quotes/q-1/approve").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let response = common::delete(app, "/api/v1/plants/p-1").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn validation_runs_before_the_store() {
    let app = unavailable_app().await;
    let response = common::post_json(
        app,
        "/api/v1/quotes",
        json!({"clientName": "", "kwh": 1, "budgetValue": 1}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn health_reports_degraded_store() {
    let app = unavailable_app().await;
    let json = common::body_json(common::get(app, "/health").await).await;
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["store_healthy"], false);
}
