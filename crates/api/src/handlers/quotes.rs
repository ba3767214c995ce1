//! Handlers for the `/quotes` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use solar_core::error::CoreError;
use solar_core::quote::{CreateQuote, Quote};
use solar_core::search;
use solar_core::views::PlantView;

use crate::error::{AppError, AppResult};
use crate::query::SearchParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/quotes?search=&from=&to=
///
/// Search first, then the date range; newest first.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<DataResponse<Vec<Quote>>>> {
    let range = params.date_range()?;
    let quotes = state.lifecycle.list_quotes().await?;
    let filtered = search::filter_records(&quotes, &params.search, &range)
        .into_iter()
        .cloned()
        .collect();
    Ok(Json(DataResponse::new(filtered)))
}

/// POST /api/v1/quotes
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateQuote>,
) -> AppResult<(StatusCode, Json<DataResponse<Quote>>)> {
    let quote = state.lifecycle.create_quote(input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(quote))))
}

/// GET /api/v1/quotes/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<DataResponse<Quote>>> {
    let quote = state
        .lifecycle
        .find_quote(&id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Quote",
            id,
        }))?;
    Ok(Json(DataResponse::new(quote)))
}

/// DELETE /api/v1/quotes/{id}
///
/// Deleting an absent quote succeeds.
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<StatusCode> {
    state.lifecycle.delete_quote(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/quotes/{id}/approve
///
/// 201 with the new plant, or 204 when the quote no longer exists.
pub async fn approve(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<Response> {
    let response = match state.lifecycle.approve_quote(&id).await? {
        Some(plant) => (
            StatusCode::CREATED,
            Json(DataResponse::new(PlantView::from(&plant))),
        )
            .into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    };
    Ok(response)
}
