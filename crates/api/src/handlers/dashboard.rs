//! Handler for `/dashboard`.

use axum::extract::{Query, State};
use axum::Json;
use solar_core::views::{self, Dashboard};

use crate::error::AppResult;
use crate::query::DashboardParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/dashboard?search=&quoteFrom=&quoteTo=&completedFrom=&completedTo=
///
/// All three tabs, their counts and the summary cards in one response.
pub async fn get(
    State(state): State<AppState>,
    Query(params): Query<DashboardParams>,
) -> AppResult<Json<DataResponse<Dashboard>>> {
    let filters = params.into_filters()?;
    let quotes = state.lifecycle.list_quotes().await?;
    let plants = state.lifecycle.list_plants().await?;
    Ok(Json(DataResponse::new(views::build_dashboard(
        &quotes, &plants, &filters,
    ))))
}
