//! Handlers for the `/plants` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use solar_core::error::CoreError;
use solar_core::plant::Plant;
use solar_core::progress;
use solar_core::search;
use solar_core::stats::PlantStats;
use solar_core::status::{Milestone, PlantStatus};
use solar_core::views::PlantView;

use crate::error::{AppError, AppResult};
use crate::query::{PlantListParams, PlantViewKind};
use crate::response::DataResponse;
use crate::state::AppState;

/// Body of `PUT /plants/{id}/milestones/{milestone}`.
#[derive(Debug, Deserialize)]
pub struct UpdateMilestone {
    pub status: PlantStatus,
}

/// GET /api/v1/plants?view=active|completed|all&search=&from=&to=
///
/// The date range applies to the completed view only, matching the
/// dashboard tabs.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<PlantListParams>,
) -> AppResult<Json<DataResponse<Vec<PlantView>>>> {
    let range = params.filter.date_range()?;
    let query = params.filter.search.as_str();
    let plants = state.lifecycle.list_plants().await?;

    let rows: Vec<&Plant> = match params.view {
        PlantViewKind::All => search::filter_records(&plants, query, &range),
        PlantViewKind::Active => search::search(progress::partition(&plants).active, query),
        PlantViewKind::Completed => {
            search::filter_records(progress::partition(&plants).completed, query, &range)
        }
    };

    Ok(Json(DataResponse::new(
        rows.into_iter().map(PlantView::from).collect(),
    )))
}

/// GET /api/v1/plants/stats
///
/// Summary cards over the in-progress plants.
pub async fn stats(State(state): State<AppState>) -> AppResult<Json<DataResponse<PlantStats>>> {
    let plants = state.lifecycle.list_plants().await?;
    let active = progress::partition(&plants).active;
    Ok(Json(DataResponse::new(PlantStats::from_plants(active))))
}

/// GET /api/v1/plants/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<DataResponse<PlantView>>> {
    let plant = state
        .lifecycle
        .find_plant(&id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Plant",
            id,
        }))?;
    Ok(Json(DataResponse::new(PlantView::from(&plant))))
}

/// PUT /api/v1/plants/{id}/milestones/{milestone}
///
/// 200 with the updated plant, or 204 when the plant no longer exists.
pub async fn update_milestone(
    State(state): State<AppState>,
    Path((id, milestone)): Path<(String, String)>,
    Json(input): Json<UpdateMilestone>,
) -> AppResult<Response> {
    let milestone: Milestone = milestone.parse()?;
    let plant = state
        .lifecycle
        .update_milestone(&id, milestone, input.status)
        .await?;
    Ok(plant_or_no_content(plant))
}

/// POST /api/v1/plants/{id}/milestones/{milestone}/toggle
pub async fn toggle_milestone(
    State(state): State<AppState>,
    Path((id, milestone)): Path<(String, String)>,
) -> AppResult<Response> {
    let milestone: Milestone = milestone.parse()?;
    let plant = state.lifecycle.toggle_milestone(&id, milestone).await?;
    Ok(plant_or_no_content(plant))
}

/// DELETE /api/v1/plants/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<StatusCode> {
    state.lifecycle.delete_plant(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

fn plant_or_no_content(plant: Option<Plant>) -> Response {
    match plant {
        Some(plant) => Json(DataResponse::new(PlantView::from(&plant))).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    }
}
