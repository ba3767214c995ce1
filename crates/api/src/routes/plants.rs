//! Route definitions for the `/plants` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::plants;
use crate::state::AppState;

/// Routes mounted at `/plants`.
///
/// ```text
/// GET    /                                 -> list
/// GET    /stats                            -> stats
/// GET    /{id}                             -> get_by_id
/// DELETE /{id}                             -> delete
/// PUT    /{id}/milestones/{milestone}      -> update_milestone
/// POST   /{id}/milestones/{milestone}/toggle -> toggle_milestone
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(plants::list))
        .route("/stats", get(plants::stats))
        .route("/{id}", get(plants::get_by_id).delete(plants::delete))
        .route("/{id}/milestones/{milestone}", put(plants::update_milestone))
        .route(
            "/{id}/milestones/{milestone}/toggle",
            post(plants::toggle_milestone),
        )
}
