pub mod dashboard;
pub mod health;
pub mod plants;
pub mod quotes;

use axum::routing::get;
use axum::Router;

use crate::state::AppState;
use crate::ws;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /ws                                       WebSocket snapshot push
///
/// /quotes                                   list, create
/// /quotes/{id}                              delete
/// /quotes/{id}/approve                      approve (POST)
///
/// /plants                                   list (?view=active|completed|all)
/// /plants/stats                             summary cards
/// /plants/{id}                              get, delete
/// /plants/{id}/milestones/{milestone}       set status (PUT)
/// /plants/{id}/milestones/{milestone}/toggle  flip status (POST)
///
/// /dashboard                                all three tabs in one call
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/ws", get(ws::ws_handler))
        .nest("/quotes", quotes::router())
        .nest("/plants", plants::router())
        .nest("/dashboard", dashboard::router())
}
