//! Route definitions for the `/complaints` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::complaints;
use crate::state::AppState;

/// Routes mounted at `/complaints`.
///
/// ```text
/// GET    /                 -> list
/// POST   /                 -> create
/// GET    /recent           -> recent
/// GET    /{id}             -> get_by_id
/// PUT    /{id}/status      -> update_status
/// PUT    /{id}/assignment  -> assign
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(complaints::list).post(complaints::create))
        .route("/recent", get(complaints::recent))
        .route("/{id}", get(complaints::get_by_id))
        .route("/{id}/status", put(complaints::update_status))
        .route("/{id}/assignment", put(complaints::assign))
}
