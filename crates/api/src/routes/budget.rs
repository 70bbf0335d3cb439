//! Route definitions for the `/budget` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::budget;
use crate::state::AppState;

/// Routes mounted at `/budget`.
///
/// ```text
/// GET    /                -> list
/// POST   /                -> create
/// GET    /{fiscal_year}   -> get_by_fiscal_year
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(budget::list).post(budget::create))
        .route("/{fiscal_year}", get(budget::get_by_fiscal_year))
}
