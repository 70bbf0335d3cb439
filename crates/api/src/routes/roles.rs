//! Route definitions for role lookup and administration.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::roles;
use crate::state::AppState;

/// ```text
/// GET    /me/role                       -> my_role
/// GET    /admin/roles/{user_id}         -> get_user_role
/// PUT    /admin/roles/{user_id}         -> grant
/// DELETE /admin/roles/{user_id}/{role}  -> revoke
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/me/role", get(roles::my_role))
        .route(
            "/admin/roles/{user_id}",
            get(roles::get_user_role).put(roles::grant),
        )
        .route("/admin/roles/{user_id}/{role}", delete(roles::revoke))
}
