pub mod budget;
pub mod complaints;
pub mod health;
pub mod projects;
pub mod roles;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /complaints                           submit, list (auth optional)
/// /complaints/recent                    dashboard cards (auth optional)
/// /complaints/{id}                      get (auth optional)
/// /complaints/{id}/status               update status (official/admin)
/// /complaints/{id}/assignment           assign official (official/admin)
///
/// /me/role                              caller's effective role (auth required)
/// /admin/roles/{user_id}                get, grant (admin only)
/// /admin/roles/{user_id}/{role}         revoke (admin only)
///
/// /projects                             list (public), create (admin only)
/// /projects/{id}                        get (public)
///
/// /budget                               list (public), create (admin only)
/// /budget/{fiscal_year}                 get (public)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/complaints", complaints::router())
        .merge(roles::router())
        .nest("/projects", projects::router())
        .nest("/budget", budget::router())
}
