//! Role-based access control (RBAC) extractors.
//!
//! Each extractor wraps [`AuthUser`] and rejects requests whose role does not
//! meet the minimum requirement. Complaint mutations use [`RequireAuth`]
//! and leave the staff check to the complaint service.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use civiclink_core::error::CoreError;
use civiclink_core::roles::Role;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the `admin` role. Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn admin_only(RequireAdmin(user): RequireAdmin) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != Some(Role::Admin) {
            return Err(AppError::Core(CoreError::Forbidden(format!(
                "admin role required, {} has {:?}",
                user.user_id, user.role
            ))));
        }
        Ok(RequireAdmin(user))
    }
}

/// Requires any authenticated identity, whatever its role.
///
/// Functionally equivalent to [`AuthUser`] but named for route definitions
/// where "this route requires authentication" should be self-documenting.
pub struct RequireAuth(pub AuthUser);

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        Ok(RequireAuth(user))
    }
}
