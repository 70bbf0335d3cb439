//! Handlers for role lookup and administration.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use civiclink_core::error::CoreError;
use civiclink_core::roles::{role_name, Role};
use civiclink_core::types::DbId;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::middleware::rbac::{RequireAdmin, RequireAuth};
use crate::response::DataResponse;
use crate::state::AppState;

/// Effective role plus the grants it was derived from.
#[derive(Debug, Serialize)]
pub struct RoleInfo {
    pub user_id: DbId,
    /// `citizen`, `official`, `admin`, or `none`.
    pub role: &'static str,
    pub grants: Vec<Role>,
}

#[derive(Debug, Deserialize)]
pub struct GrantRoleRequest {
    pub role: String,
}

async fn role_info(state: &AppState, user_id: DbId) -> AppResult<RoleInfo> {
    let grants = state.complaints.grants(user_id).await?;
    Ok(RoleInfo {
        user_id,
        role: role_name(Role::effective(grants.iter().copied())),
        grants,
    })
}

/// GET /api/v1/me/role
pub async fn my_role(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> AppResult<Json<DataResponse<RoleInfo>>> {
    let info = role_info(&state, user.user_id).await?;
    Ok(Json(DataResponse { data: info }))
}

/// GET /api/v1/admin/roles/{user_id}
pub async fn get_user_role(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(user_id): Path<DbId>,
) -> AppResult<Json<DataResponse<RoleInfo>>> {
    let info = role_info(&state, user_id).await?;
    Ok(Json(DataResponse { data: info }))
}

/// PUT /api/v1/admin/roles/{user_id}
pub async fn grant(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(user_id): Path<DbId>,
    Json(input): Json<GrantRoleRequest>,
) -> AppResult<Json<DataResponse<RoleInfo>>> {
    let role: Role = input.role.parse()?;
    state.complaints.grant_role(user_id, role).await?;

    tracing::info!(
        user_id = %user_id,
        role = %role,
        admin_id = %admin.user_id,
        "Role granted",
    );

    let info = role_info(&state, user_id).await?;
    Ok(Json(DataResponse { data: info }))
}

/// DELETE /api/v1/admin/roles/{user_id}/{role}
pub async fn revoke(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path((user_id, role)): Path<(DbId, String)>,
) -> AppResult<StatusCode> {
    let role: Role = role.parse()?;
    if !state.complaints.revoke_role(user_id, role).await? {
        return Err(CoreError::not_found("Role grant", format!("{user_id}/{role}")).into());
    }

    tracing::info!(
        user_id = %user_id,
        role = %role,
        admin_id = %admin.user_id,
        "Role revoked",
    );

    Ok(StatusCode::NO_CONTENT)
}
