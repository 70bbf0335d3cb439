//! Handlers for the `/projects` resource.

use axum::extract::{Path, Query, State};
use axum::Json;
use civiclink_core::error::CoreError;
use civiclink_core::project::{validate_create_project, CreateProject, Project, ProjectFilter};
use civiclink_core::types::{self, new_id, DbId};
use serde::Deserialize;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::response::{created, Created, DataResponse};
use crate::state::AppState;

/// Query parameters for `GET /projects`.
#[derive(Debug, Deserialize)]
pub struct ListProjectsParams {
    /// Category name; `all` disables the filter.
    pub category: Option<String>,
    /// Title substring.
    pub title: Option<String>,
    /// `recent` (default) or `progress`.
    pub sort: Option<String>,
}

/// POST /api/v1/projects
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(input): Json<CreateProject>,
) -> AppResult<Created<Project>> {
    validate_create_project(&input)?;
    let project = state.projects.create(new_id(), &input, types::now()).await?;

    tracing::info!(
        project_id = %project.id,
        admin_id = %admin.user_id,
        "Project created",
    );

    Ok(created(project))
}

/// GET /api/v1/projects
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListProjectsParams>,
) -> AppResult<Json<DataResponse<Vec<Project>>>> {
    let filter = ProjectFilter::parse(
        params.category.as_deref(),
        params.title.as_deref(),
        params.sort.as_deref(),
    )?;
    let projects = filter.apply(state.projects.list().await?);
    Ok(Json(DataResponse { data: projects }))
}

/// GET /api/v1/projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Project>>> {
    let project = state
        .projects
        .find_by_id(id)
        .await?
        .ok_or_else(|| CoreError::not_found("Project", id))?;
    Ok(Json(DataResponse { data: project }))
}
