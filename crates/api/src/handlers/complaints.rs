//! Handlers for the `/complaints` resource.

use axum::extract::{Path, Query, State};
use axum::Json;
use civiclink_core::access::{self, OwnerFilter};
use civiclink_core::complaint::{Complaint, CreateComplaint};
use civiclink_core::display::ComplaintSummary;
use civiclink_core::lifecycle::ComplaintStatus;
use civiclink_core::search::{ComplaintFilter, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use civiclink_core::types::DbId;
use serde::Deserialize;

use crate::error::AppResult;
use crate::middleware::auth::MaybeAuth;
use crate::middleware::rbac::RequireAuth;
use crate::query::PaginationParams;
use crate::response::{created, Created, DataResponse};
use crate::state::AppState;

/// Query parameters for `GET /complaints`.
#[derive(Debug, Deserialize)]
pub struct ListComplaintsParams {
    pub owner_id: Option<DbId>,
    pub include_anonymous: Option<bool>,
    /// Free text matched against the description and the id.
    pub q: Option<String>,
    /// Category name; `all` disables the filter.
    pub category: Option<String>,
    pub status: Option<String>,
}

/// Query parameters for `GET /complaints/recent`.
#[derive(Debug, Deserialize)]
pub struct RecentParams {
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct AssignOfficialRequest {
    pub official_id: DbId,
}

/// POST /api/v1/complaints
pub async fn create(
    State(state): State<AppState>,
    MaybeAuth(caller): MaybeAuth,
    Json(input): Json<CreateComplaint>,
) -> AppResult<Created<Complaint>> {
    if let Some(claimed) = input.citizen_id {
        if caller.id() != Some(claimed) {
            tracing::warn!(
                claimed_citizen_id = %claimed,
                caller_id = ?caller.id(),
                "Ignoring client-supplied citizen_id",
            );
        }
    }

    let complaint = state.complaints.create_complaint(&caller, input).await?;

    tracing::info!(
        complaint_id = %complaint.id,
        category = %complaint.category,
        is_anonymous = complaint.is_anonymous,
        "Complaint submitted",
    );

    Ok(created(complaint))
}

/// GET /api/v1/complaints
pub async fn list(
    State(state): State<AppState>,
    MaybeAuth(caller): MaybeAuth,
    Query(params): Query<ListComplaintsParams>,
    Query(pagination): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<Complaint>>>> {
    let owner = OwnerFilter {
        owner_id: params.owner_id,
        include_anonymous: params.include_anonymous.unwrap_or(true),
    };
    let filter = ComplaintFilter::parse(
        params.q.as_deref(),
        params.category.as_deref(),
        params.status.as_deref(),
    )?;
    let page = pagination.page(DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT);

    let complaints = state
        .complaints
        .list_complaints(&caller, owner, &filter, page)
        .await?;
    Ok(Json(DataResponse { data: complaints }))
}

/// GET /api/v1/complaints/recent
pub async fn recent(
    State(state): State<AppState>,
    MaybeAuth(caller): MaybeAuth,
    Query(params): Query<RecentParams>,
) -> AppResult<Json<DataResponse<Vec<ComplaintSummary>>>> {
    let summaries = state
        .complaints
        .recent_complaints(&caller, params.limit)
        .await?;
    Ok(Json(DataResponse { data: summaries }))
}

/// GET /api/v1/complaints/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    MaybeAuth(caller): MaybeAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Complaint>>> {
    let complaint = state.complaints.get_complaint(&caller, id).await?;
    Ok(Json(DataResponse { data: complaint }))
}

/// PUT /api/v1/complaints/{id}/status
pub async fn update_status(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateStatusRequest>,
) -> AppResult<Json<DataResponse<Complaint>>> {
    let caller = user.caller();
    // Non-staff callers learn nothing about valid statuses.
    access::require_staff(&caller)?;
    let status: ComplaintStatus = input.status.parse()?;
    let complaint = state
        .complaints
        .update_complaint_status(&caller, id, status)
        .await?;

    tracing::info!(
        complaint_id = %id,
        user_id = %user.user_id,
        to = %complaint.status,
        "Complaint status updated",
    );

    Ok(Json(DataResponse { data: complaint }))
}

/// PUT /api/v1/complaints/{id}/assignment
pub async fn assign(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<DbId>,
    Json(input): Json<AssignOfficialRequest>,
) -> AppResult<Json<DataResponse<Complaint>>> {
    let complaint = state
        .complaints
        .assign_official(&user.caller(), id, input.official_id)
        .await?;

    tracing::info!(
        complaint_id = %id,
        user_id = %user.user_id,
        official_id = %input.official_id,
        "Complaint assigned",
    );

    Ok(Json(DataResponse { data: complaint }))
}
