//! Handlers for the `/budget` resource.

use axum::extract::{Path, State};
use axum::Json;
use civiclink_core::budget::{
    validate_create_budget_flow, validate_fiscal_year, BudgetFlow, CreateBudgetFlow,
};
use civiclink_core::display::format_rupees;
use civiclink_core::error::CoreError;
use civiclink_core::types::{self, new_id};
use serde::Serialize;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::response::{created, Created, DataResponse};
use crate::state::AppState;

/// A budget flow with its derived totals.
#[derive(Debug, Serialize)]
pub struct BudgetFlowView {
    #[serde(flatten)]
    pub flow: BudgetFlow,
    pub total_funds: i64,
    /// Indian notation, e.g. `₹1536.3 Crore`.
    pub total_funds_display: String,
}

impl From<BudgetFlow> for BudgetFlowView {
    fn from(flow: BudgetFlow) -> Self {
        let total_funds = flow.total_funds();
        Self {
            flow,
            total_funds,
            total_funds_display: format_rupees(total_funds),
        }
    }
}

/// POST /api/v1/budget
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(input): Json<CreateBudgetFlow>,
) -> AppResult<Created<BudgetFlowView>> {
    validate_create_budget_flow(&input)?;
    let flow = state.budgets.create(new_id(), &input, types::now()).await?;

    tracing::info!(
        fiscal_year = %flow.fiscal_year,
        admin_id = %admin.user_id,
        "Budget flow created",
    );

    Ok(created(BudgetFlowView::from(flow)))
}

/// GET /api/v1/budget
pub async fn list(State(state): State<AppState>) -> AppResult<Json<DataResponse<Vec<BudgetFlowView>>>> {
    let flows = state.budgets.list().await?;
    Ok(Json(DataResponse {
        data: flows.into_iter().map(BudgetFlowView::from).collect(),
    }))
}

/// GET /api/v1/budget/{fiscal_year}
pub async fn get_by_fiscal_year(
    State(state): State<AppState>,
    Path(fiscal_year): Path<String>,
) -> AppResult<Json<DataResponse<BudgetFlowView>>> {
    validate_fiscal_year(&fiscal_year)?;
    let flow = state
        .budgets
        .find_by_fiscal_year(&fiscal_year)
        .await?
        .ok_or_else(|| CoreError::not_found("Budget flow", &fiscal_year))?;
    Ok(Json(DataResponse { data: flow.into() }))
}
