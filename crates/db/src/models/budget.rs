//! Row model for the `budget_flows` table.

use civiclink_core::budget::{BudgetFlow, CategoryShare};
use civiclink_core::types::{DbId, Timestamp};
use sqlx::types::Json;
use sqlx::FromRow;

/// A budget flow row. The breakdown is a JSONB array of
/// `{ "name", "percent" }` objects.
#[derive(Debug, Clone, FromRow)]
pub struct BudgetFlowRow {
    pub id: DbId,
    pub fiscal_year: String,
    pub bbmp_budget: i64,
    pub state_funds: i64,
    pub central_funds: i64,
    pub category_wise_breakdown: Json<Vec<CategoryShare>>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<BudgetFlowRow> for BudgetFlow {
    fn from(row: BudgetFlowRow) -> Self {
        BudgetFlow {
            id: row.id,
            fiscal_year: row.fiscal_year,
            bbmp_budget: row.bbmp_budget,
            state_funds: row.state_funds,
            central_funds: row.central_funds,
            category_wise_breakdown: row.category_wise_breakdown.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
