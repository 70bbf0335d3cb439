//! Repository for the `budget_flows` table.

use civiclink_core::budget::CreateBudgetFlow;
use civiclink_core::types::{DbId, Timestamp};
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::budget::BudgetFlowRow;

const COLUMNS: &str = "id, fiscal_year, bbmp_budget, state_funds, central_funds, \
     category_wise_breakdown, created_at, updated_at";

pub struct BudgetFlowRepo;

impl BudgetFlowRepo {
    /// Insert a fiscal year. A duplicate year violates
    /// `uq_budget_flows_fiscal_year`.
    pub async fn create(
        pool: &PgPool,
        id: DbId,
        input: &CreateBudgetFlow,
        now: Timestamp,
    ) -> Result<BudgetFlowRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO budget_flows
                (id, fiscal_year, bbmp_budget, state_funds, central_funds,
                 category_wise_breakdown, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, BudgetFlowRow>(&query)
            .bind(id)
            .bind(&input.fiscal_year)
            .bind(input.bbmp_budget)
            .bind(input.state_funds)
            .bind(input.central_funds)
            .bind(Json(&input.category_wise_breakdown))
            .bind(now)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_fiscal_year(
        pool: &PgPool,
        fiscal_year: &str,
    ) -> Result<Option<BudgetFlowRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM budget_flows WHERE fiscal_year = $1");
        sqlx::query_as::<_, BudgetFlowRow>(&query)
            .bind(fiscal_year)
            .fetch_optional(pool)
            .await
    }

    /// Latest fiscal year first.
    pub async fn list(pool: &PgPool) -> Result<Vec<BudgetFlowRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM budget_flows ORDER BY fiscal_year DESC");
        sqlx::query_as::<_, BudgetFlowRow>(&query).fetch_all(pool).await
    }
}
