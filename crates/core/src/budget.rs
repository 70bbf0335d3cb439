//! Fiscal-year budget flows and their category breakdown.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

/// One slice of the category-wise breakdown, as a share of the total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CategoryShare {
    pub name: String,
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BudgetFlow {
    pub id: DbId,
    /// `YYYY-YY`, e.g. `2023-24`.
    pub fiscal_year: String,
    /// Municipal corporation's own budget, whole rupees.
    pub bbmp_budget: i64,
    pub state_funds: i64,
    pub central_funds: i64,
    pub category_wise_breakdown: Vec<CategoryShare>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl BudgetFlow {
    pub fn total_funds(&self) -> i64 {
        self.bbmp_budget
            .saturating_add(self.state_funds)
            .saturating_add(self.central_funds)
    }
}

/// DTO for seeding a fiscal year.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBudgetFlow {
    pub fiscal_year: String,
    pub bbmp_budget: i64,
    pub state_funds: i64,
    pub central_funds: i64,
    #[serde(default)]
    pub category_wise_breakdown: Vec<CategoryShare>,
}

static FISCAL_YEAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4})-(\d{2})$").expect("valid regex"));

/// Validate a `YYYY-YY` fiscal year whose second half follows the first.
pub fn validate_fiscal_year(fiscal_year: &str) -> Result<(), CoreError> {
    let invalid = || {
        CoreError::Validation(format!(
            "Invalid fiscal year '{fiscal_year}'. Expected YYYY-YY, e.g. 2023-24"
        ))
    };
    let caps = FISCAL_YEAR_RE
        .captures(fiscal_year)
        .ok_or_else(invalid)?;
    let start: u32 = caps[1].parse().map_err(|_| invalid())?;
    let end: u32 = caps[2].parse().map_err(|_| invalid())?;
    if (start + 1) % 100 != end {
        return Err(invalid());
    }
    Ok(())
}

/// Validate amounts and the category breakdown.
pub fn validate_create_budget_flow(input: &CreateBudgetFlow) -> Result<(), CoreError> {
    validate_fiscal_year(&input.fiscal_year)?;

    for (field, amount) in [
        ("bbmp_budget", input.bbmp_budget),
        ("state_funds", input.state_funds),
        ("central_funds", input.central_funds),
    ] {
        if amount < 0 {
            return Err(CoreError::Validation(format!("{field} must not be negative")));
        }
    }

    let mut seen = HashSet::new();
    let mut total = 0.0;
    for share in &input.category_wise_breakdown {
        let name = share.name.trim();
        if name.is_empty() {
            return Err(CoreError::Validation(
                "breakdown category names must not be empty".into(),
            ));
        }
        if !seen.insert(name.to_lowercase()) {
            return Err(CoreError::Validation(format!(
                "duplicate breakdown category '{name}'"
            )));
        }
        if !(0.0..=100.0).contains(&share.percent) {
            return Err(CoreError::Validation(format!(
                "share for '{name}' must be within [0, 100]"
            )));
        }
        total += share.percent;
    }
    // Allow rounding noise from client-side percentage math.
    if total > 100.0 + 1e-6 {
        return Err(CoreError::Validation(format!(
            "breakdown shares sum to {total}, which exceeds 100"
        )));
    }
    Ok(())
}
