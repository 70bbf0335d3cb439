//! Public infrastructure projects.
//!
//! Projects are reference data seeded by administrators; the only logic is
//! field validation and the catalogue filter/sort used by the listing page.

use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use validator::Validate;

use crate::error::CoreError;
use crate::search::{category_filter, contains_ignore_case};
use crate::types::{DbId, Timestamp};

pub const MAX_TITLE_LENGTH: usize = 200;

/// A coordinate pair without an address.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate, TS)]
#[ts(export)]
pub struct GeoPoint {
    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub lng: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Project {
    pub id: DbId,
    pub title: String,
    /// Free-form, e.g. "Flyover", "Drainage", "Water Supply".
    pub category: String,
    pub short_description: String,
    pub detailed_description: Option<String>,
    /// Whole rupees.
    pub cost: i64,
    pub ward: i32,
    pub contractor: Option<String>,
    pub start_date: NaiveDate,
    pub completion_date: Option<NaiveDate>,
    pub duration_months: Option<i32>,
    pub progress_percent: Option<i16>,
    pub geo_location: Option<GeoPoint>,
    pub images: Vec<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for seeding a new project.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProject {
    pub title: String,
    pub category: String,
    pub short_description: String,
    pub detailed_description: Option<String>,
    pub cost: i64,
    pub ward: i32,
    pub contractor: Option<String>,
    pub start_date: NaiveDate,
    pub completion_date: Option<NaiveDate>,
    pub duration_months: Option<i32>,
    pub progress_percent: Option<i16>,
    pub geo_location: Option<GeoPoint>,
    #[serde(default)]
    pub images: Vec<String>,
}

fn require_text(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    Ok(())
}

/// Validate a project seed.
pub fn validate_create_project(input: &CreateProject) -> Result<(), CoreError> {
    require_text("title", &input.title)?;
    if input.title.chars().count() > MAX_TITLE_LENGTH {
        return Err(CoreError::Validation(format!(
            "title exceeds maximum length of {MAX_TITLE_LENGTH} characters"
        )));
    }
    require_text("category", &input.category)?;
    require_text("short_description", &input.short_description)?;

    if input.cost < 0 {
        return Err(CoreError::Validation("cost must not be negative".into()));
    }
    if input.ward <= 0 {
        return Err(CoreError::Validation("ward must be a positive number".into()));
    }
    if let Some(p) = input.progress_percent {
        if !(0..=100).contains(&p) {
            return Err(CoreError::Validation(format!(
                "progress_percent must be within [0, 100] (got {p})"
            )));
        }
    }
    if input.duration_months.is_some_and(|d| d < 0) {
        return Err(CoreError::Validation(
            "duration_months must not be negative".into(),
        ));
    }
    if let Some(done) = input.completion_date {
        if done < input.start_date {
            return Err(CoreError::Validation(
                "completion_date must not precede start_date".into(),
            ));
        }
    }
    if let Some(point) = &input.geo_location {
        point
            .validate()
            .map_err(|e| CoreError::Validation(format!("Invalid geo_location: {e}")))?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Catalogue filter / sort
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProjectSort {
    /// Newest first.
    #[default]
    Recent,
    /// Highest progress first; projects without progress last.
    Progress,
}

impl FromStr for ProjectSort {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "recent" => Ok(ProjectSort::Recent),
            "progress" => Ok(ProjectSort::Progress),
            other => Err(CoreError::Validation(format!(
                "Invalid sort '{other}'. Must be one of: recent, progress"
            ))),
        }
    }
}

/// Category AND title-substring filter with a sort order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectFilter {
    pub category: Option<String>,
    pub title: Option<String>,
    pub sort: ProjectSort,
}

impl ProjectFilter {
    pub fn parse(
        category: Option<&str>,
        title: Option<&str>,
        sort: Option<&str>,
    ) -> Result<Self, CoreError> {
        Ok(Self {
            category: category_filter(category).map(str::to_string),
            title: title
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string),
            sort: sort
                .map(str::parse::<ProjectSort>)
                .transpose()?
                .unwrap_or_default(),
        })
    }

    pub fn matches(&self, project: &Project) -> bool {
        let category_ok = self
            .category
            .as_deref()
            .map_or(true, |c| project.category.eq_ignore_ascii_case(c));
        let title_ok = self
            .title
            .as_deref()
            .map_or(true, |t| contains_ignore_case(&project.title, t));
        category_ok && title_ok
    }

    /// Filter then sort. Ties keep recency order.
    pub fn apply(&self, mut projects: Vec<Project>) -> Vec<Project> {
        projects.retain(|p| self.matches(p));
        projects.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        if self.sort == ProjectSort::Progress {
            // Stable sort keeps the recency order among equal progress.
            projects.sort_by(|a, b| b.progress_percent.cmp(&a.progress_percent));
        }
        projects
    }
}
