//! Row model for the `projects` table.

use chrono::NaiveDate;
use civiclink_core::project::{GeoPoint, Project};
use civiclink_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A project row. The optional coordinate pair is two nullable columns,
/// constrained to be both set or both null.
#[derive(Debug, Clone, FromRow)]
pub struct ProjectRow {
    pub id: DbId,
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
    pub geo_lat: Option<f64>,
    pub geo_lng: Option<f64>,
    pub images: Vec<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<ProjectRow> for Project {
    fn from(row: ProjectRow) -> Self {
        let geo_location = match (row.geo_lat, row.geo_lng) {
            (Some(lat), Some(lng)) => Some(GeoPoint { lat, lng }),
            _ => None,
        };
        Project {
            id: row.id,
            title: row.title,
            category: row.category,
            short_description: row.short_description,
            detailed_description: row.detailed_description,
            cost: row.cost,
            ward: row.ward,
            contractor: row.contractor,
            start_date: row.start_date,
            completion_date: row.completion_date,
            duration_months: row.duration_months,
            progress_percent: row.progress_percent,
            geo_location,
            images: row.images,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
