//! Repository for the `projects` table.

use civiclink_core::project::CreateProject;
use civiclink_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::project::ProjectRow;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, category, short_description, detailed_description, cost, ward, \
     contractor, start_date, completion_date, duration_months, progress_percent, geo_lat, geo_lng, \
     images, created_at, updated_at";

pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project, returning the created row.
    pub async fn create(
        pool: &PgPool,
        id: DbId,
        input: &CreateProject,
        now: Timestamp,
    ) -> Result<ProjectRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects
                (id, title, category, short_description, detailed_description, cost, ward,
                 contractor, start_date, completion_date, duration_months, progress_percent,
                 geo_lat, geo_lng, images, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $16)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProjectRow>(&query)
            .bind(id)
            .bind(input.title.trim())
            .bind(input.category.trim())
            .bind(&input.short_description)
            .bind(&input.detailed_description)
            .bind(input.cost)
            .bind(input.ward)
            .bind(&input.contractor)
            .bind(input.start_date)
            .bind(input.completion_date)
            .bind(input.duration_months)
            .bind(input.progress_percent)
            .bind(input.geo_location.map(|g| g.lat))
            .bind(input.geo_location.map(|g| g.lng))
            .bind(&input.images)
            .bind(now)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<ProjectRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, ProjectRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all projects ordered by most recently created first.
    pub async fn list(pool: &PgPool) -> Result<Vec<ProjectRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, ProjectRow>(&query).fetch_all(pool).await
    }
}
