//! Repository for the `complaints` table.

use civiclink_core::access::Visibility;
use civiclink_core::complaint::Complaint;
use civiclink_core::store::{Page, StatusChange};
use civiclink_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::complaint::ComplaintRow;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, category, description, lat, lng, address, citizen_id, is_anonymous, \
     status, official_assigned, image_url, created_at, updated_at";

pub struct ComplaintRepo;

impl ComplaintRepo {
    /// Insert a fully-formed complaint, returning the stored row.
    pub async fn insert(pool: &PgPool, complaint: &Complaint) -> Result<ComplaintRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO complaints
                (id, category, description, lat, lng, address, citizen_id, is_anonymous,
                 status, official_assigned, image_url, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ComplaintRow>(&query)
            .bind(complaint.id)
            .bind(complaint.category.as_str())
            .bind(&complaint.description)
            .bind(complaint.location.lat)
            .bind(complaint.location.lng)
            .bind(&complaint.location.address)
            .bind(complaint.citizen_id)
            .bind(complaint.is_anonymous)
            .bind(complaint.status.as_str())
            .bind(complaint.official_assigned)
            .bind(&complaint.image_url)
            .bind(complaint.created_at)
            .bind(complaint.updated_at)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<ComplaintRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM complaints WHERE id = $1");
        sqlx::query_as::<_, ComplaintRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Rows admitted by `visibility`, newest first. A `NULL` limit is
    /// unbounded in PostgreSQL.
    pub async fn list(
        pool: &PgPool,
        visibility: Visibility,
        page: Page,
    ) -> Result<Vec<ComplaintRow>, sqlx::Error> {
        let (predicate, owner) = match visibility {
            Visibility::All => ("TRUE", None),
            Visibility::AnonymousOnly => ("is_anonymous", None),
            Visibility::OwnedBy(owner) => ("citizen_id = $3", Some(owner)),
            Visibility::OwnedByOrAnonymous(owner) => ("(citizen_id = $3 OR is_anonymous)", Some(owner)),
        };
        let query = format!(
            "SELECT {COLUMNS} FROM complaints
             WHERE {predicate}
             ORDER BY created_at DESC, id DESC
             LIMIT $1 OFFSET $2"
        );
        let mut q = sqlx::query_as::<_, ComplaintRow>(&query)
            .bind(page.limit)
            .bind(page.offset);
        if let Some(owner) = owner {
            q = q.bind(owner);
        }
        q.fetch_all(pool).await
    }

    /// Compare-and-set on `status`. Returns `None` when no row with `id`
    /// currently holds `change.expected`.
    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        change: &StatusChange,
    ) -> Result<Option<ComplaintRow>, sqlx::Error> {
        let query = format!(
            "UPDATE complaints SET
                status = $3,
                official_assigned = $4,
                updated_at = $5
             WHERE id = $1 AND status = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ComplaintRow>(&query)
            .bind(id)
            .bind(change.expected.as_str())
            .bind(change.status.as_str())
            .bind(change.official_assigned)
            .bind(change.updated_at)
            .fetch_optional(pool)
            .await
    }

    /// Returns `None` if no row with the given `id` exists or the complaint
    /// is resolved.
    pub async fn assign_official(
        pool: &PgPool,
        id: DbId,
        official_id: DbId,
        updated_at: Timestamp,
    ) -> Result<Option<ComplaintRow>, sqlx::Error> {
        let query = format!(
            "UPDATE complaints SET official_assigned = $2, updated_at = $3
             WHERE id = $1 AND status <> 'resolved'
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ComplaintRow>(&query)
            .bind(id)
            .bind(official_id)
            .bind(updated_at)
            .fetch_optional(pool)
            .await
    }
}
