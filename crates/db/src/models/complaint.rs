//! Row model for the `complaints` table.

use civiclink_core::complaint::{Category, Complaint, Location};
use civiclink_core::error::CoreError;
use civiclink_core::lifecycle::ComplaintStatus;
use civiclink_core::types::{DbId, Timestamp};
use sqlx::FromRow;

use super::corrupt_row;

/// A complaint row. The location is stored flattened.
#[derive(Debug, Clone, FromRow)]
pub struct ComplaintRow {
    pub id: DbId,
    pub category: String,
    pub description: String,
    pub lat: f64,
    pub lng: f64,
    pub address: String,
    pub citizen_id: Option<DbId>,
    pub is_anonymous: bool,
    pub status: String,
    pub official_assigned: Option<DbId>,
    pub image_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl TryFrom<ComplaintRow> for Complaint {
    type Error = CoreError;

    fn try_from(row: ComplaintRow) -> Result<Self, Self::Error> {
        let category: Category = row
            .category
            .parse()
            .map_err(|e| corrupt_row("complaints", e))?;
        let status: ComplaintStatus = row
            .status
            .parse()
            .map_err(|e| corrupt_row("complaints", e))?;
        Ok(Complaint {
            id: row.id,
            category,
            description: row.description,
            location: Location {
                lat: row.lat,
                lng: row.lng,
                address: row.address,
            },
            citizen_id: row.citizen_id,
            is_anonymous: row.is_anonymous,
            status,
            official_assigned: row.official_assigned,
            image_url: row.image_url,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}
