//! Row model for the `user_roles` table.

use civiclink_core::error::CoreError;
use civiclink_core::roles::Role;
use civiclink_core::types::{DbId, Timestamp};
use sqlx::FromRow;

use super::corrupt_row;

#[derive(Debug, Clone, FromRow)]
pub struct UserRoleRow {
    pub user_id: DbId,
    pub role: String,
    pub created_at: Timestamp,
}

impl TryFrom<UserRoleRow> for Role {
    type Error = CoreError;

    fn try_from(row: UserRoleRow) -> Result<Self, Self::Error> {
        row.role.parse().map_err(|e| corrupt_row("user_roles", e))
    }
}
