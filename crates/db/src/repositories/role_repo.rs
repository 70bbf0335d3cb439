//! Repository for the `user_roles` table.

use civiclink_core::roles::Role;
use civiclink_core::types::DbId;
use sqlx::PgPool;

use crate::models::role::UserRoleRow;

pub struct RoleRepo;

impl RoleRepo {
    /// Every grant held by `user_id`, oldest first.
    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<UserRoleRow>, sqlx::Error> {
        sqlx::query_as::<_, UserRoleRow>(
            "SELECT user_id, role, created_at FROM user_roles
             WHERE user_id = $1
             ORDER BY created_at, role",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Insert a grant. Re-granting a held role leaves the existing row.
    pub async fn grant(pool: &PgPool, user_id: DbId, role: Role) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO user_roles (user_id, role) VALUES ($1, $2)
             ON CONFLICT ON CONSTRAINT uq_user_roles_user_role DO NOTHING",
        )
        .bind(user_id)
        .bind(role.as_str())
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Returns `true` if a grant was removed.
    pub async fn revoke(pool: &PgPool, user_id: DbId, role: Role) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM user_roles WHERE user_id = $1 AND role = $2")
            .bind(user_id)
            .bind(role.as_str())
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
