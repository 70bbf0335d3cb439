//! PostgreSQL persistence for CivicLink.
//!
//! [`repositories`] hold the SQL; [`store::PgStore`] adapts them to the store
//! traits in `civiclink_core::store` and maps driver errors onto
//! [`CoreError`].

use std::time::Duration;

use civiclink_core::error::CoreError;
use sqlx::postgres::PgPoolOptions;

pub mod models;
pub mod repositories;
pub mod store;

pub use store::PgStore;

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await
}

/// Round-trip a trivial query.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply pending migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}

/// Map a driver error onto the domain taxonomy.
///
/// - Pool exhaustion, a closed pool, and I/O failures are transient.
/// - Unique violations on `uq_` constraints are conflicts.
/// - Check violations are validation failures the service layer missed.
/// - Everything else is internal and logged here.
pub fn store_error(err: sqlx::Error) -> CoreError {
    match &err {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            tracing::warn!(error = %err, "Store unavailable");
            CoreError::TransientStore(err.to_string())
        }
        sqlx::Error::Database(db_err) => {
            let constraint = db_err.constraint().unwrap_or("unknown");
            match db_err.code().as_deref() {
                // PostgreSQL unique_violation
                Some("23505") if constraint.starts_with("uq_") => CoreError::Conflict(format!(
                    "Duplicate value violates unique constraint: {constraint}"
                )),
                // PostgreSQL check_violation
                Some("23514") => {
                    CoreError::Validation(format!("Value violates constraint: {constraint}"))
                }
                _ => {
                    tracing::error!(error = %db_err, "Database error");
                    CoreError::Internal(db_err.to_string())
                }
            }
        }
        other => {
            tracing::error!(error = %other, "Database error");
            CoreError::Internal(other.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn pool_failures_are_transient() {
        assert_matches!(
            store_error(sqlx::Error::PoolTimedOut),
            CoreError::TransientStore(_)
        );
        assert_matches!(store_error(sqlx::Error::PoolClosed), CoreError::TransientStore(_));
    }

    #[test]
    fn missing_rows_are_internal() {
        assert_matches!(store_error(sqlx::Error::RowNotFound), CoreError::Internal(_));
    }
}
