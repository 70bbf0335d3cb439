//! Row structs.
//!
//! Each submodule holds a `FromRow` struct matching its table and the
//! conversion into the domain type from `civiclink_core`. Rows that fail
//! to convert indicate data written outside the application and surface
//! as internal errors.

pub mod budget;
pub mod complaint;
pub mod project;
pub mod role;

use civiclink_core::error::CoreError;

fn corrupt_row(table: &str, detail: impl std::fmt::Display) -> CoreError {
    CoreError::Internal(format!("Unreadable {table} row: {detail}"))
}
