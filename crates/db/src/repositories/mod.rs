//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument and return raw `sqlx` results.

pub mod budget_repo;
pub mod complaint_repo;
pub mod project_repo;
pub mod role_repo;

pub use budget_repo::BudgetFlowRepo;
pub use complaint_repo::ComplaintRepo;
pub use project_repo::ProjectRepo;
pub use role_repo::RoleRepo;
