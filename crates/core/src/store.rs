//! Persistence seams.
//!
//! Each trait is implemented by the PostgreSQL adapter in `civiclink-db` and
//! by [`crate::memory::MemoryStore`]. Stores enforce storage-level
//! constraints only; access rules live in [`crate::access`] and
//! [`crate::service`].

use async_trait::async_trait;

use crate::access::Visibility;
use crate::budget::{BudgetFlow, CreateBudgetFlow};
use crate::complaint::Complaint;
use crate::error::CoreError;
use crate::lifecycle::ComplaintStatus;
use crate::project::{CreateProject, Project};
use crate::roles::Role;
use crate::types::{DbId, Timestamp};

/// Page window. `limit: None` returns everything from `offset`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Page {
    pub limit: Option<i64>,
    pub offset: i64,
}

impl Page {
    pub fn first(limit: i64) -> Self {
        Self {
            limit: Some(limit),
            offset: 0,
        }
    }

    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Apply the window to an already ordered list.
    pub fn slice<T>(&self, items: Vec<T>) -> Vec<T> {
        let skip = usize::try_from(self.offset).unwrap_or(0);
        let iter = items.into_iter().skip(skip);
        match self.limit {
            Some(limit) => iter.take(usize::try_from(limit).unwrap_or(0)).collect(),
            None => iter.collect(),
        }
    }
}

/// A status change to persist. `expected` is the status the change was
/// validated against; the store refuses the write if the row has moved on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatusChange {
    pub expected: ComplaintStatus,
    pub status: ComplaintStatus,
    pub official_assigned: Option<DbId>,
    pub updated_at: Timestamp,
}

#[async_trait]
pub trait ComplaintStore: Send + Sync {
    /// Persist a fully-formed complaint.
    async fn insert(&self, complaint: &Complaint) -> Result<Complaint, CoreError>;

    async fn find_by_id(&self, id: DbId) -> Result<Option<Complaint>, CoreError>;

    /// Complaints admitted by `visibility`, newest first.
    async fn list(&self, visibility: Visibility, page: Page) -> Result<Vec<Complaint>, CoreError>;

    /// Apply a status change. Returns `None` when the id does not exist and
    /// `CoreError::Conflict` when the current status differs from
    /// `change.expected`.
    async fn update_status(
        &self,
        id: DbId,
        change: StatusChange,
    ) -> Result<Option<Complaint>, CoreError>;

    /// Set the handling official. Returns `None` when the id does not exist
    /// and `CoreError::Conflict` when the complaint is already resolved.
    async fn assign_official(
        &self,
        id: DbId,
        official_id: DbId,
        updated_at: Timestamp,
    ) -> Result<Option<Complaint>, CoreError>;

    /// Cheap liveness probe used by `/health`.
    async fn health_check(&self) -> Result<(), CoreError>;
}

#[async_trait]
pub trait RoleStore: Send + Sync {
    /// All grants held by `user_id`.
    async fn grants_for(&self, user_id: DbId) -> Result<Vec<Role>, CoreError>;

    /// Add a grant. Granting an already-held role is a no-op.
    async fn grant(&self, user_id: DbId, role: Role) -> Result<(), CoreError>;

    /// Remove a grant. Returns whether a grant was removed.
    async fn revoke(&self, user_id: DbId, role: Role) -> Result<bool, CoreError>;

    /// Effective role: the most privileged grant, `None` without grants.
    async fn role_of(&self, user_id: DbId) -> Result<Option<Role>, CoreError> {
        Ok(Role::effective(self.grants_for(user_id).await?))
    }
}

#[async_trait]
pub trait ProjectStore: Send + Sync {
    async fn create(&self, id: DbId, input: &CreateProject, now: Timestamp) -> Result<Project, CoreError>;

    async fn find_by_id(&self, id: DbId) -> Result<Option<Project>, CoreError>;

    /// Every project, newest first.
    async fn list(&self) -> Result<Vec<Project>, CoreError>;
}

#[async_trait]
pub trait BudgetStore: Send + Sync {
    /// Fails with `CoreError::Conflict` if the fiscal year already exists.
    async fn create(&self, id: DbId, input: &CreateBudgetFlow, now: Timestamp) -> Result<BudgetFlow, CoreError>;

    async fn find_by_fiscal_year(&self, fiscal_year: &str) -> Result<Option<BudgetFlow>, CoreError>;

    /// Every fiscal year, latest first.
    async fn list(&self) -> Result<Vec<BudgetFlow>, CoreError>;
}
