//! [`PgStore`]: the PostgreSQL implementation of the core store traits.

use async_trait::async_trait;
use civiclink_core::access::Visibility;
use civiclink_core::budget::{BudgetFlow, CreateBudgetFlow};
use civiclink_core::complaint::Complaint;
use civiclink_core::error::CoreError;
use civiclink_core::project::{CreateProject, Project};
use civiclink_core::roles::Role;
use civiclink_core::store::{BudgetStore, ComplaintStore, Page, ProjectStore, RoleStore, StatusChange};
use civiclink_core::types::{DbId, Timestamp};

use crate::repositories::{BudgetFlowRepo, ComplaintRepo, ProjectRepo, RoleRepo};
use crate::{store_error, DbPool};

#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl ComplaintStore for PgStore {
    async fn insert(&self, complaint: &Complaint) -> Result<Complaint, CoreError> {
        ComplaintRepo::insert(&self.pool, complaint)
            .await
            .map_err(store_error)?
            .try_into()
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Complaint>, CoreError> {
        ComplaintRepo::find_by_id(&self.pool, id)
            .await
            .map_err(store_error)?
            .map(Complaint::try_from)
            .transpose()
    }

    async fn list(&self, visibility: Visibility, page: Page) -> Result<Vec<Complaint>, CoreError> {
        ComplaintRepo::list(&self.pool, visibility, page)
            .await
            .map_err(store_error)?
            .into_iter()
            .map(Complaint::try_from)
            .collect()
    }

    async fn update_status(
        &self,
        id: DbId,
        change: StatusChange,
    ) -> Result<Option<Complaint>, CoreError> {
        let updated = ComplaintRepo::update_status(&self.pool, id, &change)
            .await
            .map_err(store_error)?;
        match updated {
            Some(row) => Ok(Some(row.try_into()?)),
            // The guarded update matched nothing: either the row is gone or
            // its status moved since it was read.
            None => match ComplaintStore::find_by_id(self, id).await? {
                Some(_) => Err(CoreError::Conflict(format!(
                    "complaint {id} changed status concurrently"
                ))),
                None => Ok(None),
            },
        }
    }

    async fn assign_official(
        &self,
        id: DbId,
        official_id: DbId,
        updated_at: Timestamp,
    ) -> Result<Option<Complaint>, CoreError> {
        let updated = ComplaintRepo::assign_official(&self.pool, id, official_id, updated_at)
            .await
            .map_err(store_error)?;
        match updated {
            Some(row) => Ok(Some(row.try_into()?)),
            // Resolved complaints are excluded by the guarded update.
            None => match ComplaintStore::find_by_id(self, id).await? {
                Some(_) => Err(CoreError::Conflict(format!(
                    "complaint {id} was resolved concurrently"
                ))),
                None => Ok(None),
            },
        }
    }

    async fn health_check(&self) -> Result<(), CoreError> {
        crate::health_check(&self.pool).await.map_err(store_error)
    }
}

#[async_trait]
impl RoleStore for PgStore {
    async fn grants_for(&self, user_id: DbId) -> Result<Vec<Role>, CoreError> {
        RoleRepo::list_for_user(&self.pool, user_id)
            .await
            .map_err(store_error)?
            .into_iter()
            .map(Role::try_from)
            .collect()
    }

    async fn grant(&self, user_id: DbId, role: Role) -> Result<(), CoreError> {
        RoleRepo::grant(&self.pool, user_id, role)
            .await
            .map_err(store_error)
    }

    async fn revoke(&self, user_id: DbId, role: Role) -> Result<bool, CoreError> {
        RoleRepo::revoke(&self.pool, user_id, role)
            .await
            .map_err(store_error)
    }
}

#[async_trait]
impl ProjectStore for PgStore {
    async fn create(&self, id: DbId, input: &CreateProject, now: Timestamp) -> Result<Project, CoreError> {
        let row = ProjectRepo::create(&self.pool, id, input, now)
            .await
            .map_err(store_error)?;
        Ok(row.into())
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Project>, CoreError> {
        let row = ProjectRepo::find_by_id(&self.pool, id)
            .await
            .map_err(store_error)?;
        Ok(row.map(Project::from))
    }

    async fn list(&self) -> Result<Vec<Project>, CoreError> {
        let rows = ProjectRepo::list(&self.pool).await.map_err(store_error)?;
        Ok(rows.into_iter().map(Project::from).collect())
    }
}

#[async_trait]
impl BudgetStore for PgStore {
    async fn create(&self, id: DbId, input: &CreateBudgetFlow, now: Timestamp) -> Result<BudgetFlow, CoreError> {
        let row = BudgetFlowRepo::create(&self.pool, id, input, now)
            .await
            .map_err(store_error)?;
        Ok(row.into())
    }

    async fn find_by_fiscal_year(&self, fiscal_year: &str) -> Result<Option<BudgetFlow>, CoreError> {
        let row = BudgetFlowRepo::find_by_fiscal_year(&self.pool, fiscal_year)
            .await
            .map_err(store_error)?;
        Ok(row.map(BudgetFlow::from))
    }

    async fn list(&self) -> Result<Vec<BudgetFlow>, CoreError> {
        let rows = BudgetFlowRepo::list(&self.pool).await.map_err(store_error)?;
        Ok(rows.into_iter().map(BudgetFlow::from).collect())
    }
}
