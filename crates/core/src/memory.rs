//! In-process store used for local development and tests.
//!
//! Each table is a map behind its own `tokio::sync::RwLock`, so writes to the
//! same table are serialised and reads see committed state.

use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::access::Visibility;
use crate::budget::{BudgetFlow, CreateBudgetFlow};
use crate::complaint::Complaint;
use crate::error::CoreError;
use crate::project::{CreateProject, Project};
use crate::roles::Role;
use crate::store::{BudgetStore, ComplaintStore, Page, ProjectStore, RoleStore, StatusChange};
use crate::types::{DbId, Timestamp};

#[derive(Default)]
pub struct MemoryStore {
    complaints: RwLock<HashMap<DbId, Complaint>>,
    grants: RwLock<HashMap<DbId, BTreeSet<Role>>>,
    projects: RwLock<HashMap<DbId, Project>>,
    budgets: RwLock<HashMap<String, BudgetFlow>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Newest first; ids break ties so the order is total.
fn newest_first<T, F>(items: &mut [T], key: F)
where
    F: Fn(&T) -> (Timestamp, DbId),
{
    items.sort_by(|a, b| key(b).cmp(&key(a)));
}

#[async_trait]
impl ComplaintStore for MemoryStore {
    async fn insert(&self, complaint: &Complaint) -> Result<Complaint, CoreError> {
        if complaint.is_anonymous && complaint.citizen_id.is_some() {
            return Err(CoreError::Validation(
                "anonymous complaints must not reference a citizen".into(),
            ));
        }
        let mut complaints = self.complaints.write().await;
        if complaints.contains_key(&complaint.id) {
            return Err(CoreError::Conflict(format!(
                "complaint {} already exists",
                complaint.id
            )));
        }
        complaints.insert(complaint.id, complaint.clone());
        Ok(complaint.clone())
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Complaint>, CoreError> {
        Ok(self.complaints.read().await.get(&id).cloned())
    }

    async fn list(&self, visibility: Visibility, page: Page) -> Result<Vec<Complaint>, CoreError> {
        let mut visible: Vec<Complaint> = self
            .complaints
            .read()
            .await
            .values()
            .filter(|c| visibility.admits(c))
            .cloned()
            .collect();
        newest_first(&mut visible, |c| (c.created_at, c.id));
        Ok(page.slice(visible))
    }

    async fn update_status(
        &self,
        id: DbId,
        change: StatusChange,
    ) -> Result<Option<Complaint>, CoreError> {
        let mut complaints = self.complaints.write().await;
        let Some(complaint) = complaints.get_mut(&id) else {
            return Ok(None);
        };
        if complaint.status != change.expected {
            return Err(CoreError::Conflict(format!(
                "complaint {id} changed status concurrently"
            )));
        }
        complaint.status = change.status;
        complaint.official_assigned = change.official_assigned;
        complaint.updated_at = change.updated_at;
        Ok(Some(complaint.clone()))
    }

    async fn assign_official(
        &self,
        id: DbId,
        official_id: DbId,
        updated_at: Timestamp,
    ) -> Result<Option<Complaint>, CoreError> {
        let mut complaints = self.complaints.write().await;
        let Some(complaint) = complaints.get_mut(&id) else {
            return Ok(None);
        };
        if complaint.status.is_terminal() {
            return Err(CoreError::Conflict(format!(
                "complaint {id} was resolved concurrently"
            )));
        }
        complaint.official_assigned = Some(official_id);
        complaint.updated_at = updated_at;
        Ok(Some(complaint.clone()))
    }

    async fn health_check(&self) -> Result<(), CoreError> {
        Ok(())
    }
}

#[async_trait]
impl RoleStore for MemoryStore {
    async fn grants_for(&self, user_id: DbId) -> Result<Vec<Role>, CoreError> {
        Ok(self
            .grants
            .read()
            .await
            .get(&user_id)
            .map(|roles| roles.iter().copied().collect())
            .unwrap_or_default())
    }

    async fn grant(&self, user_id: DbId, role: Role) -> Result<(), CoreError> {
        self.grants
            .write()
            .await
            .entry(user_id)
            .or_default()
            .insert(role);
        Ok(())
    }

    async fn revoke(&self, user_id: DbId, role: Role) -> Result<bool, CoreError> {
        let mut grants = self.grants.write().await;
        let Some(roles) = grants.get_mut(&user_id) else {
            return Ok(false);
        };
        let removed = roles.remove(&role);
        if roles.is_empty() {
            grants.remove(&user_id);
        }
        Ok(removed)
    }
}

#[async_trait]
impl ProjectStore for MemoryStore {
    async fn create(&self, id: DbId, input: &CreateProject, now: Timestamp) -> Result<Project, CoreError> {
        let project = Project {
            id,
            title: input.title.trim().to_string(),
            category: input.category.trim().to_string(),
            short_description: input.short_description.clone(),
            detailed_description: input.detailed_description.clone(),
            cost: input.cost,
            ward: input.ward,
            contractor: input.contractor.clone(),
            start_date: input.start_date,
            completion_date: input.completion_date,
            duration_months: input.duration_months,
            progress_percent: input.progress_percent,
            geo_location: input.geo_location,
            images: input.images.clone(),
            created_at: now,
            updated_at: now,
        };
        self.projects.write().await.insert(id, project.clone());
        Ok(project)
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Project>, CoreError> {
        Ok(self.projects.read().await.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<Project>, CoreError> {
        let mut projects: Vec<Project> = self.projects.read().await.values().cloned().collect();
        newest_first(&mut projects, |p| (p.created_at, p.id));
        Ok(projects)
    }
}

#[async_trait]
impl BudgetStore for MemoryStore {
    async fn create(&self, id: DbId, input: &CreateBudgetFlow, now: Timestamp) -> Result<BudgetFlow, CoreError> {
        let mut budgets = self.budgets.write().await;
        if budgets.contains_key(&input.fiscal_year) {
            return Err(CoreError::Conflict(format!(
                "budget flow for fiscal year {} already exists",
                input.fiscal_year
            )));
        }
        let flow = BudgetFlow {
            id,
            fiscal_year: input.fiscal_year.clone(),
            bbmp_budget: input.bbmp_budget,
            state_funds: input.state_funds,
            central_funds: input.central_funds,
            category_wise_breakdown: input.category_wise_breakdown.clone(),
            created_at: now,
            updated_at: now,
        };
        budgets.insert(flow.fiscal_year.clone(), flow.clone());
        Ok(flow)
    }

    async fn find_by_fiscal_year(&self, fiscal_year: &str) -> Result<Option<BudgetFlow>, CoreError> {
        Ok(self.budgets.read().await.get(fiscal_year).cloned())
    }

    async fn list(&self) -> Result<Vec<BudgetFlow>, CoreError> {
        let mut flows: Vec<BudgetFlow> = self.budgets.read().await.values().cloned().collect();
        flows.sort_by(|a, b| b.fiscal_year.cmp(&a.fiscal_year));
        Ok(flows)
    }
}
