use std::sync::Arc;

use civiclink_core::service::ComplaintService;
use civiclink_core::store::{BudgetStore, ComplaintStore, ProjectStore, RoleStore};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: the stores sit behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Complaint operations and the role registry.
    pub complaints: ComplaintService,
    pub projects: Arc<dyn ProjectStore>,
    pub budgets: Arc<dyn BudgetStore>,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Build state where one backend serves every store trait.
    pub fn from_store<S>(store: Arc<S>, config: ServerConfig) -> Self
    where
        S: ComplaintStore + RoleStore + ProjectStore + BudgetStore + 'static,
    {
        Self {
            complaints: ComplaintService::new(store.clone(), store.clone()),
            projects: store.clone(),
            budgets: store,
            config: Arc::new(config),
        }
    }
}
