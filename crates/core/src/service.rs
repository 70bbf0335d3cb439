//! Complaint operations: the access policy and the status lifecycle applied
//! on top of a [`ComplaintStore`].

use std::sync::Arc;

use chrono::Duration;

use crate::access::{self, Caller, OwnerFilter};
use crate::complaint::{Complaint, CreateComplaint};
use crate::display::ComplaintSummary;
use crate::error::CoreError;
use crate::lifecycle::{self, ComplaintStatus};
use crate::roles::Role;
use crate::search::{clamp_limit, ComplaintFilter, DEFAULT_RECENT_LIMIT, MAX_RECENT_LIMIT};
use crate::store::{ComplaintStore, Page, RoleStore, StatusChange};
use crate::types::{self, new_id, DbId, Timestamp};

/// Timestamp for a mutation of a record last touched at `previous`.
///
/// `updated_at` strictly advances on every mutation, even when the wall
/// clock has not.
pub fn next_update_time(previous: Timestamp) -> Timestamp {
    types::now().max(previous + Duration::microseconds(1))
}

#[derive(Clone)]
pub struct ComplaintService {
    complaints: Arc<dyn ComplaintStore>,
    roles: Arc<dyn RoleStore>,
}

impl ComplaintService {
    pub fn new(complaints: Arc<dyn ComplaintStore>, roles: Arc<dyn RoleStore>) -> Self {
        Self { complaints, roles }
    }

    /// Submit a complaint. Any caller may submit; the stored submitter is
    /// derived from the caller and the anonymity flag only.
    pub async fn create_complaint(
        &self,
        caller: &Caller,
        input: CreateComplaint,
    ) -> Result<Complaint, CoreError> {
        let draft = input.into_draft()?;
        let now = types::now();
        let complaint = Complaint {
            id: new_id(),
            category: draft.category,
            description: draft.description,
            location: draft.location,
            citizen_id: access::submitter_for(caller, draft.is_anonymous),
            is_anonymous: draft.is_anonymous,
            status: ComplaintStatus::Open,
            official_assigned: None,
            image_url: draft.image_url,
            created_at: now,
            updated_at: now,
        };
        self.complaints.insert(&complaint).await
    }

    /// List complaints visible to `caller`, newest first.
    ///
    /// The owner filter is narrowed by the access policy. Text, category,
    /// and status conditions are applied to the scoped result before
    /// pagination.
    pub async fn list_complaints(
        &self,
        caller: &Caller,
        owner: OwnerFilter,
        filter: &ComplaintFilter,
        page: Page,
    ) -> Result<Vec<Complaint>, CoreError> {
        let visibility = access::effective_visibility(caller, owner);
        if filter.is_empty() {
            return self.complaints.list(visibility, page).await;
        }
        let scoped = self.complaints.list(visibility, Page::unbounded()).await?;
        Ok(page.slice(filter.apply(scoped)))
    }

    /// The `n` most recent complaints visible to `caller`, as dashboard cards.
    pub async fn recent_complaints(
        &self,
        caller: &Caller,
        n: Option<i64>,
    ) -> Result<Vec<ComplaintSummary>, CoreError> {
        let limit = clamp_limit(n, DEFAULT_RECENT_LIMIT, MAX_RECENT_LIMIT);
        let visibility = access::effective_visibility(caller, OwnerFilter::default());
        let recent = self.complaints.list(visibility, Page::first(limit)).await?;
        let now = types::now();
        Ok(recent
            .iter()
            .map(|c| ComplaintSummary::from_complaint(c, now))
            .collect())
    }

    pub async fn get_complaint(&self, caller: &Caller, id: DbId) -> Result<Complaint, CoreError> {
        let complaint = self.find(id).await?;
        if !access::can_read(caller, &complaint) {
            return Err(CoreError::Forbidden(format!(
                "complaint {id} is not readable by {caller:?}"
            )));
        }
        Ok(complaint)
    }

    /// Move a complaint forward in its lifecycle. The acting official is
    /// recorded as assignee when nobody is assigned yet.
    pub async fn update_complaint_status(
        &self,
        caller: &Caller,
        id: DbId,
        new_status: ComplaintStatus,
    ) -> Result<Complaint, CoreError> {
        let (official_id, role) = access::require_staff(caller)?;
        let current = self.find(id).await?;
        lifecycle::validate_transition(current.status, new_status, role)?;

        let change = StatusChange {
            expected: current.status,
            status: new_status,
            official_assigned: current.official_assigned.or(Some(official_id)),
            updated_at: next_update_time(current.updated_at),
        };
        self.complaints
            .update_status(id, change)
            .await?
            .ok_or_else(|| CoreError::complaint_not_found(id))
    }

    /// Assign a handling official. The assignee must hold the official or
    /// admin role, and resolved complaints are closed to reassignment.
    pub async fn assign_official(
        &self,
        caller: &Caller,
        id: DbId,
        official_id: DbId,
    ) -> Result<Complaint, CoreError> {
        access::require_staff(caller)?;
        let current = self.find(id).await?;
        if current.status.is_terminal() {
            return Err(CoreError::Validation(
                "resolved complaints cannot be reassigned".into(),
            ));
        }
        let assignee_is_staff = self
            .roles
            .role_of(official_id)
            .await?
            .is_some_and(|r| r.is_staff());
        if !assignee_is_staff {
            return Err(CoreError::Validation(format!(
                "{official_id} does not hold the official or admin role"
            )));
        }
        self.complaints
            .assign_official(id, official_id, next_update_time(current.updated_at))
            .await?
            .ok_or_else(|| CoreError::complaint_not_found(id))
    }

    /// Effective role of `user_id`; `None` means no grant.
    pub async fn get_role(&self, user_id: DbId) -> Result<Option<Role>, CoreError> {
        self.roles.role_of(user_id).await
    }

    pub async fn grants(&self, user_id: DbId) -> Result<Vec<Role>, CoreError> {
        let mut grants = self.roles.grants_for(user_id).await?;
        grants.sort();
        Ok(grants)
    }

    pub async fn grant_role(&self, user_id: DbId, role: Role) -> Result<(), CoreError> {
        self.roles.grant(user_id, role).await
    }

    /// Returns whether a grant was removed.
    pub async fn revoke_role(&self, user_id: DbId, role: Role) -> Result<bool, CoreError> {
        self.roles.revoke(user_id, role).await
    }

    pub async fn health_check(&self) -> Result<(), CoreError> {
        self.complaints.health_check().await
    }

    async fn find(&self, id: DbId) -> Result<Complaint, CoreError> {
        self.complaints
            .find_by_id(id)
            .await?
            .ok_or_else(|| CoreError::complaint_not_found(id))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
