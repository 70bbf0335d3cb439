//! Access policy for complaints.
//!
//! Decides, per caller, which complaints are readable, who is recorded as the
//! submitter, and who may change status or assignment.

use serde::Deserialize;

use crate::complaint::Complaint;
use crate::error::CoreError;
use crate::roles::Role;
use crate::types::DbId;

/// Generic denial text. Callers never learn why a check failed.
pub const DENIED: &str = "Not permitted";

/// Who is making a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Caller {
    /// No session.
    Anonymous,
    /// An authenticated identity and its effective role (`None` = no grant).
    User { id: DbId, role: Option<Role> },
}

impl Caller {
    pub fn user(id: DbId, role: Option<Role>) -> Self {
        Caller::User { id, role }
    }

    pub fn id(&self) -> Option<DbId> {
        match self {
            Caller::Anonymous => None,
            Caller::User { id, .. } => Some(*id),
        }
    }

    pub fn role(&self) -> Option<Role> {
        match self {
            Caller::Anonymous => None,
            Caller::User { role, .. } => *role,
        }
    }

    pub fn is_staff(&self) -> bool {
        self.role().is_some_and(Role::is_staff)
    }
}

/// The set of complaints a list query may return, as understood by stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    All,
    OwnedBy(DbId),
    OwnedByOrAnonymous(DbId),
    AnonymousOnly,
}

impl Visibility {
    pub fn admits(&self, complaint: &Complaint) -> bool {
        match self {
            Visibility::All => true,
            Visibility::OwnedBy(owner) => complaint.citizen_id == Some(*owner),
            Visibility::OwnedByOrAnonymous(owner) => {
                complaint.is_anonymous || complaint.citizen_id == Some(*owner)
            }
            Visibility::AnonymousOnly => complaint.is_anonymous,
        }
    }
}

/// Owner filter requested by a list call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct OwnerFilter {
    pub owner_id: Option<DbId>,
    #[serde(default = "default_include_anonymous")]
    pub include_anonymous: bool,
}

fn default_include_anonymous() -> bool {
    true
}

impl Default for OwnerFilter {
    fn default() -> Self {
        Self {
            owner_id: None,
            include_anonymous: true,
        }
    }
}

/// Narrow a requested owner filter to what `caller` may see.
///
/// Staff get exactly what they ask for; without an owner that is every
/// complaint. Other identities are pinned to their own records. Anonymous
/// callers only ever see anonymous complaints.
pub fn effective_visibility(caller: &Caller, requested: OwnerFilter) -> Visibility {
    let owner_visibility = |owner: DbId| {
        if requested.include_anonymous {
            Visibility::OwnedByOrAnonymous(owner)
        } else {
            Visibility::OwnedBy(owner)
        }
    };

    match caller {
        Caller::Anonymous => Visibility::AnonymousOnly,
        Caller::User { .. } if caller.is_staff() => match requested.owner_id {
            Some(owner) => owner_visibility(owner),
            None => Visibility::All,
        },
        Caller::User { id, .. } => owner_visibility(*id),
    }
}

/// Read predicate for a single complaint.
pub fn can_read(caller: &Caller, complaint: &Complaint) -> bool {
    if caller.is_staff() {
        return true;
    }
    match caller.id() {
        Some(id) => Visibility::OwnedByOrAnonymous(id).admits(complaint),
        None => complaint.is_anonymous,
    }
}

/// The submitter recorded for a new complaint. The server decides; any
/// client-supplied identity is disregarded.
pub fn submitter_for(caller: &Caller, is_anonymous: bool) -> Option<DbId> {
    if is_anonymous {
        None
    } else {
        caller.id()
    }
}

/// Require an official or admin caller, returning its id and role.
pub fn require_staff(caller: &Caller) -> Result<(DbId, Role), CoreError> {
    match caller {
        Caller::User {
            id,
            role: Some(role),
        } if role.is_staff() => Ok((*id, *role)),
        _ => Err(CoreError::Forbidden(format!(
            "complaint mutation requires official or admin role (caller: {caller:?})"
        ))),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
