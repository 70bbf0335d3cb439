//! Role names and the effective-role rule.
//!
//! Roles are grants held in a separate registry keyed by identity, never a
//! field on the identity itself. The names must match the CHECK constraint in
//! `20261015000002_create_user_roles.sql`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_OFFICIAL: &str = "official";
pub const ROLE_CITIZEN: &str = "citizen";
/// Reported by `getRole` for identities without any grant.
pub const ROLE_NONE: &str = "none";

/// A grantable role. Variants are declared in ascending privilege so the
/// derived `Ord` ranks them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Role {
    Citizen,
    Official,
    Admin,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Citizen, Role::Official, Role::Admin];

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Citizen => ROLE_CITIZEN,
            Role::Official => ROLE_OFFICIAL,
            Role::Admin => ROLE_ADMIN,
        }
    }

    /// Officials and admins handle complaints.
    pub fn is_staff(self) -> bool {
        matches!(self, Role::Official | Role::Admin)
    }

    /// The effective role of an identity holding `grants`: the most
    /// privileged one, or `None` without grants.
    pub fn effective<I: IntoIterator<Item = Role>>(grants: I) -> Option<Role> {
        grants.into_iter().max()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            ROLE_CITIZEN => Ok(Role::Citizen),
            ROLE_OFFICIAL => Ok(Role::Official),
            ROLE_ADMIN => Ok(Role::Admin),
            other => Err(CoreError::Validation(format!(
                "Invalid role '{other}'. Must be one of: citizen, official, admin"
            ))),
        }
    }
}

/// Wire name of an effective role, `"none"` when there is no grant.
pub fn role_name(role: Option<Role>) -> &'static str {
    role.map(Role::as_str).unwrap_or(ROLE_NONE)
}
