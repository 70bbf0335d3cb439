//! Complaint status lifecycle.
//!
//! `open -> under_review -> resolved`. Transitions only move forward; the
//! forward skip `open -> resolved` is reserved for admins.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;
use crate::roles::Role;

/// Declared in lifecycle order so the derived `Ord` is the forward order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ComplaintStatus {
    Open,
    #[serde(alias = "review")]
    UnderReview,
    Resolved,
}

impl ComplaintStatus {
    pub const ALL: [ComplaintStatus; 3] = [
        ComplaintStatus::Open,
        ComplaintStatus::UnderReview,
        ComplaintStatus::Resolved,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ComplaintStatus::Open => "open",
            ComplaintStatus::UnderReview => "under_review",
            ComplaintStatus::Resolved => "resolved",
        }
    }

    /// Badge text.
    pub fn label(self) -> &'static str {
        match self {
            ComplaintStatus::Open => "Open",
            ComplaintStatus::UnderReview => "Under Review",
            ComplaintStatus::Resolved => "Resolved",
        }
    }

    pub fn is_terminal(self) -> bool {
        self == ComplaintStatus::Resolved
    }

    /// Statuses reachable in one step by a holder of `role`.
    pub fn next_for(self, role: Role) -> &'static [ComplaintStatus] {
        use ComplaintStatus::*;
        match (self, role) {
            (_, Role::Citizen) => &[],
            (Open, Role::Admin) => &[UnderReview, Resolved],
            (Open, Role::Official) => &[UnderReview],
            (UnderReview, _) => &[Resolved],
            (Resolved, _) => &[],
        }
    }
}

impl fmt::Display for ComplaintStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComplaintStatus {
    type Err = CoreError;

    /// Case-insensitive; accepts `"Under Review"` and the short form `review`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace([' ', '-'], "_").as_str() {
            "open" => Ok(ComplaintStatus::Open),
            "under_review" | "review" => Ok(ComplaintStatus::UnderReview),
            "resolved" => Ok(ComplaintStatus::Resolved),
            _ => Err(CoreError::Validation(format!(
                "Invalid complaint status '{}'. Must be one of: open, under_review, resolved",
                s.trim()
            ))),
        }
    }
}

/// Validate that `role` may move a complaint from `current` to `next`.
pub fn validate_transition(
    current: ComplaintStatus,
    next: ComplaintStatus,
    role: Role,
) -> Result<(), CoreError> {
    if current.next_for(role).contains(&next) {
        return Ok(());
    }
    let reason = if next == current {
        "complaint is already in that status"
    } else if next < current {
        "status can only move forward"
    } else {
        "forward skips require the admin role"
    };
    Err(CoreError::Validation(format!(
        "Cannot transition complaint from '{current}' to '{next}': {reason}"
    )))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
