//! Derived list views: pagination clamps and the free-text / category
//! filters applied after scoped retrieval.

use crate::complaint::{Category, Complaint};
use crate::error::CoreError;
use crate::lifecycle::ComplaintStatus;

/// Default page size for complaint listings.
pub const DEFAULT_LIST_LIMIT: i64 = 50;
/// Maximum page size for complaint listings.
pub const MAX_LIST_LIMIT: i64 = 200;
/// The dashboard shows this many recent complaints.
pub const DEFAULT_RECENT_LIMIT: i64 = 4;
pub const MAX_RECENT_LIMIT: i64 = 50;

/// Filter value meaning "no category filter".
pub const ALL_CATEGORIES: &str = "all";

/// Clamp a user-provided limit to `[1, max]`, using `default` if absent.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

/// Clamp a user-provided offset to non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}

/// Case-insensitive substring match. An empty needle matches everything.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Normalise an optional category filter: blank or `all` means no filter.
pub fn category_filter(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim)
        .filter(|c| !c.is_empty() && !c.eq_ignore_ascii_case(ALL_CATEGORIES))
}

/// Free-text, category, and status filter over complaints. Conditions are
/// combined with AND; unset conditions match everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComplaintFilter {
    /// Matched against the description and the complaint id.
    pub text: Option<String>,
    pub category: Option<Category>,
    pub status: Option<ComplaintStatus>,
}

impl ComplaintFilter {
    /// Build a filter from raw query values.
    pub fn parse(
        text: Option<&str>,
        category: Option<&str>,
        status: Option<&str>,
    ) -> Result<Self, CoreError> {
        let text = text
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string);
        let category = category_filter(category)
            .map(str::parse::<Category>)
            .transpose()?;
        let status = status
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::parse::<ComplaintStatus>)
            .transpose()?;
        Ok(Self {
            text,
            category,
            status,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.category.is_none() && self.status.is_none()
    }

    pub fn matches(&self, complaint: &Complaint) -> bool {
        let text_ok = self.text.as_deref().map_or(true, |t| {
            contains_ignore_case(&complaint.description, t)
                || contains_ignore_case(&complaint.id.to_string(), t)
        });
        let category_ok = self.category.map_or(true, |c| c == complaint.category);
        let status_ok = self.status.map_or(true, |s| s == complaint.status);
        text_ok && category_ok && status_ok
    }

    /// Keep matching complaints, preserving order.
    pub fn apply(&self, complaints: Vec<Complaint>) -> Vec<Complaint> {
        if self.is_empty() {
            return complaints;
        }
        complaints.into_iter().filter(|c| self.matches(c)).collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
