//! Shared query parameter types for API handlers.

use civiclink_core::search::{clamp_limit, clamp_offset};
use civiclink_core::store::Page;
use serde::Deserialize;

/// Generic pagination parameters (`?limit=&offset=`).
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl PaginationParams {
    /// Clamp into a store page window.
    pub fn page(&self, default_limit: i64, max_limit: i64) -> Page {
        Page {
            limit: Some(clamp_limit(self.limit, default_limit, max_limit)),
            offset: clamp_offset(self.offset),
        }
    }
}
