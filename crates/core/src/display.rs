//! Display helpers shared by the dashboard views: relative times, rupee
//! amounts, and the compact complaint card.

use serde::Serialize;
use ts_rs::TS;

use crate::complaint::Complaint;
use crate::types::{DbId, Timestamp};

const LAKH: i128 = 100_000;
const CRORE: i128 = 10_000_000;

/// Relative age of `then` as seen at `now`: `just now`, `13m ago`, `5h ago`,
/// `3d ago`. Timestamps in the future read as `just now`.
pub fn time_ago(then: Timestamp, now: Timestamp) -> String {
    let secs = (now - then).num_seconds();
    match secs {
        s if s < 60 => "just now".to_string(),
        s if s < 3_600 => format!("{}m ago", s / 60),
        s if s < 86_400 => format!("{}h ago", s / 3_600),
        s => format!("{}d ago", s / 86_400),
    }
}

/// Format a whole-rupee amount the way budget cards show it:
/// `₹85 Crore`, `₹12.5 Crore`, `₹40 Lakh`, `₹9500`.
pub fn format_rupees(amount: i64) -> String {
    let abs = i128::from(amount).abs();
    let sign = if amount < 0 { "-" } else { "" };
    if abs >= CRORE {
        format!("{sign}₹{} Crore", scaled(abs, CRORE))
    } else if abs >= LAKH {
        format!("{sign}₹{} Lakh", scaled(abs, LAKH))
    } else {
        format!("{sign}₹{abs}")
    }
}

/// `amount / unit` with up to two decimals, trailing zeros dropped.
fn scaled(amount: i128, unit: i128) -> String {
    let hundredths = (amount * 100 + unit / 2) / unit;
    let whole = hundredths / 100;
    let frac = hundredths % 100;
    match frac {
        0 => whole.to_string(),
        f if f % 10 == 0 => format!("{whole}.{}", f / 10),
        f => format!("{whole}.{f:02}"),
    }
}

/// Compact complaint card used by the dashboard's recent list.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct ComplaintSummary {
    pub id: DbId,
    pub category: String,
    pub description: String,
    pub status: String,
    pub time_ago: String,
}

impl ComplaintSummary {
    pub fn from_complaint(complaint: &Complaint, now: Timestamp) -> Self {
        Self {
            id: complaint.id,
            category: complaint.category.label().to_string(),
            description: complaint.description.clone(),
            status: complaint.status.label().to_string(),
            time_ago: time_ago(complaint.created_at, now),
        }
    }
}
