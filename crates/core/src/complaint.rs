//! Complaint model, categories, and submission validation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use validator::Validate;

use crate::error::CoreError;
use crate::lifecycle::ComplaintStatus;
use crate::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Validation constants
// ---------------------------------------------------------------------------

/// Maximum length for the complaint description (characters).
pub const MAX_DESCRIPTION_LENGTH: usize = 10_000;
/// Maximum length for the human-readable address (characters).
pub const MAX_ADDRESS_LENGTH: usize = 500;
/// Maximum length for an attachment reference.
pub const MAX_IMAGE_URL_LENGTH: usize = 2048;

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Category {
    Pothole,
    Streetlight,
    Garbage,
    Water,
    Drainage,
    #[serde(alias = "road")]
    RoadDamage,
    Other,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Pothole,
        Category::Streetlight,
        Category::Garbage,
        Category::Water,
        Category::Drainage,
        Category::RoadDamage,
        Category::Other,
    ];

    /// Storage and wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Pothole => "pothole",
            Category::Streetlight => "streetlight",
            Category::Garbage => "garbage",
            Category::Water => "water",
            Category::Drainage => "drainage",
            Category::RoadDamage => "road_damage",
            Category::Other => "other",
        }
    }

    /// Label shown on complaint badges.
    pub fn label(self) -> &'static str {
        match self {
            Category::Pothole => "Pothole",
            Category::Streetlight => "Streetlight",
            Category::Garbage => "Garbage",
            Category::Water => "Water",
            Category::Drainage => "Drainage",
            Category::RoadDamage => "Road Damage",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = CoreError;

    /// Case-insensitive. Accepts the storage name, the label, and the short
    /// form `road` used by older clients.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace([' ', '-'], "_");
        if normalized == "road" {
            return Ok(Category::RoadDamage);
        }
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == normalized)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Invalid category '{}'. Must be one of: {}",
                    s.trim(),
                    Category::ALL.map(Category::as_str).join(", ")
                ))
            })
    }
}

// ---------------------------------------------------------------------------
// Location
// ---------------------------------------------------------------------------

/// Where the issue was reported: coordinates plus a readable address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, TS)]
#[ts(export)]
pub struct Location {
    #[validate(range(min = -90.0, max = 90.0, message = "latitude must be within [-90, 90]"))]
    pub lat: f64,
    #[validate(range(min = -180.0, max = 180.0, message = "longitude must be within [-180, 180]"))]
    pub lng: f64,
    #[validate(length(max = 500, message = "address must be at most 500 characters"))]
    pub address: String,
}

/// Validate coordinates and address of a submitted location.
pub fn validate_location(location: &Location) -> Result<(), CoreError> {
    location
        .validate()
        .map_err(|e| CoreError::Validation(format!("Invalid location: {e}")))?;
    if location.address.trim().is_empty() {
        return Err(CoreError::Validation(
            "Location address must not be empty".into(),
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Complaint
// ---------------------------------------------------------------------------

/// A citizen-reported civic issue.
///
/// `is_anonymous` implies `citizen_id` is `None`; constructors in
/// [`crate::service`] and the table CHECK constraint both enforce it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Complaint {
    pub id: DbId,
    pub category: Category,
    pub description: String,
    pub location: Location,
    pub citizen_id: Option<DbId>,
    pub is_anonymous: bool,
    pub status: ComplaintStatus,
    pub official_assigned: Option<DbId>,
    pub image_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Submission payload. Every field is optional on the wire so a missing
/// field surfaces as a validation error rather than a decode failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateComplaint {
    pub category: Option<String>,
    pub description: Option<String>,
    pub location: Option<Location>,
    #[serde(default)]
    pub is_anonymous: Option<bool>,
    /// Ignored: the submitter is always derived from the caller.
    pub citizen_id: Option<DbId>,
    pub image_url: Option<String>,
}

/// A submission that passed validation. Identity fields are decided later
/// by the access policy.
#[derive(Debug, Clone, PartialEq)]
pub struct ComplaintDraft {
    pub category: Category,
    pub description: String,
    pub location: Location,
    pub is_anonymous: bool,
    pub image_url: Option<String>,
}

/// Validate the description length and content.
pub fn validate_description(description: &str) -> Result<(), CoreError> {
    if description.trim().is_empty() {
        return Err(CoreError::Validation("Description must not be empty".into()));
    }
    let len = description.chars().count();
    if len > MAX_DESCRIPTION_LENGTH {
        return Err(CoreError::Validation(format!(
            "Description exceeds maximum length of {MAX_DESCRIPTION_LENGTH} characters (got {len})"
        )));
    }
    Ok(())
}

impl CreateComplaint {
    /// Check required fields and constraints, producing a [`ComplaintDraft`].
    pub fn into_draft(self) -> Result<ComplaintDraft, CoreError> {
        let category = self
            .category
            .as_deref()
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| CoreError::Validation("category is required".into()))?
            .parse::<Category>()?;

        let description = self
            .description
            .ok_or_else(|| CoreError::Validation("description is required".into()))?;
        validate_description(&description)?;

        let mut location = self
            .location
            .ok_or_else(|| CoreError::Validation("location is required".into()))?;
        validate_location(&location)?;
        location.address = location.address.trim().to_string();

        let image_url = match self.image_url.map(|u| u.trim().to_string()) {
            Some(u) if u.is_empty() => None,
            Some(u) if u.len() > MAX_IMAGE_URL_LENGTH => {
                return Err(CoreError::Validation(format!(
                    "image_url exceeds maximum length of {MAX_IMAGE_URL_LENGTH} characters"
                )));
            }
            other => other,
        };

        Ok(ComplaintDraft {
            category,
            description: description.trim().to_string(),
            location,
            is_anonymous: self.is_anonymous.unwrap_or(false),
            image_url,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn main_road() -> Location {
        Location {
            lat: 12.9,
            lng: 77.6,
            address: "Main Rd".into(),
        }
    }

    fn valid_input() -> CreateComplaint {
        CreateComplaint {
            category: Some("pothole".into()),
            description: Some("crack on main road".into()),
            location: Some(main_road()),
            ..Default::default()
        }
    }

    #[test]
    fn category_parse_accepts_labels_and_legacy_names() {
        assert_eq!("Pothole".parse::<Category>().unwrap(), Category::Pothole);
        assert_eq!("Road Damage".parse::<Category>().unwrap(), Category::RoadDamage);
        assert_eq!("road".parse::<Category>().unwrap(), Category::RoadDamage);
        assert_eq!("ROAD_DAMAGE".parse::<Category>().unwrap(), Category::RoadDamage);
        assert_matches!("metro".parse::<Category>(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn category_names_round_trip() {
        for c in Category::ALL {
            assert_eq!(c.as_str().parse::<Category>().unwrap(), c);
            assert_eq!(c.label().parse::<Category>().unwrap(), c);
        }
    }

    #[test]
    fn valid_input_becomes_draft() {
        let draft = valid_input().into_draft().unwrap();
        assert_eq!(draft.category, Category::Pothole);
        assert_eq!(draft.description, "crack on main road");
        assert!(!draft.is_anonymous);
        assert_eq!(draft.image_url, None);
    }

    #[test]
    fn missing_required_fields_are_rejected() {
        let mut input = valid_input();
        input.category = None;
        assert_matches!(input.into_draft(), Err(CoreError::Validation(m)) if m.contains("category"));

        let mut input = valid_input();
        input.description = None;
        assert_matches!(input.into_draft(), Err(CoreError::Validation(m)) if m.contains("description"));

        let mut input = valid_input();
        input.location = None;
        assert_matches!(input.into_draft(), Err(CoreError::Validation(m)) if m.contains("location"));
    }

    #[test]
    fn blank_description_is_rejected() {
        let mut input = valid_input();
        input.description = Some("   ".into());
        assert_matches!(input.into_draft(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn description_over_limit_is_rejected() {
        assert!(validate_description(&"a".repeat(MAX_DESCRIPTION_LENGTH)).is_ok());
        assert!(validate_description(&"a".repeat(MAX_DESCRIPTION_LENGTH + 1)).is_err());
    }

    #[test]
    fn out_of_range_coordinates_are_rejected() {
        let mut input = valid_input();
        input.location = Some(Location {
            lat: 91.0,
            ..main_road()
        });
        assert_matches!(input.into_draft(), Err(CoreError::Validation(_)));

        let mut input = valid_input();
        input.location = Some(Location {
            lng: -180.5,
            ..main_road()
        });
        assert_matches!(input.into_draft(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn blank_address_is_rejected() {
        let mut input = valid_input();
        input.location = Some(Location {
            address: " ".into(),
            ..main_road()
        });
        assert_matches!(input.into_draft(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn empty_image_url_is_dropped() {
        let mut input = valid_input();
        input.image_url = Some("  ".into());
        assert_eq!(input.into_draft().unwrap().image_url, None);
    }
}
