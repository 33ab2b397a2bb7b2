//! Canonical missionary record
//!
//! This is the shape cached in the settings database and handed to the
//! slideshow. One record is one slide: either a single missionary or a merged
//! senior couple.

use serde::{Deserialize, Serialize};

/// Gender as reported by the roster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Parse the roster's `"MALE"` / `"FEMALE"` value. Anything else is unset.
    pub fn from_roster(value: &str) -> Option<Self> {
        match value {
            "MALE" => Some(Gender::Male),
            "FEMALE" => Some(Gender::Female),
            _ => None,
        }
    }

    /// Honorific used in display names
    pub fn title(self) -> &'static str {
        match self {
            Gender::Male => "Elder",
            Gender::Female => "Sister",
        }
    }
}

/// Missionary data
///
/// Equality is identity: two records are equal when their `id`s are equal.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Missionary {
    /// External person id. `0` marks a synthetic record.
    pub id: i64,
    /// Display name, e.g. "Elder John Smith" or "Elder John & Sister Jane Smith"
    pub name: String,
    /// "Surname, Forename" as delivered upstream
    pub sort_name: String,
    pub gender: Option<Gender>,
    /// Set only by a successful couple merge
    pub couple: bool,
    pub senior: bool,
    pub mission: String,
    /// "Aug 2023 - Dec 2024", or empty when either bound is missing
    pub dates_serving: String,
    pub home_unit: String,
    /// Filename within the photos folder, empty if none was found
    pub image_path: String,
    /// Final URL for the slide: the photo or a placeholder
    pub photo_url: String,
}

impl PartialEq for Missionary {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Missionary {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality_is_by_id() {
        let a = Missionary {
            id: 7,
            name: "Elder A".to_string(),
            ..Default::default()
        };
        let b = Missionary {
            id: 7,
            name: "Sister B".to_string(),
            ..Default::default()
        };
        let c = Missionary {
            id: 8,
            name: "Elder A".to_string(),
            ..Default::default()
        };

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_gender_from_roster() {
        assert_eq!(Gender::from_roster("MALE"), Some(Gender::Male));
        assert_eq!(Gender::from_roster("FEMALE"), Some(Gender::Female));
        assert_eq!(Gender::from_roster("female"), None);
        assert_eq!(Gender::from_roster(""), None);
    }

    #[test]
    fn test_cached_shape_tolerates_missing_fields() {
        let missionary: Missionary =
            serde_json::from_str(r#"{"id": 3, "name": "Sister Jones", "gender": "FEMALE"}"#).unwrap();

        assert_eq!(missionary.id, 3);
        assert_eq!(missionary.gender, Some(Gender::Female));
        assert!(missionary.photo_url.is_empty());
        assert!(!missionary.couple);
    }
}
