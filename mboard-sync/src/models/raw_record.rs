//! Raw roster record schema
//!
//! Mirrors one entry of the church website's full-time missionary listing.
//! Every field is optional so a sparse or partially broken record still
//! deserializes; the normalizer decides what to do with the gaps. The same
//! schema is used for `extra/missionaries.json`.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

/// Status value for a missionary who is currently serving
pub const SERVING_STATUS: &str = "SERVING";

/// One roster entry
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawRecord {
    /// "Surname, Forename"
    pub missionary_name: Option<String>,
    pub status: Option<String>,
    pub missionary_individual_id: Option<i64>,
    pub member: Option<RawMember>,
    /// "YYYYMMDD"
    pub start_date: Option<String>,
    /// "YYYYMMDD"
    pub end_date: Option<String>,
    pub mission_name: Option<String>,
    pub missionary_home_unit_name: Option<String>,
    pub senior_missionary: Option<bool>,
}

/// Membership details nested in a roster entry
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawMember {
    pub gender: Option<String>,
    /// "YYYYMMDD"
    pub birth_date: Option<String>,
}

impl RawRecord {
    /// Whether the record belongs on the board: it has a name and the
    /// missionary is currently serving.
    pub fn is_currently_serving(&self) -> bool {
        let has_name = self
            .missionary_name
            .as_deref()
            .is_some_and(|name| !name.is_empty());
        has_name && self.status.as_deref() == Some(SERVING_STATUS)
    }

    pub fn gender(&self) -> Option<&str> {
        self.member.as_ref().and_then(|m| m.gender.as_deref())
    }

    pub fn birth_date(&self) -> Option<&str> {
        self.member.as_ref().and_then(|m| m.birth_date.as_deref())
    }
}

/// Decode a roster listing one entry at a time
///
/// An entry whose fields have the wrong JSON types is logged and dropped;
/// the rest of the listing is kept.
pub fn decode_records(entries: Vec<Value>) -> Vec<RawRecord> {
    entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match serde_json::from_value::<RawRecord>(entry) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(index, "Skipping unreadable roster record: {}", e);
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_roster_entry() {
        let record: RawRecord = serde_json::from_str(
            r#"{
                "missionaryName": "Wilson, Thomas",
                "status": "SERVING",
                "missionaryIndividualId": 87654321098,
                "member": {"gender": "MALE", "birthDate": "20040312", "phone": "x"},
                "startDate": "20230814",
                "endDate": "20250814",
                "missionName": "Guatemala Guatemala City East",
                "missionaryHomeUnitName": "Sego Lily Ward",
                "seniorMissionary": false,
                "unitNumber": 42
            }"#,
        )
        .unwrap();

        assert_eq!(record.missionary_name.as_deref(), Some("Wilson, Thomas"));
        assert_eq!(record.missionary_individual_id, Some(87654321098));
        assert_eq!(record.gender(), Some("MALE"));
        assert_eq!(record.birth_date(), Some("20040312"));
        assert_eq!(record.senior_missionary, Some(false));
        assert!(record.is_currently_serving());
    }

    #[test]
    fn test_null_member_and_missing_fields() {
        let record: RawRecord =
            serde_json::from_str(r#"{"missionaryName": "Doe, Jane", "member": null}"#).unwrap();

        assert_eq!(record.gender(), None);
        assert_eq!(record.birth_date(), None);
        assert_eq!(record.missionary_individual_id, None);
    }

    #[test]
    fn test_filter_requires_name_and_serving_status() {
        let serving = RawRecord {
            missionary_name: Some("Doe, Jane".to_string()),
            status: Some("SERVING".to_string()),
            ..Default::default()
        };
        assert!(serving.is_currently_serving());

        let released = RawRecord {
            status: Some("RELEASED".to_string()),
            ..serving.clone()
        };
        assert!(!released.is_currently_serving());

        let empty_name = RawRecord {
            missionary_name: Some(String::new()),
            ..serving.clone()
        };
        assert!(!empty_name.is_currently_serving());

        let no_name = RawRecord {
            missionary_name: None,
            ..serving
        };
        assert!(!no_name.is_currently_serving());
    }

    #[test]
    fn test_decode_records_drops_only_badly_typed_entries() {
        let entries: Vec<Value> = serde_json::from_str(
            r#"[
                {"missionaryName": "Wilson, Thomas", "status": "SERVING"},
                {"missionaryName": "Johnson, Emily", "seniorMissionary": "Y"},
                {"missionaryName": "Brown, Daniel", "missionaryIndividualId": "42"},
                {"missionaryName": 17},
                {"missionaryName": "Lee, Anna", "status": "SERVING"}
            ]"#,
        )
        .unwrap();

        let records = decode_records(entries);

        let names: Vec<&str> = records
            .iter()
            .filter_map(|r| r.missionary_name.as_deref())
            .collect();
        assert_eq!(names, vec!["Wilson, Thomas", "Lee, Anna"]);
    }

    #[test]
    fn test_decode_records_skips_non_objects() {
        let entries = vec![Value::Null, Value::from("text"), serde_json::json!({})];
        assert_eq!(decode_records(entries).len(), 1);
    }
}
