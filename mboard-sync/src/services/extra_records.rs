//! Extra roster records
//!
//! Missionaries who are not on the church website roster (part-time service
//! missionaries, for example) can be listed in
//! `<instance>/extra/missionaries.json` using the same schema as the roster:
//!
//! ```json
//! [
//!     {
//!         "member": { "gender": "FEMALE" },
//!         "missionaryIndividualId": 1,
//!         "missionaryName": "Darling, Wendy",
//!         "missionName": "FamilySearch",
//!         "missionaryHomeUnitName": "Neverland 1st Ward",
//!         "startDate": "20240430",
//!         "endDate": "20241231"
//!     }
//! ]
//! ```
//!
//! These records skip the serving-status filter. An entry with wrongly typed
//! fields is dropped on its own; a file that is not a JSON list is an error.

use crate::models::{decode_records, RawRecord};
use anyhow::{Context, Result};
use std::path::Path;

/// Load extra records. A missing file means no extra records.
pub fn load_extra_records(path: &Path) -> Result<Vec<RawRecord>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let entries: Vec<serde_json::Value> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    Ok(decode_records(entries))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let records = load_extra_records(&temp_dir.path().join("missionaries.json")).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_load_records() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missionaries.json");
        std::fs::write(
            &path,
            r#"[{"missionaryIndividualId": 1, "missionaryName": "Darling, Wendy",
                 "member": {"gender": "FEMALE"}}]"#,
        )
        .unwrap();

        let records = load_extra_records(&path).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].missionary_name.as_deref(), Some("Darling, Wendy"));
        assert_eq!(records[0].status, None);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missionaries.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = load_extra_records(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to parse"));
    }

    #[test]
    fn test_badly_typed_entry_is_dropped() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missionaries.json");
        std::fs::write(
            &path,
            r#"[
                {"missionaryIndividualId": 1, "missionaryName": "Darling, Wendy"},
                {"missionaryIndividualId": 2, "missionaryName": "Pan, Peter", "seniorMissionary": "Y"},
                {"missionaryIndividualId": 3, "missionaryName": "Bell, Tinker"}
            ]"#,
        )
        .unwrap();

        let records = load_extra_records(&path).unwrap();
        let ids: Vec<Option<i64>> = records.iter().map(|r| r.missionary_individual_id).collect();
        assert_eq!(ids, vec![Some(1), Some(3)]);
    }
}
