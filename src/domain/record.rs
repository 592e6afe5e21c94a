//! Record types for the provider pipeline
//!
//! `RawRecord` is the untyped shape returned by the CMS datastore API: one
//! flat object per provider-specialty-location combination, every value a
//! string (empty string standing in for null). The typed rows are produced
//! at the transform boundary and are the only shapes that reach the
//! warehouse.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One raw record from the CMS datastore API
///
/// A flat mapping from source field name to string value. Records are not
/// uniquely keyed; the same `npi` appears once per specialty/location row.
pub type RawRecord = BTreeMap<String, String>;

/// One row of the `doctors` output table
///
/// Person-level attributes keyed by `npi`. The transformer guarantees
/// exactly one row per distinct `npi` (first occurrence wins).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoctorRow {
    pub npi: String,
    pub individual_pac_id: Option<String>,
    pub individual_enrollment_id: Option<String>,
    pub provider_last_name: Option<String>,
    pub provider_first_name: Option<String>,
    pub provider_middle_name: Option<String>,
    pub provider_suffix: Option<String>,
    pub gender: Option<String>,
    pub bq_load_dttm: DateTime<Utc>,
}

/// One row of the `specialty_and_locations` output table
///
/// Retains `npi` as the foreign key into `doctors` plus every non-doctor
/// attribute. One row per filtered raw record, no deduplication.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecialtyLocationRow {
    pub npi: String,
    pub credential: Option<String>,
    pub medical_school_name: Option<String>,
    pub graduation_year: Option<i64>,
    pub primary_specialty: Option<String>,
    pub secondary_specialty_1: Option<String>,
    pub secondary_specialty_2: Option<String>,
    pub secondary_specialty_3: Option<String>,
    pub secondary_specialty_4: Option<String>,
    pub secondary_specialties_all: Option<String>,
    pub offers_telehealth: Option<String>,
    pub facility_name: Option<String>,
    pub organization_pac_id: Option<String>,
    pub number_of_group_members: Option<i64>,
    pub address_line_1: Option<String>,
    pub address_line_2: Option<String>,
    pub line2_suppression_flag: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub telephone_number: Option<String>,
    pub individual_accepts_medicare_assignment: Option<String>,
    pub group_accepts_medicare_assignment: Option<String>,
    pub address_id: Option<String>,
    pub record_number: Option<String>,
    pub bq_load_dttm: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_doctor() -> DoctorRow {
        DoctorRow {
            npi: "1234567890".to_string(),
            individual_pac_id: Some("42".to_string()),
            individual_enrollment_id: None,
            provider_last_name: Some("SMITH".to_string()),
            provider_first_name: Some("JANE".to_string()),
            provider_middle_name: None,
            provider_suffix: None,
            gender: Some("F".to_string()),
            bq_load_dttm: Utc::now(),
        }
    }

    #[test]
    fn test_doctor_row_serializes_nulls() {
        let row = sample_doctor();
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["npi"], "1234567890");
        assert_eq!(json["provider_last_name"], "SMITH");
        assert!(json["provider_middle_name"].is_null());
        assert!(json["individual_enrollment_id"].is_null());
    }

    #[test]
    fn test_doctor_row_timestamp_is_rfc3339() {
        let row = sample_doctor();
        let json = serde_json::to_value(&row).unwrap();
        let ts = json["bq_load_dttm"].as_str().unwrap();
        assert!(DateTime::parse_from_rfc3339(ts).is_ok());
    }

    #[test]
    fn test_raw_record_from_api_json() {
        let record: RawRecord = serde_json::from_str(
            r#"{"npi": "111", "pri_spec": "ORTHOPEDIC SURGERY", "grd_yr": ""}"#,
        )
        .unwrap();
        assert_eq!(record.get("npi").map(String::as_str), Some("111"));
        assert_eq!(record.get("grd_yr").map(String::as_str), Some(""));
    }
}
