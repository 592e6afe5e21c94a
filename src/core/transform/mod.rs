//! Transformation of raw records into the two output tables
//!
//! Pure functions of the input, no I/O. The steps, in order: rename fields
//! to canonical names, normalize empty strings to null, coerce the two
//! numeric columns, stamp the run-level load timestamp, and split into the
//! deduplicated `doctors` set and the per-record `specialty_and_locations`
//! set sharing `npi` as the join key.

pub mod schema;

use crate::domain::record::{DoctorRow, RawRecord, SpecialtyLocationRow};
use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};

/// The two output tables derived from one filtered extraction
#[derive(Debug, Default)]
pub struct TransformOutput {
    /// One row per distinct npi, first occurrence wins
    pub doctors: Vec<DoctorRow>,

    /// One row per filtered raw record
    pub specialty_locations: Vec<SpecialtyLocationRow>,
}

/// Transform the filtered raw collection into the two output tables
///
/// `loaded_at` is captured once by the caller; every row in both tables in
/// one run carries the identical timestamp. Malformed input never fails the
/// transform: unparseable numeric values become null, and records missing
/// the `npi` join key are dropped with a warning since they cannot be
/// related across the two tables.
pub fn transform(records: Vec<RawRecord>, loaded_at: DateTime<Utc>) -> TransformOutput {
    let mut output = TransformOutput::default();
    let mut seen_npis: HashSet<String> = HashSet::new();
    let mut unknown_fields: HashSet<String> = HashSet::new();
    let mut dropped_keyless = 0usize;

    for record in records {
        let canonical = canonicalize(record, &mut unknown_fields);

        let Some(npi) = non_empty(canonical.get("npi")) else {
            dropped_keyless += 1;
            continue;
        };

        if seen_npis.insert(npi.clone()) {
            output.doctors.push(DoctorRow {
                npi: npi.clone(),
                individual_pac_id: non_empty(canonical.get("individual_pac_id")),
                individual_enrollment_id: non_empty(canonical.get("individual_enrollment_id")),
                provider_last_name: non_empty(canonical.get("provider_last_name")),
                provider_first_name: non_empty(canonical.get("provider_first_name")),
                provider_middle_name: non_empty(canonical.get("provider_middle_name")),
                provider_suffix: non_empty(canonical.get("provider_suffix")),
                gender: non_empty(canonical.get("gender")),
                bq_load_dttm: loaded_at,
            });
        }

        output.specialty_locations.push(SpecialtyLocationRow {
            npi,
            credential: non_empty(canonical.get("credential")),
            medical_school_name: non_empty(canonical.get("medical_school_name")),
            graduation_year: coerce_i64(canonical.get("graduation_year")),
            primary_specialty: non_empty(canonical.get("primary_specialty")),
            secondary_specialty_1: non_empty(canonical.get("secondary_specialty_1")),
            secondary_specialty_2: non_empty(canonical.get("secondary_specialty_2")),
            secondary_specialty_3: non_empty(canonical.get("secondary_specialty_3")),
            secondary_specialty_4: non_empty(canonical.get("secondary_specialty_4")),
            secondary_specialties_all: non_empty(canonical.get("secondary_specialties_all")),
            offers_telehealth: non_empty(canonical.get("offers_telehealth")),
            facility_name: non_empty(canonical.get("facility_name")),
            organization_pac_id: non_empty(canonical.get("organization_pac_id")),
            number_of_group_members: coerce_i64(canonical.get("number_of_group_members")),
            address_line_1: non_empty(canonical.get("address_line_1")),
            address_line_2: non_empty(canonical.get("address_line_2")),
            line2_suppression_flag: non_empty(canonical.get("line2_suppression_flag")),
            city: non_empty(canonical.get("city")),
            state: non_empty(canonical.get("state")),
            zip_code: non_empty(canonical.get("zip_code")),
            telephone_number: non_empty(canonical.get("telephone_number")),
            individual_accepts_medicare_assignment: non_empty(
                canonical.get("individual_accepts_medicare_assignment"),
            ),
            group_accepts_medicare_assignment: non_empty(
                canonical.get("group_accepts_medicare_assignment"),
            ),
            address_id: non_empty(canonical.get("address_id")),
            record_number: non_empty(canonical.get("record_number")),
            bq_load_dttm: loaded_at,
        });
    }

    schema::warn_unknown_fields(&unknown_fields);
    if dropped_keyless > 0 {
        tracing::warn!(
            count = dropped_keyless,
            "Dropped records without an npi join key"
        );
    }

    tracing::info!(
        doctors = output.doctors.len(),
        specialty_locations = output.specialty_locations.len(),
        "Transformation completed"
    );

    output
}

/// Rename a record's fields to canonical names, collecting unknown fields
fn canonicalize(
    record: RawRecord,
    unknown_fields: &mut HashSet<String>,
) -> HashMap<&'static str, String> {
    let mut canonical = HashMap::new();
    for (field, value) in record {
        match schema::canonical_name(&field) {
            Some(name) => {
                canonical.insert(name, value);
            }
            None => {
                unknown_fields.insert(field);
            }
        }
    }
    canonical
}

/// Null normalization: empty strings become None
fn non_empty(value: Option<&String>) -> Option<String> {
    value.filter(|v| !v.is_empty()).cloned()
}

/// Numeric coercion: unparseable values degrade to null, never an error
fn coerce_i64(value: Option<&String>) -> Option<i64> {
    value.and_then(|v| v.trim().parse::<i64>().ok())
}
