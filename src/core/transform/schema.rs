//! Schema contract for the Doctors and Clinicians source
//!
//! The rename map is the versioned contract between the source schema and
//! the canonical column names used in both output tables. It is exhaustive
//! for the source schema this pipeline knows; input fields absent from the
//! map are dropped, but each unknown name is reported once per run instead
//! of disappearing silently.

use std::collections::HashSet;

/// Source field name → canonical output column name
///
/// Covers the full Doctors and Clinicians facility-affiliation schema as of
/// the dataset version this pipeline was written against.
pub const RENAME_MAP: &[(&str, &str)] = &[
    ("npi", "npi"),
    ("ind_pac_id", "individual_pac_id"),
    ("ind_enrl_id", "individual_enrollment_id"),
    ("provider_last_name", "provider_last_name"),
    ("provider_first_name", "provider_first_name"),
    ("provider_middle_name", "provider_middle_name"),
    ("suff", "provider_suffix"),
    ("gndr", "gender"),
    ("cred", "credential"),
    ("med_sch", "medical_school_name"),
    ("grd_yr", "graduation_year"),
    ("pri_spec", "primary_specialty"),
    ("sec_spec_1", "secondary_specialty_1"),
    ("sec_spec_2", "secondary_specialty_2"),
    ("sec_spec_3", "secondary_specialty_3"),
    ("sec_spec_4", "secondary_specialty_4"),
    ("sec_spec_all", "secondary_specialties_all"),
    ("telehlth", "offers_telehealth"),
    ("facility_name", "facility_name"),
    ("org_pac_id", "organization_pac_id"),
    ("num_org_mem", "number_of_group_members"),
    ("adr_ln_1", "address_line_1"),
    ("adr_ln_2", "address_line_2"),
    ("ln_2_sprs", "line2_suppression_flag"),
    ("citytown", "city"),
    ("state", "state"),
    ("zip_code", "zip_code"),
    ("telephone_number", "telephone_number"),
    ("ind_assgn", "individual_accepts_medicare_assignment"),
    ("grp_assgn", "group_accepts_medicare_assignment"),
    ("adrs_id", "address_id"),
    ("record_number", "record_number"),
];

/// Look up the canonical name for a source field
pub fn canonical_name(source_field: &str) -> Option<&'static str> {
    RENAME_MAP
        .iter()
        .find(|(source, _)| *source == source_field)
        .map(|(_, canonical)| *canonical)
}

/// Report source fields that are not part of the schema contract
///
/// Emits one WARN per unknown field name per run. Unknown fields are still
/// dropped; the warning surfaces schema drift so the contract can be
/// versioned forward deliberately.
pub fn warn_unknown_fields(unknown: &HashSet<String>) {
    for field in unknown {
        tracing::warn!(
            field = %field,
            "Source field not in schema contract, dropping"
        );
    }
}
