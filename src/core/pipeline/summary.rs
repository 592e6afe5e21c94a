//! Run summary and reporting

use std::time::Duration;

/// Summary of one pipeline run
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Filtered records produced by extraction
    pub extracted_records: usize,

    /// Pages fetched across all states
    pub pages_fetched: usize,

    /// States whose pagination was cut short by a fetch failure
    pub failed_states: Vec<String>,

    /// Doctor rows after dedup
    pub doctor_rows: usize,

    /// Specialty/location rows
    pub specialty_location_rows: usize,

    /// Rows the warehouse reported loaded into the doctors table
    pub doctors_loaded: usize,

    /// Rows the warehouse reported loaded into the specialty/locations table
    pub specialty_locations_loaded: usize,

    /// Whether this was a dry run (no warehouse writes)
    pub dry_run: bool,

    /// Duration of the run
    pub duration: Duration,
}

impl RunSummary {
    /// Render a human-readable report for the CLI
    pub fn report(&self) -> String {
        let mut lines = vec![
            "Pipeline Run Summary".to_string(),
            format!("  Extracted records:        {}", self.extracted_records),
            format!("  Pages fetched:            {}", self.pages_fetched),
            format!("  Doctor rows:              {}", self.doctor_rows),
            format!("  Specialty/location rows:  {}", self.specialty_location_rows),
            format!("  Doctors loaded:           {}", self.doctors_loaded),
            format!(
                "  Specialty/locations loaded: {}",
                self.specialty_locations_loaded
            ),
            format!("  Duration:                 {:.2}s", self.duration.as_secs_f64()),
        ];
        if self.dry_run {
            lines.push("  Mode:                     DRY RUN (no warehouse writes)".to_string());
        }
        if !self.failed_states.is_empty() {
            lines.push(format!(
                "  States with fetch failures: {}",
                self.failed_states.join(", ")
            ));
        }
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_includes_counts() {
        let summary = RunSummary {
            extracted_records: 10,
            doctor_rows: 3,
            specialty_location_rows: 10,
            doctors_loaded: 3,
            specialty_locations_loaded: 10,
            ..Default::default()
        };
        let report = summary.report();
        assert!(report.contains("Extracted records:        10"));
        assert!(report.contains("Doctor rows:              3"));
        assert!(!report.contains("DRY RUN"));
        assert!(!report.contains("fetch failures"));
    }

    #[test]
    fn test_report_flags_dry_run_and_failures() {
        let summary = RunSummary {
            dry_run: true,
            failed_states: vec!["AL".to_string()],
            ..Default::default()
        };
        let report = summary.report();
        assert!(report.contains("DRY RUN"));
        assert!(report.contains("States with fetch failures: AL"));
    }
}
