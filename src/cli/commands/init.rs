//! Init command implementation
//!
//! Writes a starter configuration file for a new deployment.

use clap::Args;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Output path for the new configuration file
    #[arg(short, long, default_value = "medex.toml")]
    pub output: String,

    /// Overwrite the file if it already exists
    #[arg(long)]
    pub force: bool,
}

const TEMPLATE: &str = r#"# medex configuration
# Values of the form ${VAR} are substituted from the environment at load time.

[application]
log_level = "info"
dry_run = false

[source]
# CMS provider-data datastore SQL endpoint
base_url = "https://data.cms.gov/provider-data/api/1/datastore/sql"
# Doctors and Clinicians dataset identifier
dataset_id = "d86e116d-ef83-54c5-a14f-9a7bf5a76eba"
states = ["AL", "SD"]
specialty_filter = ["ORTHOPEDIC SURGERY", "DIAGNOSTIC RADIOLOGY"]
page_size = 1000

[warehouse]
project = "your-gcp-project"
dataset = "doctors_and_clinicians"
doctors_table = "doctors"
specialty_locations_table = "specialty_and_locations"
access_token = "${MEDEX_BQ_TOKEN}"

[logging]
file_enabled = false
file_path = "logs"
file_rotation = "daily"
"#;

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        let path = Path::new(&self.output);

        if path.exists() && !self.force {
            println!(
                "Refusing to overwrite existing file {} (use --force to replace it)",
                path.display()
            );
            return Ok(1);
        }

        std::fs::write(path, TEMPLATE)?;
        println!("Wrote starter configuration to {}", path.display());
        println!("Edit the warehouse section, then run: medex validate-config");
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_parses_with_token_substituted() {
        let contents = TEMPLATE.replace("${MEDEX_BQ_TOKEN}", "token");
        let config: crate::config::MedexConfig = toml::from_str(&contents).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.source.states, vec!["AL", "SD"]);
    }
}
