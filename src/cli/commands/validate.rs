//! Validate config command implementation

use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("Validating configuration file: {config_path}");

        let config = match load_config(config_path) {
            Ok(c) => {
                println!("Configuration is valid");
                c
            }
            Err(e) => {
                println!("Configuration is invalid");
                println!("  Error: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        println!();
        println!("Configuration Summary:");
        println!("  Log level:        {}", config.application.log_level);
        println!("  Source endpoint:  {}", config.source.base_url);
        println!("  Dataset ID:       {}", config.source.dataset_id);
        println!("  States:           {}", config.source.states.join(", "));
        println!(
            "  Specialty filter: {}",
            config.source.specialty_filter.join(", ")
        );
        println!("  Page size:        {}", config.source.page_size);
        println!(
            "  Destination:      {}.{} ({} + {})",
            config.warehouse.project,
            config.warehouse.dataset,
            config.warehouse.doctors_table,
            config.warehouse.specialty_locations_table
        );

        Ok(0)
    }
}
