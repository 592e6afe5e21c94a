//! Status command implementation
//!
//! Checks that the configured warehouse dataset is reachable with the
//! supplied credentials before a run is attempted.

use crate::adapters::warehouse::{BigQueryClient, WarehouseClient};
use crate::config::load_config;
use clap::Args;

/// Arguments for the status command
#[derive(Args, Debug)]
pub struct StatusArgs {}

impl StatusArgs {
    /// Execute the status command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let config = load_config(config_path)?;

        println!(
            "Checking warehouse dataset {}.{} ...",
            config.warehouse.project, config.warehouse.dataset
        );

        let client = BigQueryClient::new(&config.warehouse)?;
        match client.test_connection().await {
            Ok(()) => {
                println!("Warehouse dataset is reachable");
                Ok(0)
            }
            Err(e) => {
                tracing::error!(error = %e, "Warehouse connectivity check failed");
                println!("Warehouse connectivity check failed: {e}");
                Ok(1)
            }
        }
    }
}
