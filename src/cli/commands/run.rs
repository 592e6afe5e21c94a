//! Run command implementation
//!
//! Executes the full extract → transform → load pipeline once.

use crate::config::load_config;
use crate::core::pipeline::PipelineCoordinator;
use clap::Args;

/// Arguments for the run command
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Dry run mode - execute extraction and transformation without
    /// writing to the warehouse
    #[arg(long)]
    pub dry_run: bool,

    /// Override state code(s) to extract (comma-separated)
    #[arg(long)]
    pub state: Option<String>,

    /// Override the page size used for pagination
    #[arg(long)]
    pub page_size: Option<usize>,
}

impl RunArgs {
    /// Execute the run command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Starting pipeline run");

        let mut config = load_config(config_path)?;

        // Apply CLI overrides
        if self.dry_run {
            tracing::info!("Enabling dry-run mode from CLI");
            config.application.dry_run = true;
        }

        if let Some(states) = &self.state {
            let states: Vec<String> = states
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
            tracing::info!(states = ?states, "Overriding states from CLI");
            config.source.states = states;
        }

        if let Some(page_size) = self.page_size {
            tracing::info!(page_size = page_size, "Overriding page size from CLI");
            config.source.page_size = page_size;
        }

        config
            .validate()
            .map_err(|e| anyhow::anyhow!("Configuration validation failed: {e}"))?;

        let coordinator = PipelineCoordinator::new(&config)?;
        let summary = coordinator.run().await?;

        println!("{}", summary.report());
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_args_defaults() {
        let args = RunArgs {
            dry_run: false,
            state: None,
            page_size: None,
        };
        assert!(!args.dry_run);
        assert!(args.state.is_none());
    }
}
