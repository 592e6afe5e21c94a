//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for medex using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// medex - CMS Doctors and Clinicians ETL tool
#[derive(Parser, Debug)]
#[command(name = "medex")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "medex.toml", env = "MEDEX_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "MEDEX_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the extract-transform-load pipeline once
    Run(commands::run::RunArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Check warehouse connectivity
    Status(commands::status::StatusArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
