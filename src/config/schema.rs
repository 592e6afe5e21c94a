//! Configuration schema types
//!
//! This module defines the configuration structure for medex. Every value the
//! pipeline consumes (states to iterate, specialty allow-list, endpoints,
//! page size) lives here and is passed into the components explicitly, so
//! tests can run against injected fixtures.

use crate::config::SecretString;
use serde::{Deserialize, Serialize};

/// Main medex configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MedexConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// CMS datastore source configuration
    pub source: SourceConfig,

    /// BigQuery warehouse configuration
    pub warehouse: WarehouseConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl MedexConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.source.validate()?;
        self.warehouse.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Dry run mode (don't write to the warehouse)
    #[serde(default)]
    pub dry_run: bool,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            dry_run: false,
        }
    }
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

/// CMS datastore source configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Base URL of the datastore SQL endpoint
    #[serde(default = "default_source_base_url")]
    pub base_url: String,

    /// Identifier of the Doctors and Clinicians dataset
    pub dataset_id: String,

    /// State codes to iterate, in order
    pub states: Vec<String>,

    /// Specialty allow-list applied to `pri_spec`
    pub specialty_filter: Vec<String>,

    /// Records requested per page
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// HTTP timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl SourceConfig {
    fn validate(&self) -> Result<(), String> {
        if self.base_url.is_empty() {
            return Err("source.base_url cannot be empty".to_string());
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(format!(
                "source.base_url must start with http:// or https://, got '{}'",
                self.base_url
            ));
        }
        if self.dataset_id.is_empty() {
            return Err("source.dataset_id cannot be empty".to_string());
        }
        if self.states.is_empty() {
            return Err("source.states cannot be empty".to_string());
        }
        if self.specialty_filter.is_empty() {
            return Err("source.specialty_filter cannot be empty".to_string());
        }
        if self.page_size == 0 {
            return Err("source.page_size must be greater than 0".to_string());
        }
        Ok(())
    }
}

/// BigQuery warehouse configuration
///
/// The destination of each load is the two-part identifier
/// `{dataset}.{table}` under `project`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WarehouseConfig {
    /// Google Cloud project holding the destination dataset
    pub project: String,

    /// BigQuery dataset name
    pub dataset: String,

    /// Destination table for doctor rows
    #[serde(default = "default_doctors_table")]
    pub doctors_table: String,

    /// Destination table for specialty/location rows
    #[serde(default = "default_specialty_locations_table")]
    pub specialty_locations_table: String,

    /// BigQuery REST API base URL (overridable for testing)
    #[serde(default = "default_warehouse_base_url")]
    pub api_base_url: String,

    /// OAuth2 bearer token used for the insertAll calls
    ///
    /// Stored securely in memory and automatically zeroized on drop.
    /// Token acquisition/refresh is out of scope; supply a valid token via
    /// `${VAR}` substitution or the MEDEX_WAREHOUSE_ACCESS_TOKEN override.
    pub access_token: SecretString,

    /// HTTP timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl WarehouseConfig {
    fn validate(&self) -> Result<(), String> {
        use secrecy::ExposeSecret;

        if self.project.is_empty() {
            return Err("warehouse.project cannot be empty".to_string());
        }
        if self.dataset.is_empty() {
            return Err("warehouse.dataset cannot be empty".to_string());
        }
        if self.doctors_table.is_empty() {
            return Err("warehouse.doctors_table cannot be empty".to_string());
        }
        if self.specialty_locations_table.is_empty() {
            return Err("warehouse.specialty_locations_table cannot be empty".to_string());
        }
        if !self.api_base_url.starts_with("http://") && !self.api_base_url.starts_with("https://") {
            return Err(format!(
                "warehouse.api_base_url must start with http:// or https://, got '{}'",
                self.api_base_url
            ));
        }
        if self.access_token.expose_secret().is_empty() {
            return Err("warehouse.access_token cannot be empty".to_string());
        }
        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable JSON file logging in addition to console output
    #[serde(default)]
    pub file_enabled: bool,

    /// Directory for log files
    #[serde(default = "default_log_path")]
    pub file_path: String,

    /// Log file rotation: "daily" or "hourly"
    #[serde(default = "default_rotation")]
    pub file_rotation: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            file_enabled: false,
            file_path: default_log_path(),
            file_rotation: default_rotation(),
        }
    }
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        if self.file_enabled && self.file_path.is_empty() {
            return Err("logging.file_path cannot be empty when file logging is enabled".to_string());
        }
        let valid_rotations = ["daily", "hourly"];
        if !valid_rotations.contains(&self.file_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.file_rotation '{}'. Must be one of: {}",
                self.file_rotation,
                valid_rotations.join(", ")
            ));
        }
        Ok(())
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_source_base_url() -> String {
    "https://data.cms.gov/provider-data/api/1/datastore/sql".to_string()
}

fn default_page_size() -> usize {
    1000
}

fn default_timeout_seconds() -> u64 {
    60
}

fn default_doctors_table() -> String {
    "doctors".to_string()
}

fn default_specialty_locations_table() -> String {
    "specialty_and_locations".to_string()
}

fn default_warehouse_base_url() -> String {
    "https://bigquery.googleapis.com/bigquery/v2".to_string()
}

fn default_log_path() -> String {
    "logs".to_string()
}

fn default_rotation() -> String {
    "daily".to_string()
}
