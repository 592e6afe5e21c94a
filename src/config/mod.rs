//! Configuration management for medex.
//!
//! TOML-based configuration loading, parsing, and validation. Supports
//! environment variable substitution (`${VAR_NAME}`) inside the file and
//! `MEDEX_*` environment overrides on top of it.
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [source]
//! dataset_id = "d86e116d-ef83-54c5-a14f-9a7bf5a76eba"
//! states = ["AL", "SD"]
//! specialty_filter = ["ORTHOPEDIC SURGERY", "DIAGNOSTIC RADIOLOGY"]
//! page_size = 1000
//!
//! [warehouse]
//! project = "analytics-project"
//! dataset = "doctors_and_clinicians"
//! access_token = "${MEDEX_BQ_TOKEN}"
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::load_config;
pub use schema::{
    ApplicationConfig, LoggingConfig, MedexConfig, SourceConfig, WarehouseConfig,
};
pub use secret::{secret_string, SecretString, SecretValue};
