// medex - CMS Doctors and Clinicians ETL Tool
// Licensed under the MIT License

//! # medex - CMS Doctors and Clinicians ETL
//!
//! medex is a batch ETL tool that extracts provider records from the public
//! CMS Doctors and Clinicians datastore API, filters and reshapes them, and
//! loads the result into two related BigQuery tables. It is a one-shot
//! pipeline: it runs to completion and exits.
//!
//! ## Overview
//!
//! - **Extracting** provider records with chunked pagination per state,
//!   filtered by a specialty allow-list
//! - **Transforming** raw records: canonical field names, null
//!   normalization, numeric coercion, a run-level load timestamp, and a
//!   split into `doctors` (deduplicated on `npi`) and
//!   `specialty_and_locations` (one row per record, joined on `npi`)
//! - **Loading** both tables through the BigQuery insertAll API
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (extract, transform, pipeline)
//! - [`adapters`] - External integrations (CMS datastore, BigQuery)
//! - [`domain`] - Core domain types and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use medex::config::load_config;
//! use medex::core::pipeline::PipelineCoordinator;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("medex.toml")?;
//!     let coordinator = PipelineCoordinator::new(&config)?;
//!     let summary = coordinator.run().await?;
//!     println!("{}", summary.report());
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! A failed page fetch ends pagination for that state only; records already
//! gathered are kept and the run continues. An unparseable numeric field
//! becomes null. A warehouse load failure is the only error that fails the
//! run.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
