//! Warehouse adapters
//!
//! The pipeline talks to the warehouse through the [`WarehouseClient`]
//! trait; [`BigQueryClient`] is the production implementation.

pub mod bigquery;
pub mod traits;

pub use bigquery::BigQueryClient;
pub use traits::WarehouseClient;
