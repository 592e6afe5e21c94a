//! Warehouse abstraction trait
//!
//! The pipeline only needs one capability from the warehouse: accept a
//! rectangular dataset and a destination table name, and report how many
//! rows were written.

use crate::domain::errors::LoadError;
use async_trait::async_trait;
use serde_json::Value;

/// Warehouse client trait for loading output tables
#[async_trait]
pub trait WarehouseClient: Send + Sync {
    /// Load rows into the named table, returning the affected row count
    ///
    /// Each row is a flat JSON object matching the table's columns. Append
    /// semantics: repeated runs add rows, nothing is replaced.
    ///
    /// # Errors
    ///
    /// Returns a [`LoadError`] on any persistence failure, including
    /// per-row rejections reported by the warehouse.
    async fn load(
        &self,
        rows: &[Value],
        table: &str,
    ) -> std::result::Result<usize, LoadError>;

    /// Verify that the destination dataset is reachable
    ///
    /// # Errors
    ///
    /// Returns an error if the dataset cannot be reached with the
    /// configured credentials.
    async fn test_connection(&self) -> std::result::Result<(), LoadError>;
}
