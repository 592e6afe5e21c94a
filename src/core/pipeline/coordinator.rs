//! Pipeline coordinator - orchestrates extract, transform, and load
//!
//! The run is strictly sequential: one logical thread of control, states in
//! order, pages in offset order, then the two table loads one after the
//! other. A fetch failure degrades (per-state isolation inside the
//! extractor); a load failure aborts the run, and the second table is not
//! attempted after the first fails so a partial run never leaves
//! specialty/location rows without the matching doctors from the same run.

use crate::adapters::cms::{CmsClient, PageFetcher};
use crate::adapters::warehouse::{BigQueryClient, WarehouseClient};
use crate::config::MedexConfig;
use crate::core::extract::{ExtractOptions, Extractor};
use crate::core::pipeline::summary::RunSummary;
use crate::core::transform::{transform, TransformOutput};
use crate::domain::{MedexError, Result};
use chrono::Utc;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;

/// Pipeline coordinator
pub struct PipelineCoordinator {
    fetcher: Arc<dyn PageFetcher>,
    warehouse: Arc<dyn WarehouseClient>,
    options: ExtractOptions,
    doctors_table: String,
    specialty_locations_table: String,
    dry_run: bool,
}

impl PipelineCoordinator {
    /// Create a coordinator with production clients built from configuration
    pub fn new(config: &MedexConfig) -> Result<Self> {
        let fetcher = Arc::new(CmsClient::new(&config.source)?);
        let warehouse = Arc::new(BigQueryClient::new(&config.warehouse)?);
        Ok(Self::with_clients(config, fetcher, warehouse))
    }

    /// Create a coordinator over injected clients
    ///
    /// Used by tests to run the full pipeline against fixtures.
    pub fn with_clients(
        config: &MedexConfig,
        fetcher: Arc<dyn PageFetcher>,
        warehouse: Arc<dyn WarehouseClient>,
    ) -> Self {
        Self {
            fetcher,
            warehouse,
            options: ExtractOptions::from(&config.source),
            doctors_table: config.warehouse.doctors_table.clone(),
            specialty_locations_table: config.warehouse.specialty_locations_table.clone(),
            dry_run: config.application.dry_run,
        }
    }

    /// Execute one full pipeline run
    ///
    /// Extract → transform → load doctors → load specialty/locations.
    ///
    /// # Errors
    ///
    /// Returns an error on any load failure; the run is then considered
    /// failed even though extraction degraded gracefully.
    pub async fn run(&self) -> Result<RunSummary> {
        let start = Instant::now();
        let mut summary = RunSummary {
            dry_run: self.dry_run,
            ..Default::default()
        };

        let extraction = Extractor::new(self.fetcher.clone(), self.options.clone())
            .run()
            .await;
        summary.extracted_records = extraction.records.len();
        summary.pages_fetched = extraction.pages_fetched;
        summary.failed_states = extraction.failed_states.clone();

        // One load timestamp for every row in the run
        let loaded_at = Utc::now();
        let TransformOutput {
            doctors,
            specialty_locations,
        } = transform(extraction.records, loaded_at);
        summary.doctor_rows = doctors.len();
        summary.specialty_location_rows = specialty_locations.len();

        summary.doctors_loaded = self
            .load_table(&doctors, &self.doctors_table)
            .await?;
        summary.specialty_locations_loaded = self
            .load_table(&specialty_locations, &self.specialty_locations_table)
            .await?;

        summary.duration = start.elapsed();
        tracing::info!(
            duration_ms = summary.duration.as_millis() as u64,
            doctors = summary.doctors_loaded,
            specialty_locations = summary.specialty_locations_loaded,
            "Pipeline completed successfully"
        );

        Ok(summary)
    }

    async fn load_table<T: Serialize>(&self, rows: &[T], table: &str) -> Result<usize> {
        let json_rows = rows
            .iter()
            .map(serde_json::to_value)
            .collect::<std::result::Result<Vec<Value>, _>>()
            .map_err(|e| MedexError::Serialization(e.to_string()))?;

        if self.dry_run {
            tracing::info!(
                table = table,
                rows = json_rows.len(),
                "Dry run: skipping warehouse load"
            );
            return Ok(json_rows.len());
        }

        tracing::info!(table = table, rows = json_rows.len(), "Loading table");
        let loaded = self.warehouse.load(&json_rows, table).await?;
        tracing::info!(table = table, rows = loaded, "Load completed");
        Ok(loaded)
    }
}
