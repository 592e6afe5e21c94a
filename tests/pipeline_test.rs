//! End-to-end pipeline tests over injected fixture clients
//!
//! These tests drive the full coordinator (extract → transform → load)
//! against a scripted page fetcher and an in-memory warehouse, covering the
//! split/dedup guarantees and the load failure policy.

use async_trait::async_trait;
use medex::adapters::cms::PageFetcher;
use medex::adapters::warehouse::WarehouseClient;
use medex::config::{
    secret_string, ApplicationConfig, LoggingConfig, MedexConfig, SourceConfig, WarehouseConfig,
};
use medex::core::pipeline::PipelineCoordinator;
use medex::domain::errors::{FetchError, LoadError};
use medex::domain::record::RawRecord;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

fn test_config() -> MedexConfig {
    MedexConfig {
        application: ApplicationConfig::default(),
        source: SourceConfig {
            base_url: "https://data.cms.gov/provider-data/api/1/datastore/sql".to_string(),
            dataset_id: "d86e116d-ef83-54c5-a14f-9a7bf5a76eba".to_string(),
            states: vec!["AL".to_string()],
            specialty_filter: vec![
                "ORTHOPEDIC SURGERY".to_string(),
                "DIAGNOSTIC RADIOLOGY".to_string(),
            ],
            page_size: 1000,
            timeout_seconds: 60,
        },
        warehouse: WarehouseConfig {
            project: "analytics-project".to_string(),
            dataset: "doctors_and_clinicians".to_string(),
            doctors_table: "doctors".to_string(),
            specialty_locations_table: "specialty_and_locations".to_string(),
            api_base_url: "https://bigquery.googleapis.com/bigquery/v2".to_string(),
            access_token: secret_string("token"),
            timeout_seconds: 60,
        },
        logging: LoggingConfig::default(),
    }
}

fn record(fields: &[(&str, &str)]) -> RawRecord {
    fields
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Serves one fixed page per state, then empty pages
struct FixtureFetcher {
    pages: HashMap<String, Vec<RawRecord>>,
}

#[async_trait]
impl PageFetcher for FixtureFetcher {
    async fn fetch_page(
        &self,
        state: &str,
        offset: usize,
        _limit: usize,
    ) -> Result<Vec<RawRecord>, FetchError> {
        if offset == 0 {
            Ok(self.pages.get(state).cloned().unwrap_or_default())
        } else {
            Ok(Vec::new())
        }
    }
}

/// Records every load call; optionally fails on a named table
#[derive(Default)]
struct RecordingWarehouse {
    loads: Mutex<Vec<(String, Vec<Value>)>>,
    fail_table: Option<String>,
}

#[async_trait]
impl WarehouseClient for RecordingWarehouse {
    async fn load(&self, rows: &[Value], table: &str) -> Result<usize, LoadError> {
        if self.fail_table.as_deref() == Some(table) {
            return Err(LoadError::HttpStatus {
                status: 503,
                table: table.to_string(),
                message: "backend unavailable".to_string(),
            });
        }
        self.loads
            .lock()
            .unwrap()
            .push((table.to_string(), rows.to_vec()));
        Ok(rows.len())
    }

    async fn test_connection(&self) -> Result<(), LoadError> {
        Ok(())
    }
}

fn spec_scenario_fetcher() -> Arc<FixtureFetcher> {
    // Two records for npi 111 with different allowed specialties, one
    // disallowed CARDIOLOGY record for npi 222.
    let mut pages = HashMap::new();
    pages.insert(
        "AL".to_string(),
        vec![
            record(&[
                ("npi", "111"),
                ("provider_last_name", "SMITH"),
                ("pri_spec", "ORTHOPEDIC SURGERY"),
                ("facility_name", "MAIN CLINIC"),
                ("grd_yr", "2005"),
            ]),
            record(&[
                ("npi", "111"),
                ("provider_last_name", "SMITH"),
                ("pri_spec", "DIAGNOSTIC RADIOLOGY"),
                ("facility_name", "IMAGING CENTER"),
                ("grd_yr", "N/A"),
            ]),
            record(&[
                ("npi", "222"),
                ("provider_last_name", "JONES"),
                ("pri_spec", "CARDIOLOGY"),
            ]),
        ],
    );
    Arc::new(FixtureFetcher { pages })
}

#[tokio::test]
async fn test_end_to_end_split_and_dedup() {
    let warehouse = Arc::new(RecordingWarehouse::default());
    let coordinator = PipelineCoordinator::with_clients(
        &test_config(),
        spec_scenario_fetcher(),
        warehouse.clone(),
    );

    let summary = coordinator.run().await.unwrap();

    assert_eq!(summary.extracted_records, 2);
    assert_eq!(summary.doctor_rows, 1);
    assert_eq!(summary.specialty_location_rows, 2);
    assert_eq!(summary.doctors_loaded, 1);
    assert_eq!(summary.specialty_locations_loaded, 2);

    let loads = warehouse.loads.lock().unwrap();
    assert_eq!(loads.len(), 2);

    let (doctors_table, doctors) = &loads[0];
    assert_eq!(doctors_table, "doctors");
    assert_eq!(doctors.len(), 1);
    assert_eq!(doctors[0]["npi"], "111");
    assert_eq!(doctors[0]["provider_last_name"], "SMITH");

    let (specialty_table, specialty) = &loads[1];
    assert_eq!(specialty_table, "specialty_and_locations");
    assert_eq!(specialty.len(), 2);
    // Every specialty row joins back to a doctor row, and nothing from the
    // disallowed CARDIOLOGY record survives
    for row in specialty {
        assert_eq!(row["npi"], "111");
    }
    assert_eq!(specialty[0]["facility_name"], "MAIN CLINIC");
    assert_eq!(specialty[0]["graduation_year"], 2005);
    assert!(specialty[1]["graduation_year"].is_null());
}

#[tokio::test]
async fn test_all_rows_share_one_load_timestamp() {
    let warehouse = Arc::new(RecordingWarehouse::default());
    let coordinator = PipelineCoordinator::with_clients(
        &test_config(),
        spec_scenario_fetcher(),
        warehouse.clone(),
    );

    coordinator.run().await.unwrap();

    let loads = warehouse.loads.lock().unwrap();
    let mut timestamps: Vec<String> = Vec::new();
    for (_, rows) in loads.iter() {
        for row in rows {
            timestamps.push(row["bq_load_dttm"].as_str().unwrap().to_string());
        }
    }
    assert_eq!(timestamps.len(), 3);
    assert!(timestamps.windows(2).all(|w| w[0] == w[1]));
}

#[tokio::test]
async fn test_doctors_load_failure_aborts_before_second_table() {
    let warehouse = Arc::new(RecordingWarehouse {
        loads: Mutex::new(Vec::new()),
        fail_table: Some("doctors".to_string()),
    });
    let coordinator = PipelineCoordinator::with_clients(
        &test_config(),
        spec_scenario_fetcher(),
        warehouse.clone(),
    );

    let result = coordinator.run().await;

    assert!(result.is_err());
    // The specialty/locations load is never attempted after the doctors
    // load fails
    assert!(warehouse.loads.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_dry_run_skips_warehouse_writes() {
    let mut config = test_config();
    config.application.dry_run = true;

    let warehouse = Arc::new(RecordingWarehouse::default());
    let coordinator =
        PipelineCoordinator::with_clients(&config, spec_scenario_fetcher(), warehouse.clone());

    let summary = coordinator.run().await.unwrap();

    assert!(summary.dry_run);
    assert_eq!(summary.doctors_loaded, 1);
    assert_eq!(summary.specialty_locations_loaded, 2);
    assert!(warehouse.loads.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_empty_extraction_still_succeeds() {
    let fetcher = Arc::new(FixtureFetcher {
        pages: HashMap::new(),
    });
    let warehouse = Arc::new(RecordingWarehouse::default());
    let coordinator =
        PipelineCoordinator::with_clients(&test_config(), fetcher, warehouse.clone());

    let summary = coordinator.run().await.unwrap();

    assert_eq!(summary.extracted_records, 0);
    assert_eq!(summary.doctors_loaded, 0);
    assert_eq!(summary.specialty_locations_loaded, 0);
}
