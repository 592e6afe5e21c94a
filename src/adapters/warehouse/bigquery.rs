//! BigQuery warehouse client
//!
//! Loads rows through the BigQuery `tabledata.insertAll` streaming REST API.
//! There is no first-party BigQuery crate with insertAll support, so this is
//! a thin REST client over reqwest with bearer-token auth. insertAll is an
//! append: repeated runs accumulate rows in the destination tables.

use super::traits::WarehouseClient;
use crate::config::WarehouseConfig;
use crate::domain::errors::LoadError;
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

/// BigQuery REST client scoped to one project/dataset
pub struct BigQueryClient {
    config: WarehouseConfig,
    client: Client,
}

impl BigQueryClient {
    /// Create a new client from warehouse configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: &WarehouseConfig) -> std::result::Result<Self, LoadError> {
        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| LoadError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            config: config.clone(),
            client,
        })
    }

    /// Fully qualified destination identifier for log lines
    pub fn table_id(&self, table: &str) -> String {
        format!(
            "{}.{}.{}",
            self.config.project, self.config.dataset, table
        )
    }

    fn insert_all_url(&self, table: &str) -> String {
        format!(
            "{}/projects/{}/datasets/{}/tables/{}/insertAll",
            self.config.api_base_url, self.config.project, self.config.dataset, table
        )
    }

    fn dataset_url(&self) -> String {
        format!(
            "{}/projects/{}/datasets/{}",
            self.config.api_base_url, self.config.project, self.config.dataset
        )
    }

    fn bearer_token(&self) -> String {
        self.config.access_token.expose_secret().as_ref().to_string()
    }
}

#[async_trait]
impl WarehouseClient for BigQueryClient {
    async fn load(
        &self,
        rows: &[Value],
        table: &str,
    ) -> std::result::Result<usize, LoadError> {
        if rows.is_empty() {
            tracing::warn!(table = table, "No rows to load, skipping insertAll call");
            return Ok(0);
        }

        let request = InsertAllRequest {
            kind: "bigquery#tableDataInsertAllRequest",
            rows: rows.iter().map(|json| InsertRow { json }).collect(),
        };

        let response = self
            .client
            .post(self.insert_all_url(table))
            .bearer_auth(self.bearer_token())
            .json(&request)
            .send()
            .await
            .map_err(|e| LoadError::ConnectionFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(LoadError::HttpStatus {
                status: status.as_u16(),
                table: table.to_string(),
                message,
            });
        }

        let body: InsertAllResponse = response
            .json()
            .await
            .map_err(|e| LoadError::DeserializationFailed(e.to_string()))?;

        if let Some(errors) = body.insert_errors {
            if !errors.is_empty() {
                let detail = errors
                    .first()
                    .and_then(|e| e.errors.first())
                    .map(|e| e.message.clone())
                    .unwrap_or_else(|| "unknown insert error".to_string());
                return Err(LoadError::InsertFailed {
                    table: table.to_string(),
                    failed: errors.len(),
                    total: rows.len(),
                    detail,
                });
            }
        }

        Ok(rows.len())
    }

    async fn test_connection(&self) -> std::result::Result<(), LoadError> {
        let response = self
            .client
            .get(self.dataset_url())
            .bearer_auth(self.bearer_token())
            .send()
            .await
            .map_err(|e| LoadError::ConnectionFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(LoadError::HttpStatus {
                status: status.as_u16(),
                table: self.config.dataset.clone(),
                message,
            });
        }

        Ok(())
    }
}

/// insertAll request body
#[derive(Debug, Serialize)]
struct InsertAllRequest<'a> {
    kind: &'static str,
    rows: Vec<InsertRow<'a>>,
}

#[derive(Debug, Serialize)]
struct InsertRow<'a> {
    json: &'a Value,
}

/// insertAll response body
#[derive(Debug, Deserialize)]
struct InsertAllResponse {
    #[serde(rename = "insertErrors")]
    insert_errors: Option<Vec<InsertError>>,
}

#[derive(Debug, Deserialize)]
struct InsertError {
    #[serde(default)]
    #[allow(dead_code)]
    index: usize,
    #[serde(default)]
    errors: Vec<InsertErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct InsertErrorDetail {
    #[serde(default)]
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret::secret_string;

    fn test_config() -> WarehouseConfig {
        WarehouseConfig {
            project: "analytics-project".to_string(),
            dataset: "doctors_and_clinicians".to_string(),
            doctors_table: "doctors".to_string(),
            specialty_locations_table: "specialty_and_locations".to_string(),
            api_base_url: "https://bigquery.googleapis.com/bigquery/v2".to_string(),
            access_token: secret_string("token"),
            timeout_seconds: 60,
        }
    }

    #[test]
    fn test_table_id() {
        let client = BigQueryClient::new(&test_config()).unwrap();
        assert_eq!(
            client.table_id("doctors"),
            "analytics-project.doctors_and_clinicians.doctors"
        );
    }

    #[test]
    fn test_insert_all_url() {
        let client = BigQueryClient::new(&test_config()).unwrap();
        assert_eq!(
            client.insert_all_url("doctors"),
            "https://bigquery.googleapis.com/bigquery/v2/projects/analytics-project\
             /datasets/doctors_and_clinicians/tables/doctors/insertAll"
        );
    }

    #[test]
    fn test_insert_all_response_without_errors() {
        let body: InsertAllResponse =
            serde_json::from_str(r#"{"kind": "bigquery#tableDataInsertAllResponse"}"#).unwrap();
        assert!(body.insert_errors.is_none());
    }

    #[test]
    fn test_insert_all_response_with_errors() {
        let body: InsertAllResponse = serde_json::from_str(
            r#"{"insertErrors": [{"index": 1, "errors": [{"reason": "invalid", "message": "no such field"}]}]}"#,
        )
        .unwrap();
        let errors = body.insert_errors.unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].errors[0].message, "no such field");
    }
}
