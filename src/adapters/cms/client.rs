//! CMS datastore SQL client
//!
//! Issues paginated queries against the provider-data datastore SQL endpoint.
//! The endpoint takes a bracketed SQL-ish query as a GET parameter and
//! returns a JSON array of flat objects whose values are all strings.

use super::PageFetcher;
use crate::config::SourceConfig;
use crate::domain::errors::FetchError;
use crate::domain::record::RawRecord;
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use std::time::Duration;

/// HTTP client for the CMS datastore SQL API
pub struct CmsClient {
    base_url: String,
    dataset_id: String,
    client: Client,
}

impl CmsClient {
    /// Create a new client from source configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: &SourceConfig) -> std::result::Result<Self, FetchError> {
        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| FetchError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            base_url: config.base_url.clone(),
            dataset_id: config.dataset_id.clone(),
            client,
        })
    }

    /// Build the bracketed datastore SQL query for one page
    fn page_query(&self, state: &str, offset: usize, limit: usize) -> String {
        format!(
            "[SELECT * FROM {}][WHERE state = \"{}\"][LIMIT {} OFFSET {}]",
            self.dataset_id, state, limit, offset
        )
    }
}

#[async_trait]
impl PageFetcher for CmsClient {
    async fn fetch_page(
        &self,
        state: &str,
        offset: usize,
        limit: usize,
    ) -> std::result::Result<Vec<RawRecord>, FetchError> {
        let query = self.page_query(state, offset, limit);

        tracing::debug!(
            state = state,
            offset = offset,
            limit = limit,
            "Fetching page from CMS datastore"
        );

        let response = self
            .client
            .get(&self.base_url)
            .query(&[("query", query.as_str()), ("show_db_columns", "false")])
            .send()
            .await
            .map_err(|e| FetchError::ConnectionFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(FetchError::HttpStatus {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<Vec<RawRecord>>()
            .await
            .map_err(|e| FetchError::InvalidResponse(e.to_string()))
    }
}
