//! Extraction loop
//!
//! Drives the [`PageFetcher`] across all configured states, filters each
//! page by the specialty allow-list, and accumulates the survivors. A fetch
//! failure ends pagination for that state only; records already gathered
//! from other states (and from earlier pages of the failed state) are kept.

use crate::adapters::cms::PageFetcher;
use crate::config::SourceConfig;
use crate::domain::record::RawRecord;
use std::collections::HashSet;
use std::sync::Arc;

/// Source field carrying the primary specialty, checked against the allow-list
const SPECIALTY_FIELD: &str = "pri_spec";

/// Extraction parameters, injected at construction time
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// State codes to iterate, in order
    pub states: Vec<String>,

    /// Specialty values that survive the filter
    pub specialty_filter: Vec<String>,

    /// Records requested per page
    pub page_size: usize,
}

impl From<&SourceConfig> for ExtractOptions {
    fn from(config: &SourceConfig) -> Self {
        Self {
            states: config.states.clone(),
            specialty_filter: config.specialty_filter.clone(),
            page_size: config.page_size,
        }
    }
}

/// Result of a full extraction pass
#[derive(Debug)]
pub struct ExtractOutcome {
    /// Filtered records, in state order then page order
    pub records: Vec<RawRecord>,

    /// States whose pagination was cut short by a fetch failure
    pub failed_states: Vec<String>,

    /// Total pages fetched across all states
    pub pages_fetched: usize,
}

/// Drives pagination across all states and applies the specialty filter
pub struct Extractor {
    fetcher: Arc<dyn PageFetcher>,
    options: ExtractOptions,
}

impl Extractor {
    /// Create an extractor over the given fetcher and options
    pub fn new(fetcher: Arc<dyn PageFetcher>, options: ExtractOptions) -> Self {
        Self { fetcher, options }
    }

    /// Run the extraction across all configured states
    ///
    /// States are processed strictly in the configured order, pages in
    /// increasing offset order. Per state, pagination stops on the first
    /// empty page, on a page shorter than the requested page size (last
    /// page, no extra fetch issued), or on a fetch error.
    pub async fn run(&self) -> ExtractOutcome {
        let allowed: HashSet<&str> = self
            .options
            .specialty_filter
            .iter()
            .map(String::as_str)
            .collect();

        let mut records = Vec::new();
        let mut failed_states = Vec::new();
        let mut pages_fetched = 0usize;

        tracing::info!(
            states = ?self.options.states,
            page_size = self.options.page_size,
            "Starting data extraction from CMS"
        );

        for state in &self.options.states {
            let mut offset = 0usize;

            tracing::info!(state = %state, "Fetching data for state");

            loop {
                let page = match self
                    .fetcher
                    .fetch_page(state, offset, self.options.page_size)
                    .await
                {
                    Ok(page) => page,
                    Err(e) => {
                        tracing::error!(
                            state = %state,
                            offset = offset,
                            error = %e,
                            "Page fetch failed, skipping remainder of state"
                        );
                        failed_states.push(state.clone());
                        break;
                    }
                };

                pages_fetched += 1;

                if page.is_empty() {
                    break;
                }

                let page_len = page.len();
                let matched_before = records.len();
                records.extend(page.into_iter().filter(|record| {
                    record
                        .get(SPECIALTY_FIELD)
                        .is_some_and(|specialty| allowed.contains(specialty.as_str()))
                }));

                tracing::debug!(
                    state = %state,
                    offset = offset,
                    page_len = page_len,
                    matched = records.len() - matched_before,
                    "Processed page"
                );

                // A short page is the last page for this state
                if page_len < self.options.page_size {
                    break;
                }

                offset += self.options.page_size;
            }
        }

        tracing::info!(
            count = records.len(),
            pages = pages_fetched,
            failed_states = ?failed_states,
            "Extraction completed"
        );

        ExtractOutcome {
            records,
            failed_states,
            pages_fetched,
        }
    }
}
