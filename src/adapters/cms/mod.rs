//! CMS datastore adapter
//!
//! This module provides access to the CMS provider-data datastore SQL API.
//! The [`PageFetcher`] trait is the seam between the extraction loop and the
//! HTTP client, so the extractor can be exercised against scripted fixtures.

pub mod client;

use crate::domain::errors::FetchError;
use crate::domain::record::RawRecord;
use async_trait::async_trait;

/// One paginated fetch against the source API
///
/// Implementations issue a single query scoped to `state` with the given
/// `offset` and `limit` and return the decoded page. An empty page signals
/// the end of data for that state. No retries happen at this layer; a
/// failure is reported upward as a [`FetchError`].
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch_page(
        &self,
        state: &str,
        offset: usize,
        limit: usize,
    ) -> std::result::Result<Vec<RawRecord>, FetchError>;
}

pub use client::CmsClient;
