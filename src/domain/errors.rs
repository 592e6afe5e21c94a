//! Domain error types
//!
//! This module defines the error hierarchy for medex. All errors are
//! domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main medex error type
///
/// This is the primary error type used throughout the application.
/// It wraps specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum MedexError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Errors fetching a page from the CMS datastore API
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Errors loading rows into the warehouse
    #[error("Load error: {0}")]
    Load(#[from] LoadError),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Errors from a single paginated fetch against the CMS datastore API
///
/// These are recovered locally by the extractor: a failed page fetch ends
/// pagination for that state only, it never aborts the whole run.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Failed to reach the CMS endpoint
    #[error("Failed to connect to CMS datastore: {0}")]
    ConnectionFailed(String),

    /// Non-success HTTP status from the endpoint
    #[error("CMS datastore returned status {status}: {message}")]
    HttpStatus { status: u16, message: String },

    /// Response body could not be decoded as a record page
    #[error("Invalid response body: {0}")]
    InvalidResponse(String),
}

/// Errors from the warehouse loader
///
/// These are surfaced to the caller; a load failure fails the run.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Failed to reach the warehouse endpoint
    #[error("Failed to connect to warehouse: {0}")]
    ConnectionFailed(String),

    /// Non-success HTTP status from the warehouse
    #[error("Warehouse returned status {status} for table {table}: {message}")]
    HttpStatus {
        status: u16,
        table: String,
        message: String,
    },

    /// The warehouse accepted the request but rejected individual rows
    #[error("Insert into {table} failed for {failed} of {total} rows: {detail}")]
    InsertFailed {
        table: String,
        failed: usize,
        total: usize,
        detail: String,
    },

    /// Failed to decode the warehouse response
    #[error("Failed to deserialize warehouse response: {0}")]
    DeserializationFailed(String),
}

// Conversion from std::io::Error
impl From<std::io::Error> for MedexError {
    fn from(err: std::io::Error) -> Self {
        MedexError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for MedexError {
    fn from(err: serde_json::Error) -> Self {
        MedexError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for MedexError {
    fn from(err: toml::de::Error) -> Self {
        MedexError::Configuration(format!("TOML parse error: {err}"))
    }
}
