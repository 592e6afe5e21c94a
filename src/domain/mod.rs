//! Domain models and types for medex.
//!
//! This module contains the core domain models, types, and business rules:
//!
//! - **Record shapes** ([`RawRecord`], [`DoctorRow`], [`SpecialtyLocationRow`])
//! - **Error types** ([`MedexError`], [`FetchError`], [`LoadError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, MedexError>`]:
//!
//! ```rust
//! use medex::domain::{MedexError, Result};
//!
//! fn example() -> Result<()> {
//!     Err(MedexError::Configuration("missing dataset id".to_string()))
//! }
//! ```

pub mod errors;
pub mod record;
pub mod result;

// Re-export commonly used types for convenience
pub use errors::{FetchError, LoadError, MedexError};
pub use record::{DoctorRow, RawRecord, SpecialtyLocationRow};
pub use result::Result;
