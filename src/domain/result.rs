//! Result type alias for medex
//!
//! This module provides a convenient Result type alias that uses MedexError
//! as the error type.

use super::errors::MedexError;

/// Result type alias for medex operations
///
/// This is a convenience type alias that uses `MedexError` as the error type.
/// Use this throughout the codebase for fallible operations.
///
/// # Examples
///
/// ```
/// use medex::domain::result::Result;
/// use medex::domain::errors::MedexError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(MedexError::Configuration("missing table name".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, MedexError>;
