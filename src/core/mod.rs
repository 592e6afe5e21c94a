//! Core business logic
//!
//! - [`extract`] - pagination/filter loop across states
//! - [`transform`] - rename, null-normalize, coerce, timestamp, split
//! - [`pipeline`] - orchestration and run summary

pub mod extract;
pub mod pipeline;
pub mod transform;
