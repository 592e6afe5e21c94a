//! Pipeline orchestration

pub mod coordinator;
pub mod summary;

pub use coordinator::PipelineCoordinator;
pub use summary::RunSummary;
