//! Kind-specific workflow adapters.
//!
//! Each adapter supplies the engine with synchronous precondition checks
//! (run before any job record exists) and the work future for its kind.
//! The adapters call collaborators and strategies but contain no
//! concurrency logic of their own.

pub mod detection;
pub mod export;
pub mod transformation;

pub use detection::DetectionWorkflow;
pub use export::ExportWorkflow;
pub use transformation::TransformationWorkflow;
