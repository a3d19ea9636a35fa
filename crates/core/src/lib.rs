//! Shared domain types and pure logic for the posewarp backend.
//!
//! Holds the job model, pose/keypoint/template types, export options,
//! validation helpers, and the collaborator/strategy traits the engine
//! calls through. No I/O lives here.

pub mod collaborators;
pub mod error;
pub mod export;
pub mod job;
pub mod pose;
pub mod strategy;
pub mod types;
pub mod validate;
