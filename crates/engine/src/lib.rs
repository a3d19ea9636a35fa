//! The asynchronous job lifecycle engine.
//!
//! [`JobEngine`] owns the process-lifetime [`JobStore`] and
//! [`CancellationRegistry`] and is the only component that mutates them
//! together. Submission stores a `processing` record, spawns the work
//! future on the Tokio runtime, and returns immediately; callers poll for
//! the outcome. The workflow adapters in [`workflows`] supply the
//! kind-specific precondition checks and work futures.

pub mod engine;
pub mod registry;
pub mod store;
pub mod workflows;

pub use engine::JobEngine;
pub use registry::{CancellationRegistry, ExecutionHandle};
pub use store::JobStore;
