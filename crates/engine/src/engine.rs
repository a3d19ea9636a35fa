//! Job submission, execution, cancellation, and update orchestration.
//!
//! [`JobEngine`] is the only component that mutates the store and registry
//! together. Each submitted job runs as one spawned Tokio task that races
//! the work future against its cancellation token; the task reports the
//! outcome back into the store exactly once and then deregisters its
//! handle. Work errors are captured into the job record and never surface
//! to the submit caller.

use std::future::Future;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use posewarp_core::error::CoreError;
use posewarp_core::job::{generate_job_id, Job, JobInput, JobKind, JobResult};

use crate::registry::{CancellationRegistry, ExecutionHandle};
use crate::store::JobStore;

/// Orchestrates the asynchronous job lifecycle over a shared store and
/// cancellation registry.
///
/// Created once at startup and shared via `Arc`. Work futures are supplied
/// by the workflow adapters; the engine itself is kind-agnostic.
pub struct JobEngine {
    store: Arc<JobStore>,
    registry: Arc<CancellationRegistry>,
}

impl JobEngine {
    /// Create an engine with a fresh, empty store and registry.
    pub fn new() -> Self {
        Self {
            store: Arc::new(JobStore::new()),
            registry: Arc::new(CancellationRegistry::new()),
        }
    }

    /// The underlying job store (shared with polling handlers and tests).
    pub fn store(&self) -> &Arc<JobStore> {
        &self.store
    }

    /// The cancellation registry.
    pub fn registry(&self) -> &Arc<CancellationRegistry> {
        &self.registry
    }

    /// Submit a new job: store a `processing` record, spawn the work
    /// future, and return the fresh record immediately.
    ///
    /// Precondition checks against external collaborators belong in the
    /// workflow adapters and must run *before* this call, so a rejected
    /// submission leaves no record behind.
    ///
    /// `work` receives the generated job id and a cancellation token. The
    /// token is cancelled when the job is cancelled or superseded; the
    /// engine stops waiting on the work future at its next suspension
    /// point, so work functions should keep slow external calls as
    /// individual awaits rather than blocking.
    pub async fn submit<F, Fut>(&self, kind: JobKind, input: JobInput, work: F) -> Job
    where
        F: FnOnce(String, CancellationToken) -> Fut + Send + 'static,
        Fut: Future<Output = Result<JobResult, CoreError>> + Send + 'static,
    {
        let id = generate_job_id(kind);
        let job = Job::processing(id.clone(), kind, input);
        self.store.put(job.clone()).await;

        self.spawn_execution(id.clone(), work).await;

        tracing::info!(job_id = %id, kind = ?kind, "Job submitted");
        job
    }

    /// Fetch the current record for a job.
    pub async fn get(&self, id: &str) -> Result<Job, CoreError> {
        self.store.get(id).await
    }

    /// Request cancellation of a running job.
    ///
    /// Returns `false` (a no-op) when no execution is registered for the id
    /// or the execution already finished, so repeated cancels are
    /// idempotent. Otherwise cancels the token, drops the handle, and
    /// writes the `cancelled` status.
    ///
    /// The status write is not CAS-guarded: if the execution finishes
    /// between the `is_done` check and the write, the store resolves the
    /// two writers as last write wins.
    pub async fn cancel(&self, id: &str) -> bool {
        let Some(handle) = self.registry.lookup(id).await else {
            return false;
        };
        if handle.is_done() {
            return false;
        }

        handle.cancel();
        self.registry.unregister(id).await;
        self.store.mark_cancelled(id).await;

        tracing::info!(job_id = %id, "Job cancelled");
        true
    }

    /// Replace a job's input and restart its execution under the same id.
    ///
    /// Allowed only while the job is `processing` or `failed`; `completed`
    /// and `cancelled` jobs reject the update with a state error. Any
    /// running execution is cancelled best-effort, the record is reset to
    /// `processing` (result, error, and completion timestamp cleared), and
    /// a fresh execution starts with the new input.
    pub async fn update<F, Fut>(
        &self,
        id: &str,
        new_input: JobInput,
        work: F,
    ) -> Result<Job, CoreError>
    where
        F: FnOnce(String, CancellationToken) -> Fut + Send + 'static,
        Fut: Future<Output = Result<JobResult, CoreError>> + Send + 'static,
    {
        let job = self.store.get(id).await?;
        if !job.status.is_updatable() {
            return Err(CoreError::State(format!(
                "Job {id} is {} and cannot be updated",
                job.status.as_str()
            )));
        }

        // Supersede the running execution, if any.
        if let Some(handle) = self.registry.lookup(id).await {
            handle.cancel();
            self.registry.unregister(id).await;
        }

        self.store.reset_processing(id, new_input).await?;
        self.spawn_execution(id.to_string(), work).await;

        tracing::info!(job_id = %id, "Job updated and resubmitted");
        self.store.get(id).await
    }

    /// Remove a job record entirely (export cleanup). Returns `false` if
    /// the id was unknown. A still-running execution is not interrupted;
    /// its eventual completion write hits a removed key and is dropped.
    pub async fn remove(&self, id: &str) -> bool {
        self.store.remove(id).await
    }

    /// Spawn the execution unit for a job id.
    ///
    /// The task races the work future against the cancellation token:
    /// - work resolves `Ok` -> `completed` with the result payload;
    /// - work resolves `Err` -> `failed` with the error message;
    /// - token fires first -> no store write (the cancelling caller has
    ///   already written, or will write, the `cancelled` status).
    ///
    /// In every case the task marks its handle done and deregisters it.
    async fn spawn_execution<F, Fut>(&self, id: String, work: F)
    where
        F: FnOnce(String, CancellationToken) -> Fut + Send + 'static,
        Fut: Future<Output = Result<JobResult, CoreError>> + Send + 'static,
    {
        let token = CancellationToken::new();
        let handle = ExecutionHandle::new(token.clone());
        self.registry.register(id.clone(), handle.clone()).await;

        let store = Arc::clone(&self.store);
        let registry = Arc::clone(&self.registry);

        tokio::spawn(async move {
            let work_future = work(id.clone(), token.clone());

            let outcome = tokio::select! {
                _ = token.cancelled() => None,
                result = work_future => Some(result),
            };

            match outcome {
                Some(Ok(result)) => {
                    store.complete(&id, result).await;
                    tracing::info!(job_id = %id, "Job completed");
                }
                Some(Err(e)) => {
                    store.fail(&id, e.to_string()).await;
                    tracing::error!(job_id = %id, error = %e, "Job failed");
                }
                None => {
                    tracing::info!(job_id = %id, "Job execution abandoned after cancellation");
                }
            }

            handle.mark_done();
            registry.unregister_execution(&id, &handle).await;
        });
    }
}

impl Default for JobEngine {
    fn default() -> Self {
        Self::new()
    }
}
