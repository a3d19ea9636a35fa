//! Concurrent in-memory job store.
//!
//! The single source of truth for job status and results. Thread-safe via
//! interior `RwLock`; designed to be wrapped in `Arc` and shared between the
//! engine, its spawned execution tasks, and polling request handlers.
//!
//! Mutations are atomic per key: a reader either sees the record before a
//! transition or after it, never a partial write. Writes to the *same* job
//! from a concurrent cancel and a finishing execution are last-write-wins;
//! see [`JobStore::mark_cancelled`].

use std::collections::HashMap;

use tokio::sync::RwLock;

use posewarp_core::error::CoreError;
use posewarp_core::job::{Job, JobInput, JobResult, JobStatus};

/// Concurrent map from job id to job record.
pub struct JobStore {
    jobs: RwLock<HashMap<String, Job>>,
}

impl JobStore {
    /// Create a new, empty store.
    pub fn new() -> Self {
        Self {
            jobs: RwLock::new(HashMap::new()),
        }
    }

    /// Insert or replace a job record.
    pub async fn put(&self, job: Job) {
        self.jobs.write().await.insert(job.id.clone(), job);
    }

    /// Fetch a clone of a job record.
    pub async fn get(&self, id: &str) -> Result<Job, CoreError> {
        self.jobs
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| CoreError::not_found("Job", id))
    }

    /// Remove a job record. Returns `false` if it did not exist.
    pub async fn remove(&self, id: &str) -> bool {
        self.jobs.write().await.remove(id).is_some()
    }

    /// Number of records currently in the store.
    pub async fn len(&self) -> usize {
        self.jobs.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.jobs.read().await.is_empty()
    }

    /// Apply `mutate` to the record only if its status currently equals
    /// `expected`. Returns `true` if the mutation was applied.
    ///
    /// The check and the mutation happen under one write guard, so no other
    /// writer can interleave between them.
    pub async fn compare_and_swap_status<F>(&self, id: &str, expected: JobStatus, mutate: F) -> bool
    where
        F: FnOnce(&mut Job),
    {
        let mut jobs = self.jobs.write().await;
        match jobs.get_mut(id) {
            Some(job) if job.status == expected => {
                mutate(job);
                true
            }
            _ => false,
        }
    }

    // -- Transition helpers used by the engine ------------------------------

    /// Record a successful completion: `completed` status, result payload,
    /// completion timestamp, error cleared.
    ///
    /// A no-op if the record was removed in the meantime. Deliberately not
    /// guarded by status: a cancel racing a finishing execution resolves as
    /// last write wins.
    pub async fn complete(&self, id: &str, result: JobResult) {
        if let Some(job) = self.jobs.write().await.get_mut(id) {
            job.status = JobStatus::Completed;
            job.result = Some(result);
            job.error = None;
            job.completed_at = Some(chrono::Utc::now());
        }
    }

    /// Record an execution failure: `failed` status, error message,
    /// completion timestamp, result cleared.
    pub async fn fail(&self, id: &str, message: String) {
        if let Some(job) = self.jobs.write().await.get_mut(id) {
            job.status = JobStatus::Failed;
            job.result = None;
            job.error = Some(message);
            job.completed_at = Some(chrono::Utc::now());
        }
    }

    /// Record a cancellation: `cancelled` status plus completion timestamp.
    ///
    /// Unconditional like [`JobStore::complete`] -- if the execution
    /// finishes between the caller's registry check and this write, the two
    /// writers clobber each other and the last one wins.
    pub async fn mark_cancelled(&self, id: &str) {
        if let Some(job) = self.jobs.write().await.get_mut(id) {
            job.status = JobStatus::Cancelled;
            job.completed_at = Some(chrono::Utc::now());
        }
    }

    /// Reset a record to `processing` with fresh input, clearing any prior
    /// result, error, and completion timestamp. Used by update before
    /// resubmitting the execution.
    pub async fn reset_processing(&self, id: &str, input: JobInput) -> Result<(), CoreError> {
        let mut jobs = self.jobs.write().await;
        let job = jobs
            .get_mut(id)
            .ok_or_else(|| CoreError::not_found("Job", id))?;
        job.input = input;
        job.status = JobStatus::Processing;
        job.result = None;
        job.error = None;
        job.completed_at = None;
        Ok(())
    }
}

impl Default for JobStore {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
