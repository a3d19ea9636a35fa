//! Result export workflow.
//!
//! Packages a completed transformation into a downloadable file. The
//! actual re-encoding is simulated; the job produces a download URL with a
//! 24-hour expiry and the negotiated format/quality/dimensions.

use std::sync::Arc;

use posewarp_core::error::CoreError;
use posewarp_core::export::{ExportOptions, EXPORT_TTL_SECS};
use posewarp_core::job::{ExportResult, Job, JobInput, JobKind, JobResult, JobStatus};
use posewarp_core::validate::validate_id;

use crate::engine::JobEngine;

/// Simulated size of an exported file, pending real re-encoding.
const SIMULATED_EXPORT_BYTES: u64 = 1024 * 1024;

/// Submits and tracks export jobs over completed transformations.
pub struct ExportWorkflow {
    engine: Arc<JobEngine>,
}

impl ExportWorkflow {
    pub fn new(engine: Arc<JobEngine>) -> Self {
        Self { engine }
    }

    /// Submit an export for a completed transformation.
    ///
    /// Fails synchronously (no record created) when the transformation id
    /// is unknown, not a transformation, or not yet `completed`, or when
    /// the format/quality options are invalid.
    pub async fn submit(
        &self,
        transformation_id: &str,
        format: Option<String>,
        quality: Option<String>,
        width: Option<u32>,
        height: Option<u32>,
    ) -> Result<Job, CoreError> {
        validate_id("Transformation id", transformation_id)?;
        let options = ExportOptions::normalize(format, quality, width, height)?;

        let transformation = self
            .engine
            .get(transformation_id)
            .await
            .map_err(|_| CoreError::not_found("Transformation job", transformation_id))?;
        if transformation.kind != JobKind::Transformation {
            return Err(CoreError::not_found("Transformation job", transformation_id));
        }
        if transformation.status != JobStatus::Completed {
            return Err(CoreError::State(format!(
                "Transformation {transformation_id} is {}; only completed transformations can be exported",
                transformation.status.as_str()
            )));
        }
        let Some(JobResult::Transformation(transformation_result)) = transformation.result else {
            return Err(CoreError::Internal(format!(
                "Completed transformation {transformation_id} has no result payload"
            )));
        };

        let input = JobInput::Export {
            transformation_id: transformation_id.to_string(),
            options: options.clone(),
        };

        let job = self
            .engine
            .submit(JobKind::Export, input, move |job_id, _token| async move {
                let width = options.width.unwrap_or(transformation_result.width);
                let height = options.height.unwrap_or(transformation_result.height);
                let expires_at = chrono::Utc::now() + chrono::Duration::seconds(EXPORT_TTL_SECS);

                Ok(JobResult::Export(ExportResult {
                    download_url: format!("/api/v1/exports/{job_id}/download"),
                    format: options.format,
                    quality: options.quality,
                    width,
                    height,
                    file_size: SIMULATED_EXPORT_BYTES,
                    expires_at,
                }))
            })
            .await;

        Ok(job)
    }

    /// Fetch an export job; ids of other kinds are reported as not found.
    pub async fn get(&self, id: &str) -> Result<Job, CoreError> {
        let job = self.engine.get(id).await?;
        if job.kind != JobKind::Export {
            return Err(CoreError::not_found("Export job", id));
        }
        Ok(job)
    }

    /// Cancel a running export. Unknown ids, other kinds, and already
    /// finished jobs all return `false`.
    pub async fn cancel(&self, id: &str) -> bool {
        match self.engine.get(id).await {
            Ok(job) if job.kind == JobKind::Export => self.engine.cancel(id).await,
            _ => false,
        }
    }

    /// The download URL of a completed export.
    ///
    /// Signals a state error while the export has not completed.
    pub async fn download_url(&self, id: &str) -> Result<String, CoreError> {
        let job = self.get(id).await?;
        match (&job.status, &job.result) {
            (JobStatus::Completed, Some(JobResult::Export(result))) => {
                Ok(result.download_url.clone())
            }
            _ => Err(CoreError::State(format!(
                "Export {id} is {}; the download link is available once it completes",
                job.status.as_str()
            ))),
        }
    }

    /// Remove an export record (cleanup after download or expiry).
    /// Returns `false` if the id is unknown or not an export.
    pub async fn delete(&self, id: &str) -> bool {
        match self.engine.get(id).await {
            Ok(job) if job.kind == JobKind::Export => self.engine.remove(id).await,
            _ => false,
        }
    }
}
