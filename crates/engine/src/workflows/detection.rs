//! Pose detection workflow.

use std::sync::Arc;

use posewarp_core::collaborators::ImageStorage;
use posewarp_core::error::CoreError;
use posewarp_core::job::{DetectionResult, Job, JobInput, JobKind, JobResult};
use posewarp_core::strategy::PoseEstimator;
use posewarp_core::validate::validate_id;

use crate::engine::JobEngine;

/// Submits and tracks detection jobs: validate the referenced image, then
/// run the injected estimator over its data in the background.
pub struct DetectionWorkflow {
    engine: Arc<JobEngine>,
    images: Arc<dyn ImageStorage>,
    estimator: Arc<dyn PoseEstimator>,
}

impl DetectionWorkflow {
    pub fn new(
        engine: Arc<JobEngine>,
        images: Arc<dyn ImageStorage>,
        estimator: Arc<dyn PoseEstimator>,
    ) -> Self {
        Self {
            engine,
            images,
            estimator,
        }
    }

    /// Submit a detection job for a stored image.
    ///
    /// Fails synchronously (no record created) when the image id is
    /// malformed or the image does not exist.
    pub async fn submit(&self, image_id: &str) -> Result<Job, CoreError> {
        validate_id("Image id", image_id)?;
        if !self.images.image_exists(image_id).await {
            return Err(CoreError::not_found("Image", image_id));
        }

        let input = JobInput::Detection {
            image_id: image_id.to_string(),
        };

        let images = Arc::clone(&self.images);
        let estimator = Arc::clone(&self.estimator);
        let image_id = image_id.to_string();

        let job = self
            .engine
            .submit(JobKind::Detection, input, move |_job_id, _token| async move {
                let data = images.image_data(&image_id).await?;
                let metadata = images.image_metadata(&image_id).await?;
                let pose = estimator.estimate(&data, &metadata).await?;
                Ok(JobResult::Detection(DetectionResult {
                    keypoints: pose.keypoints,
                    segments: pose.segments,
                    confidence: pose.confidence,
                }))
            })
            .await;

        Ok(job)
    }

    /// Fetch a detection job; ids of other kinds are reported as not found.
    pub async fn get(&self, id: &str) -> Result<Job, CoreError> {
        let job = self.engine.get(id).await?;
        if job.kind != JobKind::Detection {
            return Err(CoreError::not_found("Detection job", id));
        }
        Ok(job)
    }

    /// Cancel a running detection. Unknown ids, other kinds, and already
    /// finished jobs all return `false`.
    pub async fn cancel(&self, id: &str) -> bool {
        match self.engine.get(id).await {
            Ok(job) if job.kind == JobKind::Detection => self.engine.cancel(id).await,
            _ => false,
        }
    }
}
