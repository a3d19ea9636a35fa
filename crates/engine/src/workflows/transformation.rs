//! Pose transformation workflow.
//!
//! Warps a stored photo so its subject matches a template pose. Source
//! keypoints come from the caller (custom keypoints) or, when absent, from
//! a fresh estimation pass over the image.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use posewarp_core::collaborators::{ImageStorage, TemplateCatalog};
use posewarp_core::error::CoreError;
use posewarp_core::job::{Job, JobInput, JobKind, JobResult, TransformationResult};
use posewarp_core::pose::Keypoint;
use posewarp_core::strategy::{PoseEstimator, PoseWarper};
use posewarp_core::validate::{validate_custom_keypoints, validate_id};

use crate::engine::JobEngine;

/// Thumbnail edge length for transformation results.
const THUMBNAIL_SIZE: u32 = 300;

type WorkFuture = Pin<Box<dyn Future<Output = Result<JobResult, CoreError>> + Send>>;

/// Submits, updates, and tracks transformation jobs.
pub struct TransformationWorkflow {
    engine: Arc<JobEngine>,
    images: Arc<dyn ImageStorage>,
    templates: Arc<dyn TemplateCatalog>,
    estimator: Arc<dyn PoseEstimator>,
    warper: Arc<dyn PoseWarper>,
}

impl TransformationWorkflow {
    pub fn new(
        engine: Arc<JobEngine>,
        images: Arc<dyn ImageStorage>,
        templates: Arc<dyn TemplateCatalog>,
        estimator: Arc<dyn PoseEstimator>,
        warper: Arc<dyn PoseWarper>,
    ) -> Self {
        Self {
            engine,
            images,
            templates,
            estimator,
            warper,
        }
    }

    /// Submit a transformation job.
    ///
    /// Fails synchronously (no record created) when an id is malformed,
    /// the image or template does not exist, or the custom keypoints are
    /// invalid.
    pub async fn submit(
        &self,
        image_id: &str,
        template_id: &str,
        custom_keypoints: Option<Vec<Keypoint>>,
    ) -> Result<Job, CoreError> {
        validate_id("Image id", image_id)?;
        validate_id("Template id", template_id)?;
        if let Some(kps) = &custom_keypoints {
            validate_custom_keypoints(kps)?;
        }
        if !self.images.image_exists(image_id).await {
            return Err(CoreError::not_found("Image", image_id));
        }
        if self.templates.get(template_id).is_none() {
            return Err(CoreError::not_found("Template", template_id));
        }

        let input = JobInput::Transformation {
            image_id: image_id.to_string(),
            template_id: template_id.to_string(),
            custom_keypoints: custom_keypoints.clone(),
        };
        let work = self.make_work(
            image_id.to_string(),
            template_id.to_string(),
            custom_keypoints,
        );

        Ok(self.engine.submit(JobKind::Transformation, input, work).await)
    }

    /// Replace a transformation's keypoints and restart it under the same
    /// id, superseding any running execution.
    ///
    /// Allowed only while the job is `processing` or `failed`; the engine
    /// rejects updates to `completed` and `cancelled` jobs with a state
    /// error.
    pub async fn update(
        &self,
        id: &str,
        custom_keypoints: Option<Vec<Keypoint>>,
    ) -> Result<Job, CoreError> {
        let job = self.get(id).await?;
        let JobInput::Transformation {
            image_id,
            template_id,
            ..
        } = job.input
        else {
            return Err(CoreError::Internal(format!(
                "Transformation job {id} carries a mismatched input payload"
            )));
        };
        if let Some(kps) = &custom_keypoints {
            validate_custom_keypoints(kps)?;
        }

        let input = JobInput::Transformation {
            image_id: image_id.clone(),
            template_id: template_id.clone(),
            custom_keypoints: custom_keypoints.clone(),
        };
        let work = self.make_work(image_id, template_id, custom_keypoints);

        self.engine.update(id, input, work).await
    }

    /// Fetch a transformation job; ids of other kinds are reported as not
    /// found.
    pub async fn get(&self, id: &str) -> Result<Job, CoreError> {
        let job = self.engine.get(id).await?;
        if job.kind != JobKind::Transformation {
            return Err(CoreError::not_found("Transformation job", id));
        }
        Ok(job)
    }

    /// Cancel a running transformation. Unknown ids, other kinds, and
    /// already finished jobs all return `false`.
    pub async fn cancel(&self, id: &str) -> bool {
        match self.engine.get(id).await {
            Ok(job) if job.kind == JobKind::Transformation => self.engine.cancel(id).await,
            _ => false,
        }
    }

    /// Build the work future for one execution attempt.
    fn make_work(
        &self,
        image_id: String,
        template_id: String,
        custom_keypoints: Option<Vec<Keypoint>>,
    ) -> impl FnOnce(String, CancellationToken) -> WorkFuture + Send + 'static {
        let images = Arc::clone(&self.images);
        let templates = Arc::clone(&self.templates);
        let estimator = Arc::clone(&self.estimator);
        let warper = Arc::clone(&self.warper);

        move |job_id, _token| {
            Box::pin(async move {
                let data = images.image_data(&image_id).await?;
                let metadata = images.image_metadata(&image_id).await?;
                let template = templates
                    .get(&template_id)
                    .ok_or_else(|| CoreError::not_found("Template", template_id.as_str()))?;

                let source_keypoints = match custom_keypoints {
                    Some(kps) => kps,
                    None => estimator.estimate(&data, &metadata).await?.keypoints,
                };
                let target_keypoints = template.target_keypoints(metadata.width, metadata.height);

                let warped = warper
                    .warp(&data, &source_keypoints, &target_keypoints, &metadata)
                    .await?;

                let result_url = images
                    .save_result_image(warped, &job_id, &metadata.content_type)
                    .await?;
                let thumbnail_url = images
                    .generate_thumbnail(&job_id, THUMBNAIL_SIZE, THUMBNAIL_SIZE)
                    .await?;

                Ok(JobResult::Transformation(TransformationResult {
                    result_url,
                    thumbnail_url,
                    width: metadata.width,
                    height: metadata.height,
                }))
            })
        }
    }
}
