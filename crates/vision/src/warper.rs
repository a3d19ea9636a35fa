//! Simulated pose warper.

use async_trait::async_trait;

use posewarp_core::collaborators::ImageMetadata;
use posewarp_core::error::CoreError;
use posewarp_core::pose::Keypoint;
use posewarp_core::strategy::PoseWarper;

/// Placeholder warper: validates its inputs and passes the image bytes
/// through unchanged. A real implementation would mesh-warp the subject
/// from the source onto the target skeleton.
pub struct SimulatedWarper;

#[async_trait]
impl PoseWarper for SimulatedWarper {
    async fn warp(
        &self,
        image: &[u8],
        source: &[Keypoint],
        target: &[Keypoint],
        metadata: &ImageMetadata,
    ) -> Result<Vec<u8>, CoreError> {
        if source.is_empty() {
            return Err(CoreError::Validation(
                "Cannot warp without source keypoints".to_string(),
            ));
        }
        if target.is_empty() {
            return Err(CoreError::Validation(
                "Cannot warp without target keypoints".to_string(),
            ));
        }

        tracing::debug!(
            source_points = source.len(),
            target_points = target.len(),
            width = metadata.width,
            height = metadata.height,
            "Simulated pose warp"
        );

        Ok(image.to_vec())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
