//! Injected strategy interfaces for the pose algorithms.
//!
//! The real estimation and warping algorithms are out of scope; the engine
//! is written against these capability traits so it stays correct and
//! testable regardless of what the implementations compute. The simulated
//! implementations live in `posewarp-vision`.

use async_trait::async_trait;

use crate::collaborators::ImageMetadata;
use crate::error::CoreError;
use crate::pose::{Keypoint, Segments};

/// Output of a pose estimation pass over one image.
#[derive(Debug, Clone)]
pub struct EstimatedPose {
    pub keypoints: Vec<Keypoint>,
    pub segments: Segments,
    /// Overall confidence in `0.0..=1.0`.
    pub confidence: f32,
}

/// Detects a human pose in an image.
#[async_trait]
pub trait PoseEstimator: Send + Sync {
    async fn estimate(
        &self,
        image: &[u8],
        metadata: &ImageMetadata,
    ) -> Result<EstimatedPose, CoreError>;
}

/// Warps an image so its subject moves from `source` to `target` keypoints.
#[async_trait]
pub trait PoseWarper: Send + Sync {
    async fn warp(
        &self,
        image: &[u8],
        source: &[Keypoint],
        target: &[Keypoint],
        metadata: &ImageMetadata,
    ) -> Result<Vec<u8>, CoreError>;
}
