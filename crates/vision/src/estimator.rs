//! Simulated pose estimator.

use std::collections::HashMap;

use async_trait::async_trait;

use posewarp_core::collaborators::ImageMetadata;
use posewarp_core::error::CoreError;
use posewarp_core::pose::{Keypoint, Segments};
use posewarp_core::strategy::{EstimatedPose, PoseEstimator};

/// Overall confidence reported for every simulated detection.
pub const SIMULATED_CONFIDENCE: f32 = 0.95;

/// Fractional `(x, y)` position and per-point confidence for each of the 17
/// COCO keypoints, describing an upright figure centered in the frame.
const KEYPOINT_LAYOUT: [(&str, f32, f32, f32); 17] = [
    ("nose", 0.5, 0.2, 0.98),
    ("left_eye", 0.45, 0.18, 0.96),
    ("right_eye", 0.55, 0.18, 0.97),
    ("left_ear", 0.4, 0.2, 0.9),
    ("right_ear", 0.6, 0.2, 0.91),
    ("left_shoulder", 0.35, 0.3, 0.94),
    ("right_shoulder", 0.65, 0.3, 0.95),
    ("left_elbow", 0.3, 0.45, 0.92),
    ("right_elbow", 0.7, 0.45, 0.93),
    ("left_wrist", 0.25, 0.6, 0.9),
    ("right_wrist", 0.75, 0.6, 0.91),
    ("left_hip", 0.4, 0.6, 0.95),
    ("right_hip", 0.6, 0.6, 0.96),
    ("left_knee", 0.4, 0.75, 0.94),
    ("right_knee", 0.6, 0.75, 0.93),
    ("left_ankle", 0.4, 0.9, 0.91),
    ("right_ankle", 0.6, 0.9, 0.92),
];

/// Deterministic estimator placing the COCO keypoints at fixed fractions of
/// the image dimensions.
pub struct SimulatedEstimator;

#[async_trait]
impl PoseEstimator for SimulatedEstimator {
    async fn estimate(
        &self,
        _image: &[u8],
        metadata: &ImageMetadata,
    ) -> Result<EstimatedPose, CoreError> {
        let w = metadata.width as f32;
        let h = metadata.height as f32;

        let keypoints = KEYPOINT_LAYOUT
            .iter()
            .map(|&(name, fx, fy, confidence)| Keypoint::new(name, w * fx, h * fy, confidence))
            .collect();

        tracing::debug!(
            width = metadata.width,
            height = metadata.height,
            "Simulated pose estimation"
        );

        Ok(EstimatedPose {
            keypoints,
            segments: body_segment(metadata.width, metadata.height),
            confidence: SIMULATED_CONFIDENCE,
        })
    }
}

/// Simulated segmentation: a single closed `"body"` polygon covering the
/// figure, scaled to the image dimensions.
pub fn body_segment(width: u32, height: u32) -> Segments {
    let w = width as f32;
    let h = height as f32;
    let polygon = vec![
        [w * 0.4, h * 0.1],
        [w * 0.6, h * 0.1],
        [w * 0.7, h * 0.3],
        [w * 0.75, h * 0.6],
        [w * 0.65, h * 0.9],
        [w * 0.55, h * 0.95],
        [w * 0.45, h * 0.95],
        [w * 0.35, h * 0.9],
        [w * 0.25, h * 0.6],
        [w * 0.3, h * 0.3],
    ];

    let mut segments = HashMap::new();
    segments.insert("body".to_string(), polygon);
    segments
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
