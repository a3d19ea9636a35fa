//! Pose keypoint, segmentation, and template types.
//!
//! The wire format (camelCase field names, lowercase keypoint names) matches
//! the shapes the frontend already consumes.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Keypoints
// ---------------------------------------------------------------------------

/// The 17 COCO body keypoints every detection result carries, in canonical
/// order.
pub const COCO_KEYPOINT_NAMES: [&str; 17] = [
    "nose",
    "left_eye",
    "right_eye",
    "left_ear",
    "right_ear",
    "left_shoulder",
    "right_shoulder",
    "left_elbow",
    "right_elbow",
    "left_wrist",
    "right_wrist",
    "left_hip",
    "right_hip",
    "left_knee",
    "right_knee",
    "left_ankle",
    "right_ankle",
];

/// A single named body keypoint in image coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keypoint {
    /// Canonical keypoint name (one of [`COCO_KEYPOINT_NAMES`]).
    pub name: String,
    /// Horizontal position in pixels.
    pub x: f32,
    /// Vertical position in pixels.
    pub y: f32,
    /// Detection confidence in `0.0..=1.0`.
    pub confidence: f32,
}

impl Keypoint {
    pub fn new(name: impl Into<String>, x: f32, y: f32, confidence: f32) -> Self {
        Self {
            name: name.into(),
            x,
            y,
            confidence,
        }
    }
}

/// Body segmentation polygons keyed by region name (e.g. `"body"`).
/// Each polygon is a list of `[x, y]` vertices in image coordinates.
pub type Segments = HashMap<String, Vec<[f32; 2]>>;

// ---------------------------------------------------------------------------
// Templates
// ---------------------------------------------------------------------------

/// A predefined target pose a transformation can warp a photo into.
///
/// Template keypoints are stored normalized (`0.0..=1.0` relative to image
/// dimensions) so the same template applies to any image size.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoseTemplate {
    pub id: String,
    pub name: String,
    /// Grouping category (`"standing"`, `"sitting"`, `"action"`, ...).
    pub category: String,
    pub thumbnail_url: String,
    pub description: String,
    /// Normalized `[x, y]` position per keypoint name.
    pub keypoints: HashMap<String, [f32; 2]>,
}

impl PoseTemplate {
    /// Scale the template's normalized keypoints to concrete image
    /// dimensions, producing target [`Keypoint`]s for the warper.
    pub fn target_keypoints(&self, width: u32, height: u32) -> Vec<Keypoint> {
        self.keypoints
            .iter()
            .map(|(name, &[nx, ny])| {
                Keypoint::new(name.clone(), nx * width as f32, ny * height as f32, 1.0)
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
