//! The job model: kinds, statuses, inputs, results, and id generation.
//!
//! One `Job` record tracks one unit of asynchronous work from submission to
//! its terminal state. The engine owns the only mutable copy; everything the
//! API returns is a clone of the record at poll time.

use serde::{Deserialize, Serialize};

use crate::export::ExportOptions;
use crate::pose::{Keypoint, Segments};
use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Kind
// ---------------------------------------------------------------------------

/// What a job computes. Determines the input/result shape and which
/// workflow adapter runs it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobKind {
    Detection,
    Transformation,
    Export,
}

impl JobKind {
    /// Job-id prefix for this kind (`det_...`, `trans_...`, `exp_...`).
    pub fn id_prefix(self) -> &'static str {
        match self {
            Self::Detection => "det",
            Self::Transformation => "trans",
            Self::Export => "exp",
        }
    }
}

/// Id prefix for uploaded source images. Uploads are not jobs, but their
/// ids share the same `<prefix>_<token>` scheme.
pub const IMAGE_ID_PREFIX: &str = "img";

/// Generate a process-unique id with the given prefix.
///
/// The suffix is a hyphenless UUIDv4, which is collision-resistant for the
/// lifetime of the process (and well beyond).
pub fn generate_id(prefix: &str) -> String {
    format!("{prefix}_{}", uuid::Uuid::new_v4().simple())
}

/// Generate a job id for the given kind.
pub fn generate_job_id(kind: JobKind) -> String {
    generate_id(kind.id_prefix())
}

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Job lifecycle status.
///
/// `Completed` and `Cancelled` are terminal. `Failed` can re-enter
/// `Processing` via update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Processing,
    Completed,
    Failed,
    Cancelled,
}

impl JobStatus {
    /// Whether no further transition can leave this status.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// Whether an update (resubmission with new input) is allowed.
    pub fn is_updatable(self) -> bool {
        matches!(self, Self::Processing | Self::Failed)
    }

    /// Lowercase wire name, as used in response payloads and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Cancelled => "cancelled",
        }
    }
}

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// Kind-specific job input, echoed back verbatim in status payloads.
///
/// Untagged deserialization takes the first variant whose required fields
/// are present, so variants are ordered most-specific first: `Detection`
/// needs only `imageId` and must stay last or it would swallow
/// transformation payloads.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(untagged)]
pub enum JobInput {
    #[serde(rename_all = "camelCase")]
    Transformation {
        image_id: String,
        template_id: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        custom_keypoints: Option<Vec<Keypoint>>,
    },
    #[serde(rename_all = "camelCase")]
    Export {
        transformation_id: String,
        #[serde(flatten)]
        options: ExportOptions,
    },
    #[serde(rename_all = "camelCase")]
    Detection { image_id: String },
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// Outcome of a completed detection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionResult {
    /// Exactly the 17 COCO keypoints, scaled to the source image.
    pub keypoints: Vec<Keypoint>,
    /// Segmentation polygons keyed by region name.
    pub segments: Segments,
    /// Overall detection confidence in `0.0..=1.0`.
    pub confidence: f32,
}

/// Outcome of a completed transformation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformationResult {
    pub result_url: String,
    pub thumbnail_url: String,
    pub width: u32,
    pub height: u32,
}

/// Outcome of a completed export.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportResult {
    pub download_url: String,
    pub format: String,
    pub quality: String,
    pub width: u32,
    pub height: u32,
    pub file_size: u64,
    /// When the download link stops working.
    pub expires_at: Timestamp,
}

/// Kind-specific result payload, present only on `Completed` jobs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum JobResult {
    Detection(DetectionResult),
    Transformation(TransformationResult),
    Export(ExportResult),
}

// ---------------------------------------------------------------------------
// Job record
// ---------------------------------------------------------------------------

/// One tracked unit of asynchronous work.
///
/// Invariants (enforced by the engine's transition helpers):
/// - `result` is `Some` iff `status == Completed`.
/// - `error` is `Some` iff `status == Failed`.
/// - `completed_at` is set on every terminal transition and on failure,
///   and cleared when an update re-enters `Processing`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: String,
    pub kind: JobKind,
    #[serde(flatten)]
    pub input: JobInput,
    pub status: JobStatus,
    pub result: Option<JobResult>,
    pub error: Option<String>,
    pub created_at: Timestamp,
    pub completed_at: Option<Timestamp>,
}

impl Job {
    /// Create a fresh `Processing` record for a newly submitted job.
    pub fn processing(id: String, kind: JobKind, input: JobInput) -> Self {
        Self {
            id,
            kind,
            input,
            status: JobStatus::Processing,
            result: None,
            error: None,
            created_at: chrono::Utc::now(),
            completed_at: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
