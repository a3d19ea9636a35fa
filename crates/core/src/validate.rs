//! Input validation helpers shared by the workflow adapters and API layer.
//!
//! All failures are synchronous [`CoreError::Validation`] errors; nothing is
//! written to the job store before these pass.

use crate::error::CoreError;
use crate::pose::Keypoint;

/// Maximum length of caller-supplied ids.
const MAX_ID_LEN: usize = 128;

/// Validate an opaque id (image, template, or job id) from a request.
///
/// Rules:
/// - Must not be empty (after trimming).
/// - Must not exceed `MAX_ID_LEN` characters.
/// - Must contain only alphanumeric, hyphen, or underscore characters.
pub fn validate_id(label: &str, id: &str) -> Result<(), CoreError> {
    let trimmed = id.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(format!("{label} must not be empty")));
    }
    if trimmed.len() > MAX_ID_LEN {
        return Err(CoreError::Validation(format!(
            "{label} must not exceed {MAX_ID_LEN} characters"
        )));
    }
    if !trimmed
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(CoreError::Validation(format!(
            "{label} may only contain alphanumeric, hyphen, or underscore characters"
        )));
    }
    Ok(())
}

/// Validate a caller-supplied set of custom keypoints.
///
/// Rules:
/// - The set may be empty only if absent entirely (callers pass `None`).
/// - Every keypoint needs a non-empty name.
/// - Confidence must lie in `0.0..=1.0`.
pub fn validate_custom_keypoints(keypoints: &[Keypoint]) -> Result<(), CoreError> {
    if keypoints.is_empty() {
        return Err(CoreError::Validation(
            "Custom keypoints must not be empty when provided".to_string(),
        ));
    }
    for (i, kp) in keypoints.iter().enumerate() {
        if kp.name.is_empty() {
            return Err(CoreError::Validation(format!(
                "Keypoint at index {i} must have a name"
            )));
        }
        if !(0.0..=1.0).contains(&kp.confidence) {
            return Err(CoreError::Validation(format!(
                "Keypoint '{}' has confidence {} outside 0.0..=1.0",
                kp.name, kp.confidence
            )));
        }
    }
    Ok(())
}
