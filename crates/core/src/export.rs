//! Export format/quality constants and validation.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Format constants
// ---------------------------------------------------------------------------

/// JPEG export.
pub const FORMAT_JPG: &str = "jpg";
/// PNG export.
pub const FORMAT_PNG: &str = "png";
/// WebP export.
pub const FORMAT_WEBP: &str = "webp";

/// All supported export formats.
pub const SUPPORTED_FORMATS: &[&str] = &[FORMAT_JPG, FORMAT_PNG, FORMAT_WEBP];

/// Format used when the request does not specify one.
pub const DEFAULT_FORMAT: &str = FORMAT_JPG;

// ---------------------------------------------------------------------------
// Quality constants
// ---------------------------------------------------------------------------

/// Low quality (smallest file).
pub const QUALITY_LOW: &str = "low";
/// Medium quality.
pub const QUALITY_MEDIUM: &str = "medium";
/// High quality (default).
pub const QUALITY_HIGH: &str = "high";

/// All supported export quality levels.
pub const SUPPORTED_QUALITIES: &[&str] = &[QUALITY_LOW, QUALITY_MEDIUM, QUALITY_HIGH];

/// Quality used when the request does not specify one.
pub const DEFAULT_QUALITY: &str = QUALITY_HIGH;

/// How long an export download link stays valid.
pub const EXPORT_TTL_SECS: i64 = 24 * 60 * 60;

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Caller-supplied export parameters, normalized to concrete values at
/// submission time (defaults applied, formats lowercased).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportOptions {
    pub format: String,
    pub quality: String,
    /// Target width; falls back to the transformation result width.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    /// Target height; falls back to the transformation result height.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

impl ExportOptions {
    /// Build options from optional request fields, applying defaults and
    /// validating the format/quality names.
    pub fn normalize(
        format: Option<String>,
        quality: Option<String>,
        width: Option<u32>,
        height: Option<u32>,
    ) -> Result<Self, CoreError> {
        let format = format
            .map(|f| f.to_lowercase())
            .unwrap_or_else(|| DEFAULT_FORMAT.to_string());
        validate_export_format(&format)?;

        let quality = quality
            .map(|q| q.to_lowercase())
            .unwrap_or_else(|| DEFAULT_QUALITY.to_string());
        validate_export_quality(&quality)?;

        Ok(Self {
            format,
            quality,
            width,
            height,
        })
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate that an export format is one of the supported formats.
pub fn validate_export_format(format: &str) -> Result<(), CoreError> {
    if SUPPORTED_FORMATS.contains(&format) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Unsupported export format: '{format}'. Supported: {}",
            SUPPORTED_FORMATS.join(", ")
        )))
    }
}

/// Validate that an export quality is one of the supported levels.
pub fn validate_export_quality(quality: &str) -> Result<(), CoreError> {
    if SUPPORTED_QUALITIES.contains(&quality) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Unsupported export quality: '{quality}'. Supported: {}",
            SUPPORTED_QUALITIES.join(", ")
        )))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
