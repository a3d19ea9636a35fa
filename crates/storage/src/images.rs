//! Filesystem-backed image storage.
//!
//! Uploads are written to the storage root as `<image_id>.<ext>`, with the
//! extension derived from the upload's content type; lookups scan for the
//! id prefix so callers never need to know the extension. Result images
//! produced by transformations live in a `results/` subdirectory keyed by
//! the owning job id, and are looked up the same way.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use image::ImageFormat;

use posewarp_core::collaborators::{ImageMetadata, ImageStorage, StoredImage};
use posewarp_core::error::CoreError;
use posewarp_core::job::{generate_id, IMAGE_ID_PREFIX};

const RESULTS_DIR: &str = "results";

/// Image storage rooted at a local directory.
pub struct FsImageStorage {
    root: PathBuf,
}

impl FsImageStorage {
    /// Open storage at `root`, creating the directory tree if needed.
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self, CoreError> {
        let root = root.into();
        tokio::fs::create_dir_all(root.join(RESULTS_DIR))
            .await
            .map_err(|e| {
                CoreError::Internal(format!(
                    "Failed to initialize image storage at {}: {e}",
                    root.display()
                ))
            })?;
        Ok(Self { root })
    }

    /// Map an upload content type to the extension the file is stored under.
    fn extension_for(content_type: Option<&str>) -> &'static str {
        match content_type.map(str::to_ascii_lowercase).as_deref() {
            Some("image/png") => "png",
            Some("image/webp") => "webp",
            _ => "jpg",
        }
    }

    /// Locate the stored file for an id by scanning for the `<id>.` prefix.
    /// Uploads live in the root, result images under `results/`.
    async fn find_file(&self, image_id: &str) -> Option<PathBuf> {
        for dir in [self.root.clone(), self.root.join(RESULTS_DIR)] {
            if let Some(path) = Self::scan_dir(&dir, image_id).await {
                return Some(path);
            }
        }
        None
    }

    async fn scan_dir(dir: &Path, image_id: &str) -> Option<PathBuf> {
        let prefix = format!("{image_id}.");
        let mut entries = tokio::fs::read_dir(dir).await.ok()?;
        while let Ok(Some(entry)) = entries.next_entry().await {
            if entry
                .file_name()
                .to_string_lossy()
                .starts_with(&prefix)
            {
                return Some(entry.path());
            }
        }
        None
    }

    fn io_error(context: &str, e: std::io::Error) -> CoreError {
        CoreError::Internal(format!("{context}: {e}"))
    }
}

#[async_trait]
impl ImageStorage for FsImageStorage {
    async fn image_exists(&self, image_id: &str) -> bool {
        self.find_file(image_id).await.is_some()
    }

    async fn image_data(&self, image_id: &str) -> Result<Vec<u8>, CoreError> {
        let path = self
            .find_file(image_id)
            .await
            .ok_or_else(|| CoreError::not_found("Image", image_id))?;
        tokio::fs::read(&path)
            .await
            .map_err(|e| Self::io_error("Failed to read image file", e))
    }

    async fn image_metadata(&self, image_id: &str) -> Result<ImageMetadata, CoreError> {
        let bytes = self.image_data(image_id).await?;
        let file_size = bytes.len() as u64;

        let reader = image::ImageReader::new(Cursor::new(&bytes))
            .with_guessed_format()
            .map_err(|e| Self::io_error("Failed to probe image format", e))?;
        let format = reader
            .format()
            .ok_or_else(|| CoreError::Internal(format!("Unrecognized image format: {image_id}")))?;
        let (width, height) = reader
            .into_dimensions()
            .map_err(|e| CoreError::Internal(format!("Failed to read image dimensions: {e}")))?;

        let format_name = match format {
            ImageFormat::Jpeg => "jpg",
            other => other.extensions_str().first().copied().unwrap_or("jpg"),
        };

        Ok(ImageMetadata {
            width,
            height,
            format: format_name.to_string(),
            file_size,
            content_type: format.to_mime_type().to_string(),
        })
    }

    async fn save_upload(
        &self,
        bytes: Vec<u8>,
        content_type: Option<&str>,
    ) -> Result<StoredImage, CoreError> {
        let id = generate_id(IMAGE_ID_PREFIX);
        let extension = Self::extension_for(content_type);
        let path = self.root.join(format!("{id}.{extension}"));

        tokio::fs::write(&path, &bytes)
            .await
            .map_err(|e| Self::io_error("Failed to store uploaded image", e))?;

        tracing::info!(image_id = %id, size = bytes.len(), "Image uploaded");
        Ok(StoredImage {
            url: self.image_url(&id),
            id,
        })
    }

    async fn save_result_image(
        &self,
        bytes: Vec<u8>,
        job_id: &str,
        content_type: &str,
    ) -> Result<String, CoreError> {
        let extension = Self::extension_for(Some(content_type));
        let path = self
            .root
            .join(RESULTS_DIR)
            .join(format!("{job_id}.{extension}"));

        tokio::fs::write(&path, &bytes)
            .await
            .map_err(|e| Self::io_error("Failed to store result image", e))?;

        tracing::debug!(job_id = %job_id, size = bytes.len(), "Result image stored");
        Ok(format!("/api/v1/results/{job_id}"))
    }

    async fn generate_thumbnail(
        &self,
        image_id: &str,
        width: u32,
        height: u32,
    ) -> Result<String, CoreError> {
        // Thumbnails are served by resizing on request; the URL just carries
        // the requested dimensions.
        Ok(format!(
            "{}?width={width}&height={height}",
            self.image_url(image_id)
        ))
    }

    async fn delete_image(&self, image_id: &str) -> bool {
        match self.find_file(image_id).await {
            Some(path) => tokio::fs::remove_file(&path).await.is_ok(),
            None => false,
        }
    }

    fn image_url(&self, image_id: &str) -> String {
        format!("/api/v1/images/{image_id}")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
