//! Contracts for the external collaborators the job engine calls.
//!
//! The engine and its workflow adapters only ever see these traits; the
//! concrete filesystem/image implementations live in `posewarp-storage`.
//! Tests substitute in-memory fakes.

use async_trait::async_trait;

use crate::error::CoreError;
use crate::pose::PoseTemplate;

/// Basic metadata about a stored image, extracted at upload time.
#[derive(Debug, Clone)]
pub struct ImageMetadata {
    pub width: u32,
    pub height: u32,
    /// File format name (`"jpg"`, `"png"`, ...).
    pub format: String,
    pub file_size: u64,
    /// MIME type (`"image/jpeg"`, ...).
    pub content_type: String,
}

/// Handle to a stored upload.
#[derive(Debug, Clone)]
pub struct StoredImage {
    pub id: String,
    pub url: String,
}

/// Image persistence collaborator.
///
/// All operations are keyed by opaque image id. Lookup failures surface as
/// [`CoreError::NotFound`]; IO failures as [`CoreError::Internal`].
#[async_trait]
pub trait ImageStorage: Send + Sync {
    /// Whether an image with this id exists.
    async fn image_exists(&self, image_id: &str) -> bool;

    /// Raw bytes of a stored image.
    async fn image_data(&self, image_id: &str) -> Result<Vec<u8>, CoreError>;

    /// Dimensions, format, and size of a stored image.
    async fn image_metadata(&self, image_id: &str) -> Result<ImageMetadata, CoreError>;

    /// Store an uploaded image and return its generated id and URL.
    async fn save_upload(
        &self,
        bytes: Vec<u8>,
        content_type: Option<&str>,
    ) -> Result<StoredImage, CoreError>;

    /// Store a produced result image under the owning job's id; returns the
    /// public result URL.
    async fn save_result_image(
        &self,
        bytes: Vec<u8>,
        job_id: &str,
        content_type: &str,
    ) -> Result<String, CoreError>;

    /// Thumbnail URL for a result image at the requested dimensions.
    async fn generate_thumbnail(
        &self,
        image_id: &str,
        width: u32,
        height: u32,
    ) -> Result<String, CoreError>;

    /// Delete a stored image. Returns `false` if it did not exist.
    async fn delete_image(&self, image_id: &str) -> bool;

    /// Public URL for a stored image.
    fn image_url(&self, image_id: &str) -> String;
}

/// Pose template lookup collaborator. Read-only and synchronous (the
/// catalog is seeded in memory at startup).
pub trait TemplateCatalog: Send + Sync {
    /// Templates filtered by category, paginated 1-based.
    fn list(&self, category: Option<&str>, page: usize, limit: usize) -> Vec<PoseTemplate>;

    /// A template by id, or `None` if absent.
    fn get(&self, template_id: &str) -> Option<PoseTemplate>;

    /// Number of templates matching the category filter.
    fn count(&self, category: Option<&str>) -> usize;
}
