//! Route definitions for the `/images` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::images;
use crate::state::AppState;

/// Routes mounted at `/images`.
///
/// ```text
/// POST   /upload          -> upload_image (multipart)
/// GET    /{id}            -> get_image
/// DELETE /{id}            -> delete_image
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/upload", post(images::upload_image))
        .route("/{id}", get(images::get_image).delete(images::delete_image))
}
