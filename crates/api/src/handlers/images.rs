//! Handlers for the `/images` resource (and `/results/{id}` serving).

use axum::extract::{Multipart, Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use posewarp_core::error::CoreError;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Upload response payload.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageUploaded {
    pub image_id: String,
    pub url: String,
}

/// POST /api/v1/images/upload
///
/// Multipart upload of a source photo (field name `image`). Returns 201
/// with the generated `img_...` id and serving URL.
pub async fn upload_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let mut upload: Option<(Vec<u8>, Option<String>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Malformed multipart body: {e}")))?
    {
        if field.name() == Some("image") {
            let content_type = field.content_type().map(str::to_string);
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(format!("Failed to read upload: {e}")))?;
            upload = Some((bytes.to_vec(), content_type));
            break;
        }
    }

    let Some((bytes, content_type)) = upload else {
        return Err(AppError::BadRequest(
            "Multipart field 'image' is required".to_string(),
        ));
    };
    if bytes.is_empty() {
        return Err(AppError::BadRequest("Uploaded image is empty".to_string()));
    }

    let stored = state
        .images
        .save_upload(bytes, content_type.as_deref())
        .await?;

    tracing::info!(image_id = %stored.id, "Image uploaded");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: ImageUploaded {
                image_id: stored.id,
                url: stored.url,
            },
        }),
    ))
}

/// GET /api/v1/images/{id} (also mounted at /api/v1/results/{id})
///
/// Serve the stored image bytes with their detected content type.
pub async fn get_image(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let metadata = state.images.image_metadata(&id).await?;
    let bytes = state.images.image_data(&id).await?;

    Ok(([(header::CONTENT_TYPE, metadata.content_type)], bytes))
}

/// DELETE /api/v1/images/{id}
///
/// Remove a stored image. 204 on success, 404 if the id is unknown.
pub async fn delete_image(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    if !state.images.delete_image(&id).await {
        return Err(CoreError::not_found("Image", id).into());
    }

    tracing::info!(image_id = %id, "Image deleted");
    Ok(StatusCode::NO_CONTENT)
}
