//! Handlers for the `/transformations` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use posewarp_core::error::CoreError;
use posewarp_core::job::Job;
use posewarp_core::pose::Keypoint;

use crate::error::AppResult;
use crate::response::{CancelledResponse, DataResponse};
use crate::state::AppState;

/// Request body for POST /transformations.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransformationRequest {
    pub image_id: String,
    pub template_id: String,
    pub custom_keypoints: Option<Vec<Keypoint>>,
}

/// Request body for PUT /transformations/{id}.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTransformationRequest {
    pub custom_keypoints: Option<Vec<Keypoint>>,
}

/// POST /api/v1/transformations
///
/// Submit a transformation job warping an uploaded photo into a template
/// pose. Returns 202 with the fresh `processing` record.
pub async fn submit_transformation(
    State(state): State<AppState>,
    Json(request): Json<CreateTransformationRequest>,
) -> AppResult<impl IntoResponse> {
    let job = state
        .transformations
        .submit(
            &request.image_id,
            &request.template_id,
            request.custom_keypoints,
        )
        .await?;

    tracing::info!(
        job_id = %job.id,
        image_id = %request.image_id,
        template_id = %request.template_id,
        "Transformation submitted",
    );
    Ok((StatusCode::ACCEPTED, Json(DataResponse { data: job })))
}

/// GET /api/v1/transformations/{id}
pub async fn get_transformation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<DataResponse<Job>>> {
    let job = state.transformations.get(&id).await?;
    Ok(Json(DataResponse { data: job }))
}

/// PUT /api/v1/transformations/{id}
///
/// Replace the job's custom keypoints and restart it under the same id.
/// Allowed while the job is `processing` or `failed`; 409 otherwise.
pub async fn update_transformation(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateTransformationRequest>,
) -> AppResult<Json<DataResponse<Job>>> {
    let job = state
        .transformations
        .update(&id, request.custom_keypoints)
        .await?;

    tracing::info!(job_id = %id, "Transformation updated");
    Ok(Json(DataResponse { data: job }))
}

/// DELETE /api/v1/transformations/{id}
///
/// Cancel a running transformation. 404 for unknown ids, 409 once the job
/// has already finished.
pub async fn cancel_transformation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<DataResponse<CancelledResponse>>> {
    state.transformations.get(&id).await?;

    if !state.transformations.cancel(&id).await {
        return Err(CoreError::State(format!("Transformation {id} has already finished")).into());
    }

    Ok(Json(DataResponse {
        data: CancelledResponse { cancelled: true },
    }))
}
