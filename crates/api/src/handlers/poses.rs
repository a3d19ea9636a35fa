//! Handlers for the `/poses/detect` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use posewarp_core::error::CoreError;
use posewarp_core::job::Job;

use crate::error::AppResult;
use crate::response::{CancelledResponse, DataResponse};
use crate::state::AppState;

/// Request body for POST /poses/detect.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectRequest {
    pub image_id: String,
}

/// POST /api/v1/poses/detect
///
/// Submit a detection job for a stored image. Returns 202 with the fresh
/// `processing` job record; clients poll for the outcome.
pub async fn submit_detection(
    State(state): State<AppState>,
    Json(request): Json<DetectRequest>,
) -> AppResult<impl IntoResponse> {
    let job = state.detections.submit(&request.image_id).await?;

    tracing::info!(job_id = %job.id, image_id = %request.image_id, "Detection submitted");
    Ok((StatusCode::ACCEPTED, Json(DataResponse { data: job })))
}

/// GET /api/v1/poses/detect/{id}
///
/// Poll a detection job. The record carries the keypoints and segments
/// once the job completed.
pub async fn get_detection(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<DataResponse<Job>>> {
    let job = state.detections.get(&id).await?;
    Ok(Json(DataResponse { data: job }))
}

/// DELETE /api/v1/poses/detect/{id}
///
/// Cancel a running detection. 404 for unknown ids, 409 once the job has
/// already finished.
pub async fn cancel_detection(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<DataResponse<CancelledResponse>>> {
    // Resolves the id first so unknown jobs surface as 404, not 409.
    state.detections.get(&id).await?;

    if !state.detections.cancel(&id).await {
        return Err(CoreError::State(format!("Detection {id} has already finished")).into());
    }

    Ok(Json(DataResponse {
        data: CancelledResponse { cancelled: true },
    }))
}
