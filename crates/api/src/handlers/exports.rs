//! Handlers for the `/exports` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use posewarp_core::error::CoreError;
use posewarp_core::job::Job;

use crate::error::AppResult;
use crate::response::{CancelledResponse, DataResponse};
use crate::state::AppState;

/// Request body for POST /exports.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRequest {
    pub transformation_id: String,
    pub format: Option<String>,
    pub quality: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// Download link payload for completed exports.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadLink {
    pub download_url: String,
}

/// POST /api/v1/exports
///
/// Submit an export of a completed transformation. 409 while the
/// transformation has not completed. Returns 202 with the fresh record.
pub async fn submit_export(
    State(state): State<AppState>,
    Json(request): Json<ExportRequest>,
) -> AppResult<impl IntoResponse> {
    let job = state
        .exports
        .submit(
            &request.transformation_id,
            request.format,
            request.quality,
            request.width,
            request.height,
        )
        .await?;

    tracing::info!(
        job_id = %job.id,
        transformation_id = %request.transformation_id,
        "Export submitted",
    );
    Ok((StatusCode::ACCEPTED, Json(DataResponse { data: job })))
}

/// GET /api/v1/exports/{id}
pub async fn get_export(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<DataResponse<Job>>> {
    let job = state.exports.get(&id).await?;
    Ok(Json(DataResponse { data: job }))
}

/// DELETE /api/v1/exports/{id}
///
/// Cancel a running export. 404 for unknown ids, 409 once the job has
/// already finished.
pub async fn cancel_export(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<DataResponse<CancelledResponse>>> {
    state.exports.get(&id).await?;

    if !state.exports.cancel(&id).await {
        return Err(CoreError::State(format!("Export {id} has already finished")).into());
    }

    Ok(Json(DataResponse {
        data: CancelledResponse { cancelled: true },
    }))
}

/// GET /api/v1/exports/{id}/download
///
/// The download link for a completed export. 409 while the export is
/// still running (or failed).
pub async fn download_export(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<DataResponse<DownloadLink>>> {
    let download_url = state.exports.download_url(&id).await?;

    Ok(Json(DataResponse {
        data: DownloadLink { download_url },
    }))
}
