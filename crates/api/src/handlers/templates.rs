//! Handlers for the `/templates` resource.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use posewarp_core::error::CoreError;
use posewarp_core::pose::PoseTemplate;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

const DEFAULT_PAGE: usize = 1;
const DEFAULT_LIMIT: usize = 20;

/// Query parameters for GET /templates.
#[derive(Debug, Deserialize)]
pub struct TemplateListQuery {
    pub category: Option<String>,
    pub page: Option<usize>,
    pub limit: Option<usize>,
}

/// Paginated template list payload.
#[derive(Debug, Serialize)]
pub struct TemplateList {
    pub templates: Vec<PoseTemplate>,
    pub total: usize,
    pub page: usize,
    pub limit: usize,
    pub pages: usize,
}

/// GET /api/v1/templates
///
/// List templates, optionally filtered by category, paginated 1-based.
pub async fn list_templates(
    State(state): State<AppState>,
    Query(query): Query<TemplateListQuery>,
) -> AppResult<Json<DataResponse<TemplateList>>> {
    let page = query.page.unwrap_or(DEFAULT_PAGE).max(1);
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT).max(1);
    let category = query.category.as_deref();

    let templates = state.templates.list(category, page, limit);
    let total = state.templates.count(category);
    let pages = total.div_ceil(limit);

    Ok(Json(DataResponse {
        data: TemplateList {
            templates,
            total,
            page,
            limit,
            pages,
        },
    }))
}

/// GET /api/v1/templates/{id}
pub async fn get_template(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<DataResponse<PoseTemplate>>> {
    let template = state
        .templates
        .get(&id)
        .ok_or_else(|| CoreError::not_found("Template", id))?;

    Ok(Json(DataResponse { data: template }))
}
