//! Route definitions for the `/transformations` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::transformations;
use crate::state::AppState;

/// Routes mounted at `/transformations`.
///
/// ```text
/// POST   /                -> submit_transformation
/// GET    /{id}            -> get_transformation
/// PUT    /{id}            -> update_transformation
/// DELETE /{id}            -> cancel_transformation
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(transformations::submit_transformation))
        .route(
            "/{id}",
            get(transformations::get_transformation)
                .put(transformations::update_transformation)
                .delete(transformations::cancel_transformation),
        )
}
