//! Route definitions for the `/poses` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::poses;
use crate::state::AppState;

/// Routes mounted at `/poses`.
///
/// ```text
/// POST   /detect          -> submit_detection
/// GET    /detect/{id}     -> get_detection
/// DELETE /detect/{id}     -> cancel_detection
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/detect", post(poses::submit_detection))
        .route(
            "/detect/{id}",
            get(poses::get_detection).delete(poses::cancel_detection),
        )
}
