//! Route definitions for the `/exports` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::exports;
use crate::state::AppState;

/// Routes mounted at `/exports`.
///
/// ```text
/// POST   /                -> submit_export
/// GET    /{id}            -> get_export
/// DELETE /{id}            -> cancel_export
/// GET    /{id}/download   -> download_export
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(exports::submit_export))
        .route(
            "/{id}",
            get(exports::get_export).delete(exports::cancel_export),
        )
        .route("/{id}/download", get(exports::download_export))
}
