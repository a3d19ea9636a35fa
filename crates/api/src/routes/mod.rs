pub mod exports;
pub mod health;
pub mod images;
pub mod poses;
pub mod templates;
pub mod transformations;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /images/upload                   upload photo (POST, multipart)
/// /images/{id}                     serve, delete
/// /results/{id}                    serve transformation result image
///
/// /poses/detect                    submit detection (POST)
/// /poses/detect/{id}               poll (GET), cancel (DELETE)
///
/// /templates                       list (category/page/limit query)
/// /templates/{id}                  template detail
///
/// /transformations                 submit (POST)
/// /transformations/{id}            poll (GET), update keypoints (PUT),
///                                  cancel (DELETE)
///
/// /exports                         submit (POST)
/// /exports/{id}                    poll (GET), cancel (DELETE)
/// /exports/{id}/download           download link once completed (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/images", images::router())
        // Result images share the serving handler but live under /results.
        .route("/results/{id}", get(handlers::images::get_image))
        .nest("/poses", poses::router())
        .nest("/templates", templates::router())
        .nest("/transformations", transformations::router())
        .nest("/exports", exports::router())
}
