//! End-to-end integration tests for the detection, transformation, and
//! export job endpoints: submit, poll, update, cancel, download.

mod common;

use axum::http::StatusCode;
use common::{body_bytes, body_json, get, poll_until_terminal, post_json, put_json, upload_image_id};
use serde_json::json;

// ---------------------------------------------------------------------------
// Detection
// ---------------------------------------------------------------------------

// Test: upload then detect; the completed record carries all 17 keypoints.

#[tokio::test]
async fn detection_round_trip() {
    let (app, _dir) = common::build_test_app().await;
    let image_id = upload_image_id(&app).await;

    let response = post_json(
        app.clone(),
        "/api/v1/poses/detect",
        json!({ "imageId": image_id }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::ACCEPTED);

    let json = body_json(response).await;
    let job_id = json["data"]["id"].as_str().unwrap().to_string();
    assert!(job_id.starts_with("det_"));
    assert_eq!(json["data"]["status"], "processing");
    assert_eq!(json["data"]["imageId"], image_id);
    assert!(json["data"]["result"].is_null());

    let done = poll_until_terminal(&app, &format!("/api/v1/poses/detect/{job_id}")).await;
    assert_eq!(done["status"], "completed");
    assert!(done["completedAt"].is_string());

    let keypoints = done["result"]["keypoints"].as_array().unwrap();
    assert_eq!(keypoints.len(), 17);
    for kp in keypoints {
        let confidence = kp["confidence"].as_f64().unwrap();
        assert!((0.0..=1.0).contains(&confidence));
    }
    assert!(done["result"]["segments"]["body"].is_array());
}

// Test: detection of a missing image is 404 and leaves the store empty.

#[tokio::test]
async fn detection_of_missing_image_leaves_no_record() {
    let (app, _dir) = common::build_test_app().await;

    let response = post_json(
        app.clone(),
        "/api/v1/poses/detect",
        json!({ "imageId": "img_missing" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");

    // The job store stays empty (reported by the health endpoint).
    let health = body_json(get(app, "/health").await).await;
    assert_eq!(health["jobs"], 0);
}

// Test: polling an unknown detection id is 404.

#[tokio::test]
async fn unknown_detection_is_404() {
    let (app, _dir) = common::build_test_app().await;

    let response = get(app.clone(), "/api/v1/poses/detect/det_missing").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = common::delete(app, "/api/v1/poses/detect/det_missing").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// Test: a detection id is not served by the transformation endpoints.

#[tokio::test]
async fn kinds_are_not_interchangeable() {
    let (app, _dir) = common::build_test_app().await;
    let image_id = upload_image_id(&app).await;

    let response = post_json(
        app.clone(),
        "/api/v1/poses/detect",
        json!({ "imageId": image_id }),
    )
    .await;
    let job_id = body_json(response).await["data"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    let response = get(app.clone(), &format!("/api/v1/transformations/{job_id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = get(app, &format!("/api/v1/exports/{job_id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Transformation
// ---------------------------------------------------------------------------

// Test: transformation completes and its result image is servable.

#[tokio::test]
async fn transformation_round_trip() {
    let (app, _dir) = common::build_test_app().await;
    let image_id = upload_image_id(&app).await;

    let response = post_json(
        app.clone(),
        "/api/v1/transformations",
        json!({ "imageId": image_id, "templateId": "tpl_standing_01" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::ACCEPTED);

    let json = body_json(response).await;
    let job_id = json["data"]["id"].as_str().unwrap().to_string();
    assert!(job_id.starts_with("trans_"));

    let done = poll_until_terminal(&app, &format!("/api/v1/transformations/{job_id}")).await;
    assert_eq!(done["status"], "completed");
    assert_eq!(
        done["result"]["resultUrl"],
        format!("/api/v1/results/{job_id}")
    );
    assert_eq!(done["result"]["width"], 8);
    assert_eq!(done["result"]["height"], 6);

    // The result URL serves the warped image.
    let result_url = done["result"]["resultUrl"].as_str().unwrap().to_string();
    let response = get(app, &result_url).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(!body_bytes(response).await.is_empty());
}

// Test: unknown template is 404 and leaves no record.

#[tokio::test]
async fn transformation_with_unknown_template_leaves_no_record() {
    let (app, _dir) = common::build_test_app().await;
    let image_id = upload_image_id(&app).await;

    let response = post_json(
        app.clone(),
        "/api/v1/transformations",
        json!({ "imageId": image_id, "templateId": "tpl_unknown" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let health = body_json(get(app, "/health").await).await;
    assert_eq!(health["jobs"], 0);
}

// Test: invalid custom keypoints are 400.

#[tokio::test]
async fn transformation_with_invalid_keypoints_is_400() {
    let (app, _dir) = common::build_test_app().await;
    let image_id = upload_image_id(&app).await;

    let response = post_json(
        app,
        "/api/v1/transformations",
        json!({
            "imageId": image_id,
            "templateId": "tpl_standing_01",
            "customKeypoints": [
                { "name": "nose", "x": 1.0, "y": 1.0, "confidence": 1.5 }
            ]
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

// Test: updating a completed transformation is 409.

#[tokio::test]
async fn update_completed_transformation_is_409() {
    let (app, _dir) = common::build_test_app().await;
    let image_id = upload_image_id(&app).await;

    let response = post_json(
        app.clone(),
        "/api/v1/transformations",
        json!({ "imageId": image_id, "templateId": "tpl_standing_01" }),
    )
    .await;
    let job_id = body_json(response).await["data"]["id"]
        .as_str()
        .unwrap()
        .to_string();
    poll_until_terminal(&app, &format!("/api/v1/transformations/{job_id}")).await;

    let response = put_json(
        app.clone(),
        &format!("/api/v1/transformations/{job_id}"),
        json!({ "customKeypoints": null }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["code"], "INVALID_STATE");

    // Cancelling it now is also rejected.
    let response = common::delete(app, &format!("/api/v1/transformations/{job_id}")).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

// ---------------------------------------------------------------------------
// Export
// ---------------------------------------------------------------------------

// Test: full export flow with defaulted options, then the download link.

#[tokio::test]
async fn export_round_trip() {
    let (app, _dir) = common::build_test_app().await;
    let image_id = upload_image_id(&app).await;

    let response = post_json(
        app.clone(),
        "/api/v1/transformations",
        json!({ "imageId": image_id, "templateId": "tpl_standing_01" }),
    )
    .await;
    let transformation_id = body_json(response).await["data"]["id"]
        .as_str()
        .unwrap()
        .to_string();
    poll_until_terminal(&app, &format!("/api/v1/transformations/{transformation_id}")).await;

    let response = post_json(
        app.clone(),
        "/api/v1/exports",
        json!({ "transformationId": transformation_id }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::ACCEPTED);
    let export_id = body_json(response).await["data"]["id"]
        .as_str()
        .unwrap()
        .to_string();
    assert!(export_id.starts_with("exp_"));

    let done = poll_until_terminal(&app, &format!("/api/v1/exports/{export_id}")).await;
    assert_eq!(done["status"], "completed");
    assert_eq!(done["result"]["format"], "jpg");
    assert_eq!(done["result"]["quality"], "high");
    assert_eq!(done["result"]["fileSize"], 1024 * 1024);
    assert!(done["result"]["expiresAt"].is_string());

    let response = get(app, &format!("/api/v1/exports/{export_id}/download")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(
        json["data"]["downloadUrl"],
        format!("/api/v1/exports/{export_id}/download")
    );
}

// Test: exporting an unknown transformation is 404 with no record.

#[tokio::test]
async fn export_of_unknown_transformation_is_404() {
    let (app, _dir) = common::build_test_app().await;

    let response = post_json(
        app.clone(),
        "/api/v1/exports",
        json!({ "transformationId": "trans_missing" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let health = body_json(get(app, "/health").await).await;
    assert_eq!(health["jobs"], 0);
}

// Test: unsupported export format is 400.

#[tokio::test]
async fn export_with_unsupported_format_is_400() {
    let (app, _dir) = common::build_test_app().await;

    let response = post_json(
        app,
        "/api/v1/exports",
        json!({ "transformationId": "trans_1", "format": "bmp" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}
