use std::sync::Arc;

use posewarp_core::collaborators::{ImageStorage, TemplateCatalog};
use posewarp_core::strategy::{PoseEstimator, PoseWarper};
use posewarp_engine::workflows::{DetectionWorkflow, ExportWorkflow, TransformationWorkflow};
use posewarp_engine::JobEngine;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// The job lifecycle engine shared by all workflows.
    pub engine: Arc<JobEngine>,
    /// Detection job workflow.
    pub detections: Arc<DetectionWorkflow>,
    /// Transformation job workflow.
    pub transformations: Arc<TransformationWorkflow>,
    /// Export job workflow.
    pub exports: Arc<ExportWorkflow>,
    /// Image persistence (uploads and transformation results).
    pub images: Arc<dyn ImageStorage>,
    /// Seeded pose template catalog.
    pub templates: Arc<dyn TemplateCatalog>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Wire a fresh engine and the three workflows over the given
    /// collaborators and strategies.
    pub fn new(
        config: ServerConfig,
        images: Arc<dyn ImageStorage>,
        templates: Arc<dyn TemplateCatalog>,
        estimator: Arc<dyn PoseEstimator>,
        warper: Arc<dyn PoseWarper>,
    ) -> Self {
        let engine = Arc::new(JobEngine::new());

        let detections = Arc::new(DetectionWorkflow::new(
            Arc::clone(&engine),
            Arc::clone(&images),
            Arc::clone(&estimator),
        ));
        let transformations = Arc::new(TransformationWorkflow::new(
            Arc::clone(&engine),
            Arc::clone(&images),
            Arc::clone(&templates),
            estimator,
            warper,
        ));
        let exports = Arc::new(ExportWorkflow::new(Arc::clone(&engine)));

        Self {
            engine,
            detections,
            transformations,
            exports,
            images,
            templates,
            config: Arc::new(config),
        }
    }
}
