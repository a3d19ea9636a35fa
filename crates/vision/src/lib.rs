//! Simulated pose estimation and warping.
//!
//! Stand-ins for the real MediaPipe-style models: the estimator places the
//! 17 COCO keypoints at fixed fractional positions of the image, the warper
//! re-encodes the input unchanged. Both are deterministic so the pipeline
//! around them can be exercised end to end.

pub mod estimator;
pub mod warper;

pub use estimator::SimulatedEstimator;
pub use warper::SimulatedWarper;
