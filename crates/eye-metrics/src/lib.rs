//! Eye Metrics
//!
//! Pure per-frame geometry on externally supplied facial landmarks:
//! - EAR (Eye Aspect Ratio) openness metric from 6 eye-contour points
//! - Gaze direction classification from the iris center and eye bounding box
//!
//! No detection, no I/O. Landmark coordinates arrive from whatever face-mesh
//! backend the embedding application runs.

mod ear;
mod gaze;
mod geometry;

pub use ear::{combined_ear, ear, EyeLandmarks, EAR_EPSILON};
pub use gaze::{GazeClassifier, GazeDirection};
pub use geometry::{EyeBbox, Point2};

use thiserror::Error;

/// Errors for landmark-derived metrics
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LandmarkError {
    /// A coordinate is NaN or infinite
    #[error("non-finite landmark coordinate in {field}")]
    NonFinite { field: &'static str },

    /// Horizontal eye-corner distance is (near) zero, EAR undefined
    #[error("degenerate eye landmarks: horizontal corner distance {distance} below epsilon")]
    DegenerateEye { distance: f64 },

    /// Eye bounding box has (near) zero width or height
    #[error("degenerate eye bounding box: {width}x{height}")]
    DegenerateBbox { width: f64, height: f64 },

    /// Dead-zone thresholds outside (0, 1) or inverted
    #[error("invalid gaze dead zone [{low}, {high}]")]
    InvalidDeadZone { low: f64, high: f64 },
}
