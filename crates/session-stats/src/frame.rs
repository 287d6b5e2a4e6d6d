//! Per-frame input and event types

use eye_metrics::{EyeBbox, EyeLandmarks, GazeDirection, Point2};
use serde::{Deserialize, Serialize};

/// Everything the landmark backend supplies for one eye on one frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EyeObservation {
    /// 6 ordered eye-contour points
    pub landmarks: EyeLandmarks,
    /// Iris center point
    pub iris_center: Point2,
    /// Eye bounding box
    pub bbox: EyeBbox,
}

/// One frame of landmark data from the external detector.
///
/// Transient: consumed by the aggregator and discarded; nothing retains it
/// beyond one processing step unless event logging is enabled.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameSample {
    /// Monotonic timestamp (seconds)
    pub timestamp: f64,
    /// Whether the detector found a face in this frame
    pub face_detected: bool,
    /// Left eye data, present when `face_detected`
    pub left_eye: Option<EyeObservation>,
    /// Right eye data, present when `face_detected`
    pub right_eye: Option<EyeObservation>,
}

impl FrameSample {
    /// Frame with a detected face and both eye observations
    pub fn face(timestamp: f64, left_eye: EyeObservation, right_eye: EyeObservation) -> Self {
        Self {
            timestamp,
            face_detected: true,
            left_eye: Some(left_eye),
            right_eye: Some(right_eye),
        }
    }

    /// Frame where no face was detected
    pub fn no_face(timestamp: f64) -> Self {
        Self {
            timestamp,
            face_detected: false,
            left_eye: None,
            right_eye: None,
        }
    }
}

/// Per-frame gaze classification result
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GazeSample {
    /// Frame timestamp (seconds)
    pub timestamp: f64,
    /// Classified direction
    pub direction: GazeDirection,
}
