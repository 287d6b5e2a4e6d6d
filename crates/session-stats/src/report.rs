//! Immutable session report
//!
//! Matches the persistence/API payload field-for-field. Pure value object;
//! serialization and storage happen in the embedding application.

use crate::frame::GazeSample;
use blink_detector::BlinkEvent;
use serde::{Deserialize, Serialize};

/// EAR summary statistics for one signal
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EarSummary {
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub max: f64,
}

/// Gaze direction percentages over categorized frames, summing to 100
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GazeDistribution {
    pub center: f64,
    pub left: f64,
    pub right: f64,
    pub up: f64,
    pub down: f64,
}

impl GazeDistribution {
    pub fn total(&self) -> f64 {
        self.center + self.left + self.right + self.up + self.down
    }
}

/// Finalized session statistics, frozen at session end
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionReport {
    /// Session length (seconds)
    pub duration_seconds: f64,

    /// Confirmed blink count
    pub total_blinks: u64,

    /// Blinks per minute over the session duration
    pub blink_rate_per_minute: f64,

    /// Left eye EAR statistics
    pub left_eye_ear: EarSummary,

    /// Right eye EAR statistics
    pub right_eye_ear: EarSummary,

    /// Combined (left/right averaged) EAR statistics
    pub average_ear: EarSummary,

    /// Gaze direction percentages
    pub gaze_distribution: GazeDistribution,

    /// Every submitted frame
    pub total_frames: u64,

    /// Frames where a face was detected
    pub frames_with_face: u64,

    /// frames_with_face / total_frames, in [0, 1]
    pub detection_rate: f64,

    /// Confirmed blink events, present when event logging was requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blink_events: Option<Vec<BlinkEvent>>,

    /// Per-frame gaze samples, present when event logging was requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gaze_events: Option<Vec<GazeSample>>,

    /// Capture device identifier (configuration passthrough)
    pub camera_id: u32,

    /// EAR threshold the session ran with (configuration passthrough)
    pub ear_threshold: f64,
}
