//! Session aggregator
//!
//! Pull-based, synchronous, single-owner: each frame is fully processed
//! (EAR -> gaze -> blink machine -> accumulators) before the next is
//! accepted. Concurrent sessions use independent aggregator instances.

use crate::frame::{EyeObservation, FrameSample, GazeSample};
use crate::report::{GazeDistribution, SessionReport};
use crate::running::RunningStats;
use crate::SessionError;
use blink_detector::{BlinkConfig, BlinkDetector, BlinkEvent};
use eye_metrics::{combined_ear, ear, GazeClassifier, GazeDirection};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Session configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Combined EAR below this value counts as eyes closed
    pub ear_threshold: f64,

    /// Closed frames required to confirm a blink
    pub consec_frames: u32,

    /// Lower gaze dead-zone bound on each normalized axis
    pub gaze_dead_zone_low: f64,

    /// Upper gaze dead-zone bound on each normalized axis
    pub gaze_dead_zone_high: f64,

    /// Capture device identifier, passed through to the report
    pub camera_id: u32,

    /// Retain blink events and per-frame gaze samples in the report
    pub record_events: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ear_threshold: 0.21,
            consec_frames: 2,
            gaze_dead_zone_low: 0.35,
            gaze_dead_zone_high: 0.65,
            camera_id: 0,
            record_events: false,
        }
    }
}

impl SessionConfig {
    /// Stricter blink confirmation (fewer false positives)
    pub fn strict() -> Self {
        Self {
            consec_frames: 3,
            ..Default::default()
        }
    }

    /// Looser blink confirmation (catches very short blinks)
    pub fn lenient() -> Self {
        Self {
            consec_frames: 1,
            ..Default::default()
        }
    }
}

/// Per-frame output for live consumers (UI meters, alerts)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSummary {
    pub timestamp: f64,
    pub left_ear: f64,
    pub right_ear: f64,
    pub combined_ear: f64,
    pub gaze: GazeDirection,
    pub is_blinking: bool,
    /// Present exactly when this frame confirmed a blink
    pub blink_event: Option<BlinkEvent>,
}

#[derive(Debug, Clone, Copy, Default)]
struct GazeCounts {
    center: u64,
    left: u64,
    right: u64,
    up: u64,
    down: u64,
}

impl GazeCounts {
    fn bump(&mut self, direction: GazeDirection) {
        match direction {
            GazeDirection::Center => self.center += 1,
            GazeDirection::Left => self.left += 1,
            GazeDirection::Right => self.right += 1,
            GazeDirection::Up => self.up += 1,
            GazeDirection::Down => self.down += 1,
        }
    }

    fn total(&self) -> u64 {
        self.center + self.left + self.right + self.up + self.down
    }

    fn distribution(&self) -> GazeDistribution {
        let total = self.total();
        if total == 0 {
            return GazeDistribution::default();
        }
        let pct = |count: u64| count as f64 / total as f64 * 100.0;
        GazeDistribution {
            center: pct(self.center),
            left: pct(self.left),
            right: pct(self.right),
            up: pct(self.up),
            down: pct(self.down),
        }
    }
}

/// Single-session statistics aggregator.
///
/// Created when a session opens, fed [`FrameSample`]s in non-decreasing
/// timestamp order, and consumed by [`finalize`](Self::finalize) when the
/// session closes.
#[derive(Debug, Clone)]
pub struct SessionAggregator {
    config: SessionConfig,
    gaze_classifier: GazeClassifier,
    blink: BlinkDetector,

    left_stats: RunningStats,
    right_stats: RunningStats,
    combined_stats: RunningStats,
    gaze_counts: GazeCounts,

    total_frames: u64,
    frames_with_face: u64,

    start_timestamp: f64,
    last_timestamp: f64,

    blink_events: Vec<BlinkEvent>,
    gaze_events: Vec<GazeSample>,
}

impl SessionAggregator {
    /// Open a session at `start_timestamp` (seconds, same clock as frames).
    ///
    /// Fails with [`SessionError::Config`] on an invalid blink configuration
    /// and [`SessionError::Landmark`] on invalid gaze dead zones.
    pub fn new(config: SessionConfig, start_timestamp: f64) -> Result<Self, SessionError> {
        if !start_timestamp.is_finite() {
            return Err(SessionError::InvalidTimestamp(start_timestamp));
        }

        let blink = BlinkDetector::new(BlinkConfig::new(
            config.ear_threshold,
            config.consec_frames,
        )?)?;
        let gaze_classifier =
            GazeClassifier::new(config.gaze_dead_zone_low, config.gaze_dead_zone_high)?;

        info!(
            ear_threshold = config.ear_threshold,
            consec_frames = config.consec_frames,
            camera_id = config.camera_id,
            "session opened"
        );

        Ok(Self {
            config,
            gaze_classifier,
            blink,
            left_stats: RunningStats::new(),
            right_stats: RunningStats::new(),
            combined_stats: RunningStats::new(),
            gaze_counts: GazeCounts::default(),
            total_frames: 0,
            frames_with_face: 0,
            start_timestamp,
            last_timestamp: start_timestamp,
            blink_events: Vec::new(),
            gaze_events: Vec::new(),
        })
    }

    /// Process one frame.
    ///
    /// Returns `Ok(None)` for missing-face frames (counted toward
    /// `total_frames` only). Out-of-order frames are rejected without being
    /// counted. Frames with degenerate landmarks count toward both frame
    /// counters but contribute nothing to EAR/gaze/blink aggregation, and the
    /// landmark error is surfaced to the caller.
    pub fn process(&mut self, frame: &FrameSample) -> Result<Option<FrameSummary>, SessionError> {
        if !frame.timestamp.is_finite() {
            return Err(SessionError::InvalidTimestamp(frame.timestamp));
        }
        if frame.timestamp < self.last_timestamp {
            return Err(SessionError::OutOfOrder {
                last: self.last_timestamp,
                got: frame.timestamp,
            });
        }

        self.last_timestamp = frame.timestamp;
        self.total_frames += 1;

        if !frame.face_detected {
            debug!(timestamp = frame.timestamp, "no face in frame");
            return Ok(None);
        }
        self.frames_with_face += 1;

        let (left, right) = match (&frame.left_eye, &frame.right_eye) {
            (Some(left), Some(right)) => (left, right),
            _ => return Err(SessionError::MissingEyeData),
        };

        // Compute every fallible metric before touching the accumulators so
        // a rejected frame leaves the statistics untouched.
        let left_ear = ear(&left.landmarks)?;
        let right_ear = ear(&right.landmarks)?;
        let gaze = self.classify_gaze(left)?;

        let combined = combined_ear(left_ear, right_ear);

        self.left_stats.push(left_ear);
        self.right_stats.push(right_ear);
        self.combined_stats.push(combined);
        self.gaze_counts.bump(gaze);

        let blink_event = self.blink.update(combined, frame.timestamp);

        if self.config.record_events {
            if let Some(event) = blink_event {
                self.blink_events.push(event);
            }
            self.gaze_events.push(GazeSample {
                timestamp: frame.timestamp,
                direction: gaze,
            });
        }

        Ok(Some(FrameSummary {
            timestamp: frame.timestamp,
            left_ear,
            right_ear,
            combined_ear: combined,
            gaze,
            is_blinking: self.blink.is_blinking() || blink_event.is_some(),
            blink_event,
        }))
    }

    /// The gaze histogram tracks one sample per frame, classified from the
    /// left eye, so the distribution sums over frames rather than eyes.
    fn classify_gaze(&self, eye: &EyeObservation) -> Result<GazeDirection, SessionError> {
        Ok(self.gaze_classifier.classify(eye.iris_center, &eye.bbox)?)
    }

    /// Running blink count
    pub fn blink_count(&self) -> u64 {
        self.blink.blink_count()
    }

    /// True while the eyes are currently closed
    pub fn is_blinking(&self) -> bool {
        self.blink.is_blinking()
    }

    /// Frames submitted so far
    pub fn total_frames(&self) -> u64 {
        self.total_frames
    }

    /// Close the session and freeze the statistics.
    ///
    /// Fails with [`SessionError::NoData`] when no usable face-detected frame
    /// was observed, rather than reporting NaN ratios.
    pub fn finalize(self) -> Result<SessionReport, SessionError> {
        if self.frames_with_face == 0 || self.combined_stats.is_empty() {
            return Err(SessionError::NoData);
        }

        let duration = self.last_timestamp - self.start_timestamp;
        let total_blinks = self.blink.blink_count();
        let blink_rate_per_minute = if duration > 0.0 {
            total_blinks as f64 / (duration / 60.0)
        } else {
            0.0
        };

        info!(
            duration,
            total_blinks,
            total_frames = self.total_frames,
            frames_with_face = self.frames_with_face,
            "session finalized"
        );

        Ok(SessionReport {
            duration_seconds: duration,
            total_blinks,
            blink_rate_per_minute,
            left_eye_ear: self.left_stats.summary(),
            right_eye_ear: self.right_stats.summary(),
            average_ear: self.combined_stats.summary(),
            gaze_distribution: self.gaze_counts.distribution(),
            total_frames: self.total_frames,
            frames_with_face: self.frames_with_face,
            detection_rate: self.frames_with_face as f64 / self.total_frames as f64,
            blink_events: self.config.record_events.then_some(self.blink_events),
            gaze_events: self.config.record_events.then_some(self.gaze_events),
            camera_id: self.config.camera_id,
            ear_threshold: self.config.ear_threshold,
        })
    }
}
