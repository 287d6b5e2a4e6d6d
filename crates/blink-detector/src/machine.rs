//! Blink state machine

use crate::config::{BlinkConfig, BlinkConfigError};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A confirmed blink, immutable once emitted
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlinkEvent {
    /// Timestamp of the first below-threshold frame (seconds)
    pub start_timestamp: f64,
    /// Timestamp of the frame where the eyes reopened (seconds)
    pub end_timestamp: f64,
    /// Closure duration (seconds)
    pub duration: f64,
}

/// Current machine state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlinkState {
    /// Eyes open (combined EAR at or above threshold)
    Open,
    /// Eyes below threshold for `n` consecutive frames
    Closing(u32),
}

/// Per-session blink state machine.
///
/// Consumes the combined (left/right averaged) EAR per face-detected frame.
/// Frames without a face must not be fed here at all; the machine neither
/// advances nor resets on them.
#[derive(Debug, Clone)]
pub struct BlinkDetector {
    config: BlinkConfig,
    state: BlinkState,
    closure_start: f64,
    blink_count: u64,
    last_blink_at: Option<f64>,
}

impl BlinkDetector {
    /// Create a detector, rejecting invalid configuration up front.
    pub fn new(config: BlinkConfig) -> Result<Self, BlinkConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            state: BlinkState::Open,
            closure_start: 0.0,
            blink_count: 0,
            last_blink_at: None,
        })
    }

    /// Advance the machine with one frame's combined EAR.
    ///
    /// Returns a [`BlinkEvent`] exactly when a confirmed closure ends: the
    /// eyes stayed below threshold for at least `consec_frames` frames and
    /// have now reopened. Shorter dips are treated as noise and discarded.
    pub fn update(&mut self, ear: f64, timestamp: f64) -> Option<BlinkEvent> {
        let closed = ear < self.config.ear_threshold;

        match self.state {
            BlinkState::Open => {
                if closed {
                    self.state = BlinkState::Closing(1);
                    self.closure_start = timestamp;
                }
                None
            }
            BlinkState::Closing(n) => {
                if closed {
                    self.state = BlinkState::Closing(n.saturating_add(1));
                    return None;
                }

                self.state = BlinkState::Open;
                if n >= self.config.consec_frames {
                    self.blink_count += 1;
                    self.last_blink_at = Some(timestamp);
                    let event = BlinkEvent {
                        start_timestamp: self.closure_start,
                        end_timestamp: timestamp,
                        duration: timestamp - self.closure_start,
                    };
                    debug!(
                        count = self.blink_count,
                        duration = event.duration,
                        "blink confirmed"
                    );
                    Some(event)
                } else {
                    debug!(frames = n, "sub-threshold dip discarded as noise");
                    None
                }
            }
        }
    }

    /// Number of confirmed blinks so far
    pub fn blink_count(&self) -> u64 {
        self.blink_count
    }

    /// True while the eyes are in a (possibly unconfirmed) closure
    pub fn is_blinking(&self) -> bool {
        matches!(self.state, BlinkState::Closing(_))
    }

    /// Timestamp of the last confirmed blink, if any
    pub fn last_blink_at(&self) -> Option<f64> {
        self.last_blink_at
    }

    /// Current machine state
    pub fn state(&self) -> BlinkState {
        self.state
    }

    /// Configured EAR threshold
    pub fn ear_threshold(&self) -> f64 {
        self.config.ear_threshold
    }

    /// Reset to the initial state, dropping counters
    pub fn reset(&mut self) {
        self.state = BlinkState::Open;
        self.closure_start = 0.0;
        self.blink_count = 0;
        self.last_blink_at = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OPEN: f64 = 0.30;
    const CLOSED: f64 = 0.10;

    fn detector() -> BlinkDetector {
        BlinkDetector::new(BlinkConfig::default()).unwrap()
    }

    fn feed(detector: &mut BlinkDetector, ears: &[f64]) -> Vec<BlinkEvent> {
        ears.iter()
            .enumerate()
            .filter_map(|(i, &ear)| detector.update(ear, i as f64 * 0.1))
            .collect()
    }

    #[test]
    fn test_single_frame_dip_is_debounced() {
        let mut d = detector();
        let events = feed(&mut d, &[OPEN, OPEN, CLOSED, OPEN, OPEN]);
        assert!(events.is_empty());
        assert_eq!(d.blink_count(), 0);
    }

    #[test]
    fn test_two_frame_closure_counts_once() {
        let mut d = detector();
        let events = feed(&mut d, &[OPEN, CLOSED, CLOSED, OPEN, OPEN]);
        assert_eq!(events.len(), 1);
        assert_eq!(d.blink_count(), 1);
    }

    #[test]
    fn test_prolonged_closure_counts_once() {
        let mut d = detector();
        let ears = [OPEN, CLOSED, CLOSED, CLOSED, CLOSED, CLOSED, CLOSED, OPEN];
        let events = feed(&mut d, &ears);
        assert_eq!(events.len(), 1);
        assert_eq!(d.blink_count(), 1);
    }

    #[test]
    fn test_multiple_blinks() {
        let mut d = detector();
        let ears = [
            OPEN, CLOSED, CLOSED, OPEN, OPEN, CLOSED, CLOSED, CLOSED, OPEN, OPEN,
        ];
        let events = feed(&mut d, &ears);
        assert_eq!(events.len(), 2);
        assert_eq!(d.blink_count(), 2);
    }

    #[test]
    fn test_event_timestamps_span_closure() {
        let mut d = detector();
        assert!(d.update(OPEN, 0.0).is_none());
        assert!(d.update(CLOSED, 0.1).is_none());
        assert!(d.update(CLOSED, 0.2).is_none());
        let event = d.update(OPEN, 0.3).expect("blink event");
        assert!((event.start_timestamp - 0.1).abs() < 1e-12);
        assert!((event.end_timestamp - 0.3).abs() < 1e-12);
        assert!((event.duration - 0.2).abs() < 1e-12);
        assert_eq!(d.last_blink_at(), Some(0.3));
    }

    #[test]
    fn test_is_blinking_tracks_closure() {
        let mut d = detector();
        d.update(OPEN, 0.0);
        assert!(!d.is_blinking());
        d.update(CLOSED, 0.1);
        assert!(d.is_blinking());
        d.update(OPEN, 0.2);
        assert!(!d.is_blinking());
    }

    #[test]
    fn test_boundary_ear_is_open() {
        // EAR exactly at threshold means open (strict less-than)
        let mut d = detector();
        let events = feed(&mut d, &[OPEN, 0.21, 0.21, OPEN]);
        assert!(events.is_empty());
    }

    #[test]
    fn test_reset_clears_counters() {
        let mut d = detector();
        feed(&mut d, &[OPEN, CLOSED, CLOSED, OPEN]);
        assert_eq!(d.blink_count(), 1);
        d.reset();
        assert_eq!(d.blink_count(), 0);
        assert!(d.last_blink_at().is_none());
        assert!(!d.is_blinking());
    }

    #[test]
    fn test_custom_consec_frames() {
        let mut d = BlinkDetector::new(BlinkConfig::new(0.21, 3).unwrap()).unwrap();
        // 2-frame dip: below the 3-frame requirement
        let events = feed(&mut d, &[OPEN, CLOSED, CLOSED, OPEN]);
        assert!(events.is_empty());
        // 3-frame dip: confirmed
        let events = feed(&mut d, &[OPEN, CLOSED, CLOSED, CLOSED, OPEN]);
        assert_eq!(events.len(), 1);
    }
}
