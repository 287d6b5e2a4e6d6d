//! Blink detection configuration

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Invalid blink configuration, rejected before any session starts
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BlinkConfigError {
    /// EAR threshold must be a positive finite value
    #[error("EAR threshold {0} must be positive and finite")]
    InvalidThreshold(f64),

    /// At least one consecutive frame is required to confirm a closure
    #[error("consecutive frame count must be >= 1, got {0}")]
    InvalidConsecFrames(u32),
}

/// Blink detection configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlinkConfig {
    /// Combined EAR below this value counts as eyes closed
    pub ear_threshold: f64,

    /// Closed frames required before a closure is confirmed as a blink
    pub consec_frames: u32,
}

impl Default for BlinkConfig {
    fn default() -> Self {
        Self {
            ear_threshold: 0.21,
            consec_frames: 2,
        }
    }
}

impl BlinkConfig {
    pub fn new(ear_threshold: f64, consec_frames: u32) -> Result<Self, BlinkConfigError> {
        let config = Self {
            ear_threshold,
            consec_frames,
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject thresholds that would make the state machine meaningless
    pub fn validate(&self) -> Result<(), BlinkConfigError> {
        if !self.ear_threshold.is_finite() || self.ear_threshold <= 0.0 {
            return Err(BlinkConfigError::InvalidThreshold(self.ear_threshold));
        }
        if self.consec_frames < 1 {
            return Err(BlinkConfigError::InvalidConsecFrames(self.consec_frames));
        }
        Ok(())
    }
}
