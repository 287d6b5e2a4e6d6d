//! Session Statistics
//!
//! Online (single-pass) accumulation of per-frame ocular signals into
//! session-level statistics:
//! - per-eye and combined EAR mean/std/min/max (Welford, O(1) memory)
//! - confirmed blink count and rate per minute
//! - gaze direction distribution
//! - frame and face-detection counters
//!
//! One aggregator per session, single owner, fed frames in non-decreasing
//! timestamp order; finalization freezes everything into an immutable
//! [`SessionReport`] for the persistence layer.

mod aggregator;
mod frame;
mod report;
mod running;

pub use aggregator::{FrameSummary, SessionAggregator, SessionConfig};
pub use frame::{EyeObservation, FrameSample, GazeSample};
pub use report::{EarSummary, GazeDistribution, SessionReport};
pub use running::RunningStats;

use blink_detector::BlinkConfigError;
use eye_metrics::LandmarkError;
use thiserror::Error;

/// Session-level error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SessionError {
    /// Invalid blink configuration (fatal at construction)
    #[error(transparent)]
    Config(#[from] BlinkConfigError),

    /// Degenerate or non-finite landmark data on a frame
    #[error(transparent)]
    Landmark(#[from] LandmarkError),

    /// Frame timestamps must be monotonically non-decreasing
    #[error("frame timestamp {got} precedes previous timestamp {last}")]
    OutOfOrder { last: f64, got: f64 },

    /// Timestamp is NaN or infinite
    #[error("non-finite timestamp {0}")]
    InvalidTimestamp(f64),

    /// A face-detected frame arrived without eye observations
    #[error("face detected but eye observation data is missing")]
    MissingEyeData,

    /// Finalization with zero usable face-detected frames
    #[error("no face-detected frames were observed in this session")]
    NoData,
}
