//! Fatigue Mapping
//!
//! Consumes an externally trained drowsy/alert eye classifier as an opaque
//! collaborator and maps its output probability to a 5-level fatigue label
//! with an alert flag. The model itself (training, inference runtime) lives
//! outside this workspace.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fatigue mapping errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FatigueError {
    /// Probability outside [0, 1] or non-finite
    #[error("invalid drowsiness probability {0}")]
    InvalidProbability(f64),

    /// The external classifier failed to produce a prediction
    #[error("classifier prediction failed: {0}")]
    Prediction(String),
}

/// Binary class label emitted by the external classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrowsinessLabel {
    #[serde(rename = "drowsy")]
    Drowsy,
    #[serde(rename = "notdrowsy")]
    NotDrowsy,
}

/// Per-class probabilities from the classifier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassProbabilities {
    pub drowsy: f64,
    pub notdrowsy: f64,
}

/// Output contract of the external eye-region classifier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrowsinessPrediction {
    pub prediction: DrowsinessLabel,
    pub confidence: f64,
    pub probabilities: ClassProbabilities,
}

/// Pluggable classifier capability.
///
/// Input is a single encoded eye-region image; the implementation (remote
/// service, on-device model) is opaque to this crate.
pub trait DrowsinessClassifier {
    fn predict(&self, eye_region: &[u8]) -> Result<DrowsinessPrediction, FatigueError>;
}

/// 5-level fatigue label derived from the drowsiness probability
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FatigueLevel {
    Alert,
    Low,
    Moderate,
    High,
    Critical,
}

impl FatigueLevel {
    /// Map a drowsiness probability to a level via fixed bands:
    /// >= 0.8 Critical, >= 0.6 High, >= 0.4 Moderate, >= 0.2 Low, else Alert.
    pub fn from_probability(probability: f64) -> Result<Self, FatigueError> {
        if !probability.is_finite() || !(0.0..=1.0).contains(&probability) {
            return Err(FatigueError::InvalidProbability(probability));
        }
        Ok(match probability {
            p if p >= 0.8 => Self::Critical,
            p if p >= 0.6 => Self::High,
            p if p >= 0.4 => Self::Moderate,
            p if p >= 0.2 => Self::Low,
            _ => Self::Alert,
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Alert => "alert",
            Self::Low => "low",
            Self::Moderate => "moderate",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

/// Fatigue assessment derived from one classifier prediction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FatigueAssessment {
    pub level: FatigueLevel,
    pub drowsy_probability: f64,
    /// True when the drowsiness probability reaches the alert band (>= 0.6)
    pub alert_triggered: bool,
}

impl FatigueAssessment {
    /// Alert-band threshold
    pub const ALERT_THRESHOLD: f64 = 0.6;

    pub fn from_prediction(prediction: &DrowsinessPrediction) -> Result<Self, FatigueError> {
        let probability = prediction.probabilities.drowsy;
        Ok(Self {
            level: FatigueLevel::from_probability(probability)?,
            drowsy_probability: probability,
            alert_triggered: probability >= Self::ALERT_THRESHOLD,
        })
    }
}
