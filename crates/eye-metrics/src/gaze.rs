//! Gaze direction classification
//!
//! Classifies where an eye is looking from the iris center's normalized
//! position inside the eye bounding box. A symmetric dead zone around the
//! box center maps to `Center`; outside it, the axis with the larger
//! deviation from center decides the direction (horizontal wins exact ties).

use crate::geometry::{EyeBbox, Point2};
use crate::LandmarkError;
use serde::{Deserialize, Serialize};

/// Discrete gaze direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GazeDirection {
    #[default]
    Center,
    Left,
    Right,
    Up,
    Down,
}

/// Dead-zone gaze classifier, stateless per frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GazeClassifier {
    /// Lower dead-zone bound on each normalized axis
    dead_zone_low: f64,
    /// Upper dead-zone bound on each normalized axis
    dead_zone_high: f64,
}

impl Default for GazeClassifier {
    fn default() -> Self {
        Self {
            dead_zone_low: 0.35,
            dead_zone_high: 0.65,
        }
    }
}

impl GazeClassifier {
    /// Create a classifier with custom dead-zone bounds.
    ///
    /// Bounds must satisfy `0 < low < high < 1`.
    pub fn new(dead_zone_low: f64, dead_zone_high: f64) -> Result<Self, LandmarkError> {
        let valid = dead_zone_low.is_finite()
            && dead_zone_high.is_finite()
            && dead_zone_low > 0.0
            && dead_zone_high < 1.0
            && dead_zone_low < dead_zone_high;
        if !valid {
            return Err(LandmarkError::InvalidDeadZone {
                low: dead_zone_low,
                high: dead_zone_high,
            });
        }
        Ok(Self {
            dead_zone_low,
            dead_zone_high,
        })
    }

    /// Classify gaze from the iris center and the eye's bounding box.
    ///
    /// Offsets are normalized into [0,1] relative to the box; iris positions
    /// slightly outside the box (detector jitter) are clamped rather than
    /// rejected.
    pub fn classify(
        &self,
        iris_center: Point2,
        bbox: &EyeBbox,
    ) -> Result<GazeDirection, LandmarkError> {
        if !iris_center.is_finite() {
            return Err(LandmarkError::NonFinite {
                field: "iris_center",
            });
        }
        if !bbox.is_finite() {
            return Err(LandmarkError::NonFinite { field: "eye_bbox" });
        }
        if bbox.width < f64::EPSILON || bbox.height < f64::EPSILON {
            return Err(LandmarkError::DegenerateBbox {
                width: bbox.width,
                height: bbox.height,
            });
        }

        let nx = ((iris_center.x - bbox.x) / bbox.width).clamp(0.0, 1.0);
        let ny = ((iris_center.y - bbox.y) / bbox.height).clamp(0.0, 1.0);

        let x_in_zone = (self.dead_zone_low..=self.dead_zone_high).contains(&nx);
        let y_in_zone = (self.dead_zone_low..=self.dead_zone_high).contains(&ny);

        if x_in_zone && y_in_zone {
            return Ok(GazeDirection::Center);
        }

        // Diagonal tie-break: the axis further from center wins, with the
        // horizontal axis taking exact ties.
        let dx = (nx - 0.5).abs();
        let dy = (ny - 0.5).abs();

        let horizontal = || {
            if nx < 0.5 {
                GazeDirection::Left
            } else {
                GazeDirection::Right
            }
        };
        let vertical = || {
            if ny < 0.5 {
                GazeDirection::Up
            } else {
                GazeDirection::Down
            }
        };

        let direction = match (x_in_zone, y_in_zone) {
            (false, true) => horizontal(),
            (true, false) => vertical(),
            _ => {
                if dx >= dy {
                    horizontal()
                } else {
                    vertical()
                }
            }
        };

        Ok(direction)
    }
}
