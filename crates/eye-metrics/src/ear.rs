//! Eye Aspect Ratio computation
//!
//! The 6-point contour follows the usual ordering: p1/p4 are the horizontal
//! corners, p2/p3 the upper lid, p5/p6 the lower lid. Fully open eyes land
//! around 0.25-0.35, fully closed around 0.05-0.15.

use crate::geometry::Point2;
use crate::LandmarkError;
use serde::{Deserialize, Serialize};

/// Minimum horizontal corner distance before EAR is considered undefined
pub const EAR_EPSILON: f64 = 1e-6;

/// The 6 ordered eye-contour landmarks for one eye
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EyeLandmarks(pub [Point2; 6]);

impl EyeLandmarks {
    pub fn new(points: [Point2; 6]) -> Self {
        Self(points)
    }

    pub fn points(&self) -> &[Point2; 6] {
        &self.0
    }
}

/// Compute the Eye Aspect Ratio for one eye.
///
/// `EAR = (dist(p2,p6) + dist(p3,p5)) / (2 * dist(p1,p4))`
///
/// Returns [`LandmarkError::DegenerateEye`] instead of dividing by a
/// near-zero horizontal distance, and [`LandmarkError::NonFinite`] if any
/// coordinate is NaN or infinite. The result is always >= 0.
pub fn ear(landmarks: &EyeLandmarks) -> Result<f64, LandmarkError> {
    let p = landmarks.points();

    if p.iter().any(|pt| !pt.is_finite()) {
        return Err(LandmarkError::NonFinite {
            field: "eye_landmarks",
        });
    }

    let horizontal = p[0].dist(&p[3]);
    if horizontal < EAR_EPSILON {
        return Err(LandmarkError::DegenerateEye {
            distance: horizontal,
        });
    }

    let vertical_a = p[1].dist(&p[5]);
    let vertical_b = p[2].dist(&p[4]);

    Ok((vertical_a + vertical_b) / (2.0 * horizontal))
}

/// Combined openness: average of the left and right EAR values
pub fn combined_ear(left: f64, right: f64) -> f64 {
    (left + right) / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Synthetic eye: width 1.0, lids at +/- half `openness`
    fn synthetic_eye(openness: f64) -> EyeLandmarks {
        let h = openness / 2.0;
        EyeLandmarks::new([
            Point2::new(0.0, 0.0),  // p1 left corner
            Point2::new(0.3, h),    // p2 upper lid
            Point2::new(0.7, h),    // p3 upper lid
            Point2::new(1.0, 0.0),  // p4 right corner
            Point2::new(0.7, -h),   // p5 lower lid
            Point2::new(0.3, -h),   // p6 lower lid
        ])
    }

    #[test]
    fn test_open_eye_in_expected_band() {
        let value = ear(&synthetic_eye(0.30)).unwrap();
        assert!((0.25..=0.4).contains(&value), "EAR {value}");
    }

    #[test]
    fn test_closed_eye_below_blink_threshold() {
        let value = ear(&synthetic_eye(0.06)).unwrap();
        assert!(value < 0.21, "EAR {value}");
    }

    #[test]
    fn test_exact_formula() {
        // Vertical distances are exactly `openness` for the synthetic eye,
        // so EAR = (o + o) / (2 * 1.0) = o.
        let value = ear(&synthetic_eye(0.28)).unwrap();
        assert!((value - 0.28).abs() < 1e-12);
    }

    #[test]
    fn test_degenerate_horizontal_distance() {
        let p = Point2::new(0.5, 0.5);
        let landmarks = EyeLandmarks::new([p; 6]);
        match ear(&landmarks) {
            Err(LandmarkError::DegenerateEye { distance }) => assert!(distance < EAR_EPSILON),
            other => panic!("expected DegenerateEye, got {other:?}"),
        }
    }

    #[test]
    fn test_non_finite_coordinate_rejected() {
        let mut points = *synthetic_eye(0.3).points();
        points[2] = Point2::new(f64::NAN, 0.1);
        assert!(matches!(
            ear(&EyeLandmarks::new(points)),
            Err(LandmarkError::NonFinite { .. })
        ));
    }

    #[test]
    fn test_ear_never_negative() {
        for openness in [0.0, 0.05, 0.12, 0.3, 0.5] {
            let value = ear(&synthetic_eye(openness)).unwrap();
            assert!(value >= 0.0);
        }
    }

    #[test]
    fn test_combined_ear_is_average() {
        assert!((combined_ear(0.2, 0.3) - 0.25).abs() < 1e-12);
    }
}
