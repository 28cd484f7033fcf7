//! Point and frame types shared between the session and its renderer.

use serde::{Deserialize, Serialize};

/// A 2D point in screen coordinates (pixels).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2D {
    /// X coordinate
    pub x: f32,
    /// Y coordinate
    pub y: f32,
}

impl Point2D {
    /// Create a new point.
    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Distance to another point.
    #[inline]
    pub fn distance(&self, other: &Point2D) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Role of a point within one tracking frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointRole {
    /// Ground-truth position of the rotating point
    Truth,
    /// Position derived from the raw noisy measurement
    Measured,
    /// A-priori estimate (after predict, before correct)
    Predicted,
    /// A-posteriori estimate (after correct)
    Corrected,
}

impl PointRole {
    /// Lowercase role name, used for column headers and labels.
    pub fn name(self) -> &'static str {
        match self {
            PointRole::Truth => "truth",
            PointRole::Measured => "measured",
            PointRole::Predicted => "predicted",
            PointRole::Corrected => "corrected",
        }
    }
}

/// One cycle's worth of tracked points, emitted to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackedFrame {
    /// Cycle number within the current run (resets to 0 on session reset)
    pub cycle: u64,
    /// Ground-truth point
    pub truth: Point2D,
    /// Point derived from the raw measurement
    pub measured: Point2D,
    /// A-priori estimated point
    pub predicted: Point2D,
    /// A-posteriori estimated point
    pub corrected: Point2D,
}

impl TrackedFrame {
    /// All points with their roles, truth first.
    pub fn points(&self) -> [(PointRole, Point2D); 4] {
        [
            (PointRole::Truth, self.truth),
            (PointRole::Measured, self.measured),
            (PointRole::Predicted, self.predicted),
            (PointRole::Corrected, self.corrected),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_point_distance() {
        let a = Point2D::new(0.0, 0.0);
        let b = Point2D::new(3.0, 4.0);
        assert_relative_eq!(a.distance(&b), 5.0);
    }

    #[test]
    fn test_frame_points_roles() {
        let frame = TrackedFrame {
            cycle: 1,
            truth: Point2D::new(1.0, 0.0),
            measured: Point2D::new(2.0, 0.0),
            predicted: Point2D::new(3.0, 0.0),
            corrected: Point2D::new(4.0, 0.0),
        };
        let points = frame.points();
        assert_eq!(points.len(), 4);
        assert_eq!(points[0].0, PointRole::Truth);
        assert_eq!(points[0].0.name(), "truth");
        assert_relative_eq!(points[1].1.x, 2.0);
    }
}
