//! Angular math and circle projection.

use crate::core::types::Point2D;
use std::f32::consts::PI;

/// Normalize angle to [-π, π].
#[inline]
pub fn normalize_angle(angle: f32) -> f32 {
    let mut a = angle % (2.0 * PI);
    if a > PI {
        a -= 2.0 * PI;
    } else if a < -PI {
        a += 2.0 * PI;
    }
    a
}

/// Shortest angular difference from angle `a` to angle `b`.
///
/// Returns the signed angle to add to `a` to reach `b`, taking the
/// shortest path around the circle.
#[inline]
pub fn angle_diff(a: f32, b: f32) -> f32 {
    normalize_angle(b - a)
}

/// Project an angle onto a circle in screen coordinates.
///
/// Screen convention: x grows right, y grows down, so a positive angle
/// sweeps counter-clockwise on screen (y component is negated).
#[inline]
pub fn circle_point(center: Point2D, radius: f32, angle: f32) -> Point2D {
    Point2D::new(
        center.x + radius * angle.cos(),
        center.y - radius * angle.sin(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_normalize_angle_identity() {
        assert_relative_eq!(normalize_angle(0.0), 0.0);
        assert_relative_eq!(normalize_angle(1.0), 1.0);
    }

    #[test]
    fn test_normalize_angle_wraps() {
        assert_relative_eq!(normalize_angle(2.0 * PI), 0.0, epsilon = 1e-6);
        assert_relative_eq!(normalize_angle(3.0 * PI), PI, epsilon = 1e-6);
        assert_relative_eq!(normalize_angle(-3.0 * PI), -PI, epsilon = 1e-6);
    }

    #[test]
    fn test_angle_diff_crossing_pi() {
        assert_relative_eq!(angle_diff(PI - 0.1, -PI + 0.1), 0.2, epsilon = 1e-6);
        assert_relative_eq!(angle_diff(-PI + 0.1, PI - 0.1), -0.2, epsilon = 1e-6);
    }

    #[test]
    fn test_circle_point_cardinal_angles() {
        let center = Point2D::new(400.0, 400.0);
        let p = circle_point(center, 100.0, 0.0);
        assert_relative_eq!(p.x, 500.0);
        assert_relative_eq!(p.y, 400.0);

        // Positive angle goes up on screen (y decreases)
        let p = circle_point(center, 100.0, FRAC_PI_2);
        assert_relative_eq!(p.x, 400.0, epsilon = 1e-4);
        assert_relative_eq!(p.y, 300.0, epsilon = 1e-4);
    }
}
