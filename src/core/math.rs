// Math utilities and helper functions

use glam::Vec2;
use rapier2d::prelude::{Real, Vector};

/// Scale factor that caps a drag of `magnitude` at `limit`.
///
/// The denominator is floored at `limit`, so the result is always in `(0, 1]`
/// for a positive limit, including a zero-length drag.
pub fn limit_ratio(magnitude: f32, limit: f32) -> f32 {
    limit / magnitude.max(limit)
}

/// Clamp the length of `offset` into `[0, limit]`, keeping its direction
pub fn clamp_magnitude(offset: Vec2, limit: f32) -> Vec2 {
    offset.clamp_length_max(limit)
}

/// Convert a glam vector into rapier's vector type
pub fn to_physics(v: Vec2) -> Vector<Real> {
    Vector::new(v.x, v.y)
}

/// Convert a rapier vector into a glam vector
pub fn from_physics(v: &Vector<Real>) -> Vec2 {
    Vec2::new(v.x, v.y)
}

/// Axis-aligned rectangle in screen space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            max: Vec2::new(x + width, y + height),
        }
    }

    /// Check if `point` lies inside, edges included
    pub fn contains(&self, point: Vec2) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }
}

/// Check if a value is usable as a strictly positive tuning constant
pub fn is_positive_finite(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_limit_ratio_caps_long_drags() {
        assert_relative_eq!(limit_ratio(10.0, 5.0), 0.5);
        assert_relative_eq!(limit_ratio(20.0, 5.0), 0.25);
    }

    #[test]
    fn test_limit_ratio_short_drag_is_one() {
        assert_relative_eq!(limit_ratio(2.0, 5.0), 1.0);
        assert_relative_eq!(limit_ratio(0.0, 5.0), 1.0);
    }

    #[test]
    fn test_limit_ratio_range() {
        for magnitude in [0.0, 0.001, 1.0, 4.99, 5.0, 5.01, 1e6] {
            let ratio = limit_ratio(magnitude, 5.0);
            assert!(ratio > 0.0 && ratio <= 1.0, "ratio {ratio} for {magnitude}");
            assert!(magnitude * ratio <= 5.0 + 1e-3);
        }
    }

    #[test]
    fn test_clamp_magnitude() {
        let clamped = clamp_magnitude(Vec2::new(30.0, 40.0), 10.0);
        assert_relative_eq!(clamped.length(), 10.0, epsilon = 1e-5);
        assert_relative_eq!(clamped.x, 6.0, epsilon = 1e-5);

        let short = clamp_magnitude(Vec2::new(1.0, 0.0), 10.0);
        assert_eq!(short, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn test_physics_conversion() {
        let v = Vec2::new(1.5, -2.0);
        assert_eq!(from_physics(&to_physics(v)), v);
    }

    #[test]
    fn test_rect_contains() {
        let rect = Rect::new(10.0, 10.0, 20.0, 5.0);
        assert!(rect.contains(Vec2::new(10.0, 10.0)));
        assert!(rect.contains(Vec2::new(30.0, 15.0)));
        assert!(!rect.contains(Vec2::new(31.0, 12.0)));
        assert!(!rect.contains(Vec2::new(15.0, 9.0)));
    }

    #[test]
    fn test_is_positive_finite() {
        assert!(is_positive_finite(0.1));
        assert!(!is_positive_finite(0.0));
        assert!(!is_positive_finite(-1.0));
        assert!(!is_positive_finite(f32::NAN));
        assert!(!is_positive_finite(f32::INFINITY));
    }
}
