// Contains shortcuts for commonly used linear-algebra types used in the index
pub use cgmath::prelude::*;
use cgmath::{Point2, Vector2};

pub mod bounds;

pub type Point = Point2<f64>;
pub type Vector = Vector2<f64>;
pub type Bounds = bounds::Bounds2<f64>;

pub use std::f64::consts::TAU;

/// Polar angle of `v` about the origin, normalized into [0, 2π)
#[inline]
pub fn polar_angle(v: &Vector) -> f64 {
    v.y.atan2(v.x).rem_euclid(TAU)
}

#[inline]
pub fn lerp(t: f64, p0: f64, p1: f64) -> f64 {
    p0 * (1.0 - t) + p1 * t
}

#[cfg(test)]
mod test {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn polar_angle_quadrants() {
        assert_eq!(polar_angle(&Vector::new(1.0, 0.0)), 0.0);
        assert_eq!(polar_angle(&Vector::new(0.0, 2.0)), FRAC_PI_2);
        assert_eq!(polar_angle(&Vector::new(-3.0, 0.0)), PI);
        // Angles below the x-axis wrap into the upper half of the range
        assert_eq!(polar_angle(&Vector::new(0.0, -1.0)), 3.0 * FRAC_PI_2);
    }
}
