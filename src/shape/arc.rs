use std::f64::consts::FRAC_PI_2;
use crate::space::*;

/// A circular arc swept counter-clockwise from `p0` to `p1` about `center`.
/// The radius and the polar angles of both endpoints are derived once on
/// construction, as is the bounding box.
#[derive(Clone, Debug, PartialEq)]
pub struct Arc {
    pub center: Point,
    pub p0: Point,
    pub p1: Point,
    pub radius: f64,
    pub theta0: f64,
    pub theta1: f64,
    bounds: Bounds
}

impl Arc {
    pub fn new(center: Point, p0: Point, p1: Point) -> Arc {
        let radius = (p0 - center).magnitude();
        let theta0 = polar_angle(&(p0 - center));
        let theta1 = polar_angle(&(p1 - center));

        let mut arc = Arc {
            center, p0, p1, radius, theta0, theta1,
            bounds: Bounds::new(p0, p1)
        };

        // The box spans both endpoints plus every circle axis extremum that
        // falls inside the swept interval
        for quadrant in 0..4 {
            let theta = quadrant as f64 * FRAC_PI_2;
            if arc.contains_angle(theta) {
                arc.bounds = arc.bounds.point_union(&arc.axis_extremum(quadrant));
            }
        }

        arc
    }

    #[inline]
    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    /// The counter-clockwise angle traversed from `p0` to `p1`, in [0, 2π)
    #[inline]
    pub fn sweep(&self) -> f64 {
        (self.theta1 - self.theta0).rem_euclid(TAU)
    }

    /// Whether the polar angle `theta` falls inside the swept interval,
    /// endpoints included. Wrap-aware: a sweep may pass through angle zero.
    #[inline]
    pub fn contains_angle(&self, theta: f64) -> bool {
        (theta - self.theta0).rem_euclid(TAU) <= self.sweep()
    }

    // Point on the circle at angle `quadrant * π/2`, formed without
    // trigonometry so extrema land exactly on the box faces
    fn axis_extremum(&self, quadrant: u8) -> Point {
        let c = self.center;
        match quadrant {
            0 => Point::new(c.x + self.radius, c.y),
            1 => Point::new(c.x, c.y + self.radius),
            2 => Point::new(c.x - self.radius, c.y),
            _ => Point::new(c.x, c.y - self.radius)
        }
    }

    /// Squared distance from `q` to the arc, with the closest point on the
    /// arc. When the radial projection of `q` misses the swept interval the
    /// nearer endpoint wins.
    pub fn closest_squared(&self, q: &Point) -> (f64, Point) {
        let v = q - self.center;
        let len2 = v.magnitude2();
        if len2 == 0.0 {
            // Query at the center is equidistant from the whole arc
            return (self.radius * self.radius, self.p0);
        }
        if self.contains_angle(polar_angle(&v)) {
            let on_circle = self.center + v * (self.radius / len2.sqrt());
            return (q.distance2(on_circle), on_circle);
        }
        let d0 = q.distance2(self.p0);
        let d1 = q.distance2(self.p1);
        if d0 <= d1 { (d0, self.p0) } else { (d1, self.p1) }
    }

    /// True if the arc touches or crosses the box
    pub fn overlaps(&self, bbox: &Bounds) -> bool {
        if !self.bounds.overlaps(bbox) {
            return false;
        }
        if bbox.contains(self.p0) || bbox.contains(self.p1) {
            return true;
        }
        // With both endpoints outside, the arc can only reach the box
        // interior by crossing one of its edges
        (0..4).any(|i| self.crosses(bbox.corner(i), bbox.corner((i + 1) % 4)))
    }

    // Whether the edge from e0 to e1 intersects the circle within the swept
    // interval. Standard quadratic in the segment parameter.
    fn crosses(&self, e0: Point, e1: Point) -> bool {
        let d = e1 - e0;
        let m = e0 - self.center;
        let a = d.magnitude2();
        if a == 0.0 {
            return false;
        }
        let b = 2.0 * m.dot(d);
        let c = m.magnitude2() - self.radius * self.radius;
        let disc = b * b - 4.0 * a * c;
        if disc < 0.0 {
            return false;
        }
        let root = disc.sqrt();
        let candidates = [(-b - root) / (2.0 * a), (-b + root) / (2.0 * a)];
        candidates.iter().any(|&t| {
            t >= 0.0 && t <= 1.0 && {
                let hit = e0 + d * t;
                self.contains_angle(polar_angle(&(hit - self.center)))
            }
        })
    }

    /// Sample the arc into polyline vertices. Consecutive samples are at
    /// most `max_step` radians apart and their chords deviate from the
    /// circle by no more than `max_chord_error`. Always yields at least two
    /// samples.
    pub fn adaptive_sample(&self, max_step: f64, max_chord_error: f64) -> Vec<Point> {
        let mut step = max_step;
        if max_chord_error < self.radius {
            // Chord sagitta s = r (1 - cos(dt / 2))
            step = step.min(2.0 * (1.0 - max_chord_error / self.radius).acos());
        }
        let count = (self.sweep() / step).ceil().max(1.0) as usize;
        let dt = self.sweep() / count as f64;
        (0..=count).map(|i| {
            let theta = self.theta0 + dt * i as f64;
            Point::new(
                self.center.x + self.radius * theta.cos(),
                self.center.y + self.radius * theta.sin()
            )
        }).collect()
    }
}
