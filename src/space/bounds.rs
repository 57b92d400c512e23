use std::ops::Index;
use cgmath::{ BaseFloat, Point2, Vector2 };

/// Axis-aligned bounding box in the plane. An empty box is encoded with an
/// inverted extent (`min.x > max.x` or `min.y > max.y`); extending an empty
/// box with a point makes it valid.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Bounds2<S: BaseFloat> {
    pub min: Point2<S>,
    pub max: Point2<S>
}

/// Return one of the two corners
impl<S: BaseFloat> Index<u8> for Bounds2<S> {
    type Output = Point2<S>;
    #[inline]
    fn index(&self, index: u8) -> &Point2<S> {
        debug_assert!(index < 2);
        if index == 0 { &self.min } else { &self.max }
    }
}

impl<S: BaseFloat> Bounds2<S> {
    /// Create a new bounding box spanning two points
    #[inline]
    pub fn new(p0: Point2<S>, p1: Point2<S>) -> Bounds2<S> {
        Bounds2 {
            min: zip_points!(p0, p1, min),
            max: zip_points!(p0, p1, max),
        }
    }

    /// The empty box; any union makes it valid
    #[inline]
    pub fn none() -> Bounds2<S> {
        Bounds2 {
            min: Point2::new(S::max_value(), S::max_value()),
            max: Point2::new(S::min_value(), S::min_value())
        }
    }

    /// Get the ith corner of the bounding box, ordered counter-clockwise
    /// starting from min
    #[inline]
    pub fn corner(&self, i: u8) -> Point2<S> {
        Point2::new(
            self[if i == 1 || i == 2 { 1 } else { 0 }].x,
            self[if i & 2 > 0 { 1 } else { 0 }].y,
        )
    }

    /// Find the intersection between two bounding boxes
    #[inline]
    pub fn intersection(&self, with: &Self) -> Self {
        Bounds2 {
            min: zip_points!(self.min, with.min, max),
            max: zip_points!(self.max, with.max, min)
        }
    }

    /// Expand using another bounding box
    #[inline]
    pub fn union(&self, with: &Self) -> Self {
        Bounds2 {
            min: zip_points!(self.min, with.min, min),
            max: zip_points!(self.max, with.max, max)
        }
    }

    /// Expand using another point
    #[inline]
    pub fn point_union(&self, with: &Point2<S>) -> Self {
        Bounds2 {
            min: zip_points!(self.min, with, min),
            max: zip_points!(self.max, with, max)
        }
    }

    /// True if this instance overlaps with the given box. Boxes that share
    /// only an edge or a corner count as overlapping.
    #[inline]
    pub fn overlaps(&self, other: &Self) -> bool {
        all_coords_match!(self.min, other.max, |min, max| min <= max) &&
        all_coords_match!(other.min, self.max, |min, max| min <= max)
    }

    /// Return true if the point is within the given bounds (edges included)
    #[inline]
    pub fn contains(&self, p: Point2<S>) -> bool {
        all_coords_match!(self.min, p, |min, coord| min <= coord) &&
        all_coords_match!(p, self.max, |coord, max| coord <= max)
    }

    /// True for boxes with inverted extents
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y
    }

    /// Get the vector from the min point to the max point
    #[inline]
    pub fn diagonal(&self) -> Vector2<S> {
        self.max - self.min
    }

    /// Get the perimeter of the bounding box. Empty boxes have no perimeter.
    #[inline]
    pub fn perimeter(&self) -> S {
        let d = self.diagonal();
        let w = d.x.max(S::zero());
        let h = d.y.max(S::zero());
        (w + h) + (w + h)
    }

    /// Center point of the box
    #[inline]
    pub fn center(&self) -> Point2<S> {
        let half = S::from(0.5).unwrap();
        Point2::new(
            (self.min.x + self.max.x) * half,
            (self.min.y + self.max.y) * half,
        )
    }

    /// Half of the box extent along each axis
    #[inline]
    pub fn half_extents(&self) -> Vector2<S> {
        self.diagonal() * S::from(0.5).unwrap()
    }

    // Returns index of whichever axis is longest
    #[inline]
    pub fn maximum_extent(&self) -> usize {
        let d = self.diagonal();
        if d.x > d.y { 0 } else { 1 }
    }

    /// Squared distance from a point to the box; zero for contained points
    #[inline]
    pub fn distance_squared(&self, p: Point2<S>) -> S {
        let dx = (self.min.x - p.x).max(S::zero()).max(p.x - self.max.x);
        let dy = (self.min.y - p.y).max(S::zero()).max(p.y - self.max.y);
        dx * dx + dy * dy
    }
}

#[inline]
fn min<S: BaseFloat>(a: S, b: S) -> S {
    if a < b { a } else { b }
}

#[inline]
fn max<S: BaseFloat>(a: S, b: S) -> S {
    if a < b { b } else { a }
}

#[cfg(test)]
mod test {
    use crate::space::{Bounds, Point};

    #[test]
    fn union_and_perimeter() {
        let bounds = Bounds::none()
            .point_union(&Point::new(0.0, 0.0))
            .point_union(&Point::new(4.0, 2.0));
        assert_eq!(bounds.min, Point::new(0.0, 0.0));
        assert_eq!(bounds.max, Point::new(4.0, 2.0));
        assert_eq!(bounds.perimeter(), 12.0);
        assert_eq!(bounds.center(), Point::new(2.0, 1.0));
    }

    #[test]
    fn empty_boxes() {
        let none = Bounds::none();
        assert!(none.is_empty());
        assert_eq!(none.perimeter(), 0.0);
        assert!(!none.contains(Point::new(0.0, 0.0)));
    }

    #[test]
    fn overlap_includes_touching_edges() {
        let a = Bounds::new(Point::new(0.0, 0.0), Point::new(1.0, 1.0));
        let b = Bounds::new(Point::new(1.0, 0.0), Point::new(2.0, 1.0));
        let c = Bounds::new(Point::new(1.5, 0.0), Point::new(2.0, 1.0));
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn point_to_box_distance() {
        let bounds = Bounds::new(Point::new(0.0, 0.0), Point::new(2.0, 2.0));
        assert_eq!(bounds.distance_squared(Point::new(1.0, 1.0)), 0.0);
        assert_eq!(bounds.distance_squared(Point::new(5.0, 1.0)), 9.0);
        assert_eq!(bounds.distance_squared(Point::new(3.0, 4.0)), 5.0);
    }

    #[test]
    fn corners_wind_counter_clockwise() {
        let bounds = Bounds::new(Point::new(0.0, 0.0), Point::new(2.0, 1.0));
        assert_eq!(bounds.corner(0), Point::new(0.0, 0.0));
        assert_eq!(bounds.corner(1), Point::new(2.0, 0.0));
        assert_eq!(bounds.corner(2), Point::new(2.0, 1.0));
        assert_eq!(bounds.corner(3), Point::new(0.0, 1.0));
    }
}
