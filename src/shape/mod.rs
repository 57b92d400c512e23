pub mod arc;
pub mod segment;

pub use self::arc::Arc;
pub use self::segment::Segment;

use crate::space::{Bounds, Point};

/// A primitive placed in the 2D scene. Primitives are stored by value in the
/// scene's array and dispatched with a match, so iterating a leaf touches no
/// pointers.
#[derive(Clone, Debug, PartialEq)]
pub enum Primitive {
    Segment(Segment),
    Arc(Arc)
}

impl Primitive {
    /// The precomputed axis-aligned bounding box
    #[inline]
    pub fn bounds(&self) -> &Bounds {
        match self {
            Primitive::Segment(seg) => seg.bounds(),
            Primitive::Arc(arc) => arc.bounds()
        }
    }

    /// Box center, used for centroid partitioning during construction
    #[inline]
    pub fn centroid(&self) -> Point {
        self.bounds().center()
    }

    /// Squared distance from `q` to the primitive and the closest point on it
    #[inline]
    pub fn closest_squared(&self, q: &Point) -> (f64, Point) {
        match self {
            Primitive::Segment(seg) => seg.closest_squared(q),
            Primitive::Arc(arc) => arc.closest_squared(q)
        }
    }

    /// True if the primitive's geometry touches or crosses the box
    #[inline]
    pub fn overlaps(&self, bbox: &Bounds) -> bool {
        match self {
            Primitive::Segment(seg) => seg.overlaps(bbox),
            Primitive::Arc(arc) => arc.overlaps(bbox)
        }
    }

    #[inline]
    pub fn is_arc(&self) -> bool {
        match self {
            Primitive::Arc(_) => true,
            _ => false
        }
    }
}
