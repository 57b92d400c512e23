use crate::space::*;

/// A straight copper trace between two endpoints. The bounding box is
/// computed once on construction.
#[derive(Clone, Debug, PartialEq)]
pub struct Segment {
    pub p0: Point,
    pub p1: Point,
    bounds: Bounds
}

impl Segment {
    pub fn new(p0: Point, p1: Point) -> Segment {
        Segment { p0, p1, bounds: Bounds::new(p0, p1) }
    }

    #[inline]
    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    /// Squared distance from `q` to the segment, with the closest point on
    /// the segment. Degenerate segments collapse to their start point.
    pub fn closest_squared(&self, q: &Point) -> (f64, Point) {
        let v = self.p1 - self.p0;
        let len2 = v.magnitude2();
        if len2 == 0.0 {
            return (q.distance2(self.p0), self.p0);
        }
        let t = ((q - self.p0).dot(v) / len2).max(0.0).min(1.0);
        let closest = self.p0 + v * t;
        (q.distance2(closest), closest)
    }

    /// True if the segment touches or crosses the box
    pub fn overlaps(&self, bbox: &Bounds) -> bool {
        if !self.bounds.overlaps(bbox) {
            return false;
        }
        if bbox.contains(self.p0) || bbox.contains(self.p1) {
            return true;
        }
        self.clips(bbox)
    }

    // Clip the parametric segment against the box slabs; a non-empty
    // parameter interval means the segment passes through the box.
    fn clips(&self, bbox: &Bounds) -> bool {
        let d = self.p1 - self.p0;
        let (mut t0, mut t1) = (0.0_f64, 1.0_f64);
        for axis in 0..2 {
            let (origin, delta, min, max) = match axis {
                0 => (self.p0.x, d.x, bbox.min.x, bbox.max.x),
                _ => (self.p0.y, d.y, bbox.min.y, bbox.max.y)
            };
            if delta == 0.0 {
                if origin < min || origin > max {
                    return false;
                }
            } else {
                let inv = 1.0 / delta;
                let mut near = (min - origin) * inv;
                let mut far = (max - origin) * inv;
                if near > far {
                    std::mem::swap(&mut near, &mut far);
                }
                t0 = t0.max(near);
                t1 = t1.min(far);
                if t0 > t1 {
                    return false;
                }
            }
        }
        true
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn closest_projects_onto_interior() {
        let seg = Segment::new(Point::new(0.0, 0.0), Point::new(10.0, 0.0));
        let (dist2, closest) = seg.closest_squared(&Point::new(5.0, 3.0));
        assert_eq!(dist2, 9.0);
        assert_eq!(closest, Point::new(5.0, 0.0));
    }

    #[test]
    fn closest_clamps_to_endpoints() {
        let seg = Segment::new(Point::new(0.0, 0.0), Point::new(10.0, 0.0));
        let (dist2, closest) = seg.closest_squared(&Point::new(-4.0, 0.0));
        assert_eq!(dist2, 16.0);
        assert_eq!(closest, Point::new(0.0, 0.0));
    }

    #[test]
    fn closest_at_endpoint_is_zero() {
        let seg = Segment::new(Point::new(1.0, 2.0), Point::new(4.0, 6.0));
        let (dist2, closest) = seg.closest_squared(&Point::new(1.0, 2.0));
        assert_eq!(dist2, 0.0);
        assert_eq!(closest, Point::new(1.0, 2.0));
    }

    #[test]
    fn degenerate_segment_collapses() {
        let seg = Segment::new(Point::new(2.0, 2.0), Point::new(2.0, 2.0));
        let (dist2, closest) = seg.closest_squared(&Point::new(2.0, 5.0));
        assert_eq!(dist2, 9.0);
        assert_eq!(closest, Point::new(2.0, 2.0));
    }

    #[test]
    fn overlap_requires_an_actual_crossing() {
        // The segment's bbox overlaps the query box but its geometry doesn't
        let seg = Segment::new(Point::new(0.0, 0.0), Point::new(10.0, 10.0));
        let near_corner = Bounds::new(Point::new(6.0, 0.0), Point::new(10.0, 3.0));
        assert!(!seg.overlaps(&near_corner));

        let on_diagonal = Bounds::new(Point::new(4.0, 4.0), Point::new(6.0, 8.0));
        assert!(seg.overlaps(&on_diagonal));
    }

    #[test]
    fn overlap_counts_touching_edges() {
        let seg = Segment::new(Point::new(0.0, 0.0), Point::new(10.0, 0.0));
        // Box whose bottom edge exactly touches the segment
        let touching = Bounds::new(Point::new(2.0, 0.0), Point::new(3.0, 1.0));
        assert!(seg.overlaps(&touching));
        let above = Bounds::new(Point::new(2.0, 0.5), Point::new(3.0, 1.0));
        assert!(!seg.overlaps(&above));
    }

    #[test]
    fn axis_aligned_segment_through_box() {
        let seg = Segment::new(Point::new(-5.0, 1.0), Point::new(5.0, 1.0));
        let crossed = Bounds::new(Point::new(-1.0, 0.0), Point::new(1.0, 2.0));
        assert!(seg.overlaps(&crossed));
    }
}
