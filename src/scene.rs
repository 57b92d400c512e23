use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Instant;

use tracing::debug;

use crate::accelerators::{builder, BuildConfig, Bvh};
use crate::error::{Error, QueryStatus, Result};
use crate::shape::Primitive;
use crate::space::{Bounds, Point};

pub mod description;

/// Owns the primitive collection and the index built over it. Once built a
/// scene never changes, so any number of threads may query it concurrently
/// through shared references.
pub struct Scene {
    primitives: Vec<Primitive>,
    bvh: Bvh,
    bounding_box: Bounds
}

impl Scene {
    /// Index the given primitives with the default build configuration
    pub fn build(primitives: Vec<Primitive>) -> Scene {
        Scene::build_with(primitives, &BuildConfig::default())
    }

    pub fn build_with(mut primitives: Vec<Primitive>, config: &BuildConfig) -> Scene {
        let start = Instant::now();
        let bvh = builder::build(&mut primitives, config);
        debug!(
            "bvh construction over {} primitives spent {:?}",
            primitives.len(),
            start.elapsed()
        );

        let bounding_box = match bvh.root() {
            Some(root) => square_bounds(&root.bounds),
            None => Bounds::none()
        };

        Scene { primitives, bvh, bounding_box }
    }

    /// Read a PCB description file and index its primitives
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Scene> {
        let file = File::open(path)?;
        let primitives = description::parse(
            BufReader::new(file),
            &description::Labels::default()
        )?;
        Ok(Scene::build(primitives))
    }

    /// The indexed primitives, arranged in leaf order
    #[inline]
    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    #[inline]
    pub fn bvh(&self) -> &Bvh {
        &self.bvh
    }

    /// The scene bounding box, grown about its center into a square so
    /// downstream spatial partitioning always gets equal sides. Contains
    /// every primitive; empty for an empty scene.
    #[inline]
    pub fn bounding_box(&self) -> &Bounds {
        &self.bounding_box
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    /// Unsigned distance from `q` to the nearest primitive, along with the
    /// closest point on it. Ties between equidistant primitives break
    /// arbitrarily.
    pub fn closest_point(&self, q: &Point) -> Result<(f64, Point)> {
        if self.primitives.is_empty() {
            return Err(Error::EmptyScene);
        }

        let primitives = &self.primitives;
        let mut best = std::f64::INFINITY;
        let mut closest = *q;

        // Leaves hold contiguous runs of the primitive array, so the
        // accessor walks it directly without indirection
        self.bvh.closest_point(q, |begin, end| {
            let mut leaf_min = std::f64::INFINITY;
            for primitive in &primitives[begin..end] {
                let (dist, point) = primitive.closest_squared(q);
                if dist < best {
                    best = dist;
                    closest = point;
                }
                leaf_min = leaf_min.min(dist);
            }
            leaf_min
        })?;

        Ok((best.sqrt(), closest))
    }

    /// Every primitive whose geometry touches `bbox`, in traversal order.
    /// An empty result is a valid answer and is flagged as such.
    pub fn collision_detection(&self, bbox: &Bounds) -> Result<(Vec<&Primitive>, QueryStatus)> {
        let primitives = &self.primitives;
        let mut hits: Vec<&Primitive> = Vec::new();

        self.bvh.intersect(bbox, |begin, end| {
            for primitive in &primitives[begin..end] {
                if primitive.overlaps(bbox) {
                    hits.push(primitive);
                }
            }
        })?;

        let status = if hits.is_empty() { QueryStatus::NoHits } else { QueryStatus::Hits };
        Ok((hits, status))
    }

    /// Collision query keyed by another primitive's bounding box. A
    /// primitive from the scene finds itself.
    pub fn collision_detection_with(
        &self,
        primitive: &Primitive
    ) -> Result<(Vec<&Primitive>, QueryStatus)> {
        self.collision_detection(primitive.bounds())
    }
}

// Grow the box about its center until both sides match the longer one. The
// final union guards against rounding pulling a face inside the original.
fn square_bounds(bounds: &Bounds) -> Bounds {
    let d = bounds.diagonal();
    let half = d.x.max(d.y) / 2.0;
    let center = bounds.center();
    let square = Bounds {
        min: Point::new(center.x - half, center.y - half),
        max: Point::new(center.x + half, center.y + half)
    };
    square.union(bounds)
}
