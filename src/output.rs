//! Plain-text visualization export.
//!
//! Writes `v x y z r g b` vertex lines and `l i j` polyline lines with
//! 1-based indices, the format the external viewers load. Arcs are sampled
//! into short chords; segments keep their two endpoints.

use std::io::{ Result, Write };

use crate::scene::Scene;
use crate::shape::Primitive;
use crate::space::Bounds;

/// Vertex color for segments
pub const SEGMENT_COLOR: [f64; 3] = [0.53, 0.81, 0.98];
/// Vertex color for arcs
pub const ARC_COLOR: [f64; 3] = [0.71, 0.49, 0.86];

/// Largest angle between consecutive arc samples
pub const MAX_ANGLE_STEP: f64 = std::f64::consts::PI / 32.0;
/// Largest deviation allowed between an arc and its sampled chords
pub const MAX_CHORD_ERROR: f64 = 1e-2;

/// Write every primitive in the scene as colored polylines
pub fn write_scene<W: Write>(out: &mut W, scene: &Scene) -> Result<()> {
    let mut index: u64 = 1;
    for primitive in scene.primitives() {
        match primitive {
            Primitive::Segment(seg) => {
                write_vertex(out, seg.p0.x, seg.p0.y, &SEGMENT_COLOR)?;
                write_vertex(out, seg.p1.x, seg.p1.y, &SEGMENT_COLOR)?;
                writeln!(out, "l {} {}", index, index + 1)?;
                index += 2;
            }
            Primitive::Arc(arc) => {
                let samples = arc.adaptive_sample(MAX_ANGLE_STEP, MAX_CHORD_ERROR);
                debug_assert!(samples.len() >= 2);
                for (i, p) in samples.iter().enumerate() {
                    write_vertex(out, p.x, p.y, &ARC_COLOR)?;
                    if i >= 1 {
                        writeln!(out, "l {} {}", index - 1, index)?;
                    }
                    index += 1;
                }
            }
        }
    }
    Ok(())
}

/// Write a box as an uncolored four-edge loop. Used for the scene bounds.
pub fn write_bounding_box<W: Write>(out: &mut W, bounds: &Bounds) -> Result<()> {
    write_box_loop(out, bounds, 1)?;
    Ok(())
}

/// Write the bounding box of every primitive as a quad loop
pub fn write_primitive_boxes<W: Write>(out: &mut W, scene: &Scene) -> Result<()> {
    let mut index: u64 = 1;
    for primitive in scene.primitives() {
        index = write_box_loop(out, primitive.bounds(), index)?;
    }
    Ok(())
}

#[inline]
fn write_vertex<W: Write>(out: &mut W, x: f64, y: f64, color: &[f64; 3]) -> Result<()> {
    writeln!(out, "v {} {} 0 {} {} {}", x, y, color[0], color[1], color[2])
}

// Emit one box as four vertices and four closing edges; returns the next
// free vertex index
fn write_box_loop<W: Write>(out: &mut W, bounds: &Bounds, index: u64) -> Result<u64> {
    for corner in 0..4 {
        let p = bounds.corner(corner);
        writeln!(out, "v {} {} 0", p.x, p.y)?;
    }
    for edge in 0..4 {
        writeln!(out, "l {} {}", index + edge, index + (edge + 1) % 4)?;
    }
    Ok(index + 4)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shape::{Arc, Segment};
    use crate::space::Point;

    fn sample_scene() -> Scene {
        Scene::build(vec![
            Primitive::Segment(Segment::new(
                Point::new(0.0, 0.0),
                Point::new(10.0, 0.0)
            )),
            Primitive::Arc(Arc::new(
                Point::new(0.0, 0.0),
                Point::new(2.0, 0.0),
                Point::new(0.0, 2.0)
            )),
        ])
    }

    #[test]
    fn listing_shape_and_colors() {
        let mut buffer = Vec::new();
        write_scene(&mut buffer, &sample_scene()).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        let vertices: Vec<&str> = text.lines().filter(|l| l.starts_with("v ")).collect();
        let lines: Vec<&str> = text.lines().filter(|l| l.starts_with("l ")).collect();

        // Two segment vertices plus at least two arc samples, each polyline
        // edge valid and 1-based
        assert!(vertices.len() >= 4);
        assert_eq!(lines.len(), vertices.len() - 2);
        for l in &lines {
            let mut parts = l.split_whitespace().skip(1);
            let i: u64 = parts.next().unwrap().parse().unwrap();
            let j: u64 = parts.next().unwrap().parse().unwrap();
            assert!(i >= 1 && j >= 1);
            assert!(i <= vertices.len() as u64 && j <= vertices.len() as u64);
        }

        // Scene order is leaf order, so just check both colors show up
        assert!(vertices.iter().any(|v| v.ends_with("0.53 0.81 0.98")));
        assert!(vertices.iter().any(|v| v.ends_with("0.71 0.49 0.86")));
    }

    #[test]
    fn arcs_always_sample_at_least_twice() {
        let arc = Arc::new(
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1e-7)
        );
        assert!(arc.adaptive_sample(MAX_ANGLE_STEP, MAX_CHORD_ERROR).len() >= 2);
    }

    #[test]
    fn box_loop_closes() {
        let mut buffer = Vec::new();
        let bounds = Bounds::new(Point::new(0.0, 0.0), Point::new(4.0, 4.0));
        write_bounding_box(&mut buffer, &bounds).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(text.lines().filter(|l| l.starts_with("v ")).count(), 4);
        assert_eq!(text.lines().filter(|l| l.starts_with("l ")).count(), 4);
        assert!(text.contains("l 4 1"));
    }
}
