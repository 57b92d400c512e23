//! Reading of the line-oriented PCB description format.
//!
//! Lines of the form `P<id>=(x, y)` and `C<id>=(x, y)` name ordinary points
//! and arc centers. Lines of the form `l<id>=<label>(...)` place primitives:
//! a segment references two points, an arc references a center and two
//! points. The labels are locale-specific strings matched as opaque bytes
//! against configured sentinels. Anything else in the file is ignored.

use std::collections::HashMap;
use std::io::BufRead;

use cgmath::prelude::*;

use crate::error::{Error, Result};
use crate::shape::{Arc, Primitive, Segment};
use crate::space::Point;

/// Sentinel strings identifying primitive kinds in the input
#[derive(Clone, Debug)]
pub struct Labels {
    pub segment: String,
    pub arc: String
}

impl Default for Labels {
    fn default() -> Labels {
        Labels {
            segment: "线段".to_string(),
            arc: "圆弧".to_string()
        }
    }
}

// Relative disagreement allowed between the radii implied by an arc's two
// endpoints
const RADIUS_TOLERANCE: f64 = 1e-6;

/// Parse a whole description. Any error abandons the parse; no partial
/// primitive list escapes.
pub fn parse<R: BufRead>(input: R, labels: &Labels) -> Result<Vec<Primitive>> {
    let mut points: HashMap<u64, Point> = HashMap::new();
    let mut centers: HashMap<u64, Point> = HashMap::new();
    let mut primitives = Vec::new();

    for (index, line) in input.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        let number = index + 1;

        if let Some((id, rest)) = leading_id(line, 'P') {
            points.insert(id, parse_point(rest, number)?);
        } else if let Some((id, rest)) = leading_id(line, 'C') {
            centers.insert(id, parse_point(rest, number)?);
        } else if let Some((_, rest)) = leading_id(line, 'l') {
            primitives.push(parse_primitive(rest, number, labels, &points, &centers)?);
        }
        // Unrecognized lines (headers, viewer state, blanks) are skipped
    }

    Ok(primitives)
}

/// Parse a description held in memory
pub fn parse_str(text: &str, labels: &Labels) -> Result<Vec<Primitive>> {
    parse(text.as_bytes(), labels)
}

// Split `P123=...` into the id and the text after '='. Returns None when the
// line does not open with `<prefix><digits>=`.
fn leading_id(line: &str, prefix: char) -> Option<(u64, &str)> {
    let rest = line.strip_prefix(prefix)?;
    let digits = rest.len() - rest.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits == 0 || !rest[digits..].starts_with('=') {
        return None;
    }
    let id = rest[..digits].parse().ok()?;
    Some((id, &rest[digits + 1..]))
}

fn malformed(line: usize, reason: &str) -> Error {
    Error::MalformedInput { line, reason: reason.to_string() }
}

// Extract `(x, y)` from the text after the equals sign
fn parse_point(text: &str, line: usize) -> Result<Point> {
    let open = text.find('(').ok_or_else(|| malformed(line, "expected '('"))?;
    let close = text.find(')').ok_or_else(|| malformed(line, "expected ')'"))?;
    if close < open {
        return Err(malformed(line, "mismatched parentheses"));
    }
    let body = &text[open + 1..close];
    let comma = body.find(',').ok_or_else(|| malformed(line, "expected ','"))?;

    let x = body[..comma].trim().parse::<f64>()
        .map_err(|_| malformed(line, "invalid x coordinate"))?;
    let y = body[comma + 1..].trim().parse::<f64>()
        .map_err(|_| malformed(line, "invalid y coordinate"))?;
    Ok(Point::new(x, y))
}

fn parse_primitive(
    text: &str,
    line: usize,
    labels: &Labels,
    points: &HashMap<u64, Point>,
    centers: &HashMap<u64, Point>
) -> Result<Primitive> {
    let open = text.find('(').ok_or_else(|| malformed(line, "expected '('"))?;
    let close = text.find(')').ok_or_else(|| malformed(line, "expected ')'"))?;
    if close < open {
        return Err(malformed(line, "mismatched parentheses"));
    }

    let label = text[..open].trim();
    let tokens: Vec<&str> = text[open + 1..close].split(',').map(str::trim).collect();

    if label.as_bytes() == labels.segment.as_bytes() {
        if tokens.len() != 2 {
            return Err(malformed(line, "a segment takes two points"));
        }
        let p0 = resolve(tokens[0], 'P', points, line)?;
        let p1 = resolve(tokens[1], 'P', points, line)?;
        Ok(Primitive::Segment(Segment::new(p0, p1)))
    } else if label.as_bytes() == labels.arc.as_bytes() {
        if tokens.len() != 3 {
            return Err(malformed(line, "an arc takes a center and two points"));
        }
        let center = resolve(tokens[0], 'C', centers, line)?;
        let p0 = resolve(tokens[1], 'P', points, line)?;
        let p1 = resolve(tokens[2], 'P', points, line)?;

        let r0 = (p0 - center).magnitude();
        let r1 = (p1 - center).magnitude();
        if (r0 - r1).abs() > RADIUS_TOLERANCE * r0.max(1.0) {
            return Err(malformed(line, "arc endpoints disagree on the radius"));
        }
        Ok(Primitive::Arc(Arc::new(center, p0, p1)))
    } else {
        Err(malformed(line, "unknown primitive type"))
    }
}

// Turn a `P7`/`C7` token into the coordinates it names
fn resolve(
    token: &str,
    prefix: char,
    table: &HashMap<u64, Point>,
    line: usize
) -> Result<Point> {
    let id: u64 = token.strip_prefix(prefix)
        .and_then(|digits| digits.parse().ok())
        .ok_or_else(|| malformed(line, "expected a point reference"))?;
    table.get(&id).copied().ok_or(Error::DanglingReference {
        line,
        reference: token.to_string()
    })
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parses_points_segments_and_arcs() {
        let text = "\
            PCB layout export\n\
            P1=(0, 0)\n\
            P2=(10, 0)\n\
            P3=(0.5, 0.5)\n\
            C1=(0, 0)\n\
            P4=(1, 0)\n\
            P5=(0, 1)\n\
            l1=线段(P1, P2)\n\
            l2=圆弧(C1, P4, P5)\n";
        let primitives = parse_str(text, &Labels::default()).unwrap();
        assert_eq!(primitives.len(), 2);
        match &primitives[0] {
            Primitive::Segment(seg) => {
                assert_eq!(seg.p0, Point::new(0.0, 0.0));
                assert_eq!(seg.p1, Point::new(10.0, 0.0));
            }
            other => panic!("expected a segment, got {:?}", other)
        }
        match &primitives[1] {
            Primitive::Arc(arc) => {
                assert_eq!(arc.center, Point::new(0.0, 0.0));
                assert_eq!(arc.radius, 1.0);
            }
            other => panic!("expected an arc, got {:?}", other)
        }
    }

    #[test]
    fn redefinition_takes_the_last_value() {
        let text = "P1=(0, 0)\nP1=(5, 5)\nP2=(6, 5)\nl1=线段(P1, P2)\n";
        let primitives = parse_str(text, &Labels::default()).unwrap();
        match &primitives[0] {
            Primitive::Segment(seg) => assert_eq!(seg.p0, Point::new(5.0, 5.0)),
            other => panic!("expected a segment, got {:?}", other)
        }
    }

    #[test]
    fn dangling_reference_fails_without_primitives() {
        let text = "P1=(0, 0)\nP2=(1, 0)\nl1=线段(P1, P3)\n";
        match parse_str(text, &Labels::default()) {
            Err(Error::DanglingReference { line, reference }) => {
                assert_eq!(line, 3);
                assert_eq!(reference, "P3");
            }
            other => panic!("expected DanglingReference, got {:?}", other)
        }
    }

    #[test]
    fn unknown_primitive_type_is_malformed() {
        let text = "P1=(0, 0)\nP2=(1, 0)\nl1=曲线(P1, P2)\n";
        match parse_str(text, &Labels::default()) {
            Err(Error::MalformedInput { line, .. }) => assert_eq!(line, 3),
            other => panic!("expected MalformedInput, got {:?}", other)
        }
    }

    #[test]
    fn bad_coordinates_are_malformed() {
        match parse_str("P1=(zero, 0)\n", &Labels::default()) {
            Err(Error::MalformedInput { line, .. }) => assert_eq!(line, 1),
            other => panic!("expected MalformedInput, got {:?}", other)
        }
    }

    #[test]
    fn arc_radius_mismatch_is_malformed() {
        let text = "C1=(0, 0)\nP1=(1, 0)\nP2=(0, 2)\nl1=圆弧(C1, P1, P2)\n";
        assert!(parse_str(text, &Labels::default()).is_err());
    }

    #[test]
    fn custom_labels_match_as_bytes() {
        let labels = Labels {
            segment: "seg".to_string(),
            arc: "arc".to_string()
        };
        let text = "P1=(0, 0)\nP2=(3, 4)\nl1=seg(P1, P2)\n";
        let primitives = parse_str(text, &labels).unwrap();
        assert_eq!(primitives.len(), 1);
    }

    #[test]
    fn unrelated_lines_are_skipped() {
        let text = "# comment\nwidth=42\nPx=(1, 2)\n\nP1=(0, 0)\nP2=(1, 1)\nl1=线段(P1, P2)\n";
        let primitives = parse_str(text, &Labels::default()).unwrap();
        assert_eq!(primitives.len(), 1);
    }
}
