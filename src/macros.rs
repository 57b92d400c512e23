/**
Combine the components of two 2-space points with the given binary function.
Used for componentwise min/max when working with bounding boxes.
*/
#[macro_export]
macro_rules! zip_points {
    ($p0:expr, $p1:expr, $f:ident) => {
        cgmath::Point2::new($f($p0.x, $p1.x), $f($p0.y, $p1.y))
    }
}

/**
True if the given predicate holds for both coordinate pairs of two 2-space
points.
*/
#[macro_export]
macro_rules! all_coords_match {
    ($p0:expr, $p1:expr, $f:expr) => {{
        let f = $f;
        f($p0.x, $p1.x) && f($p0.y, $p1.y)
    }}
}
