use edgewalk_core::Point;

/// Three corners of the unit square; no two edges are collinear.
#[must_use]
pub fn corner_points() -> Vec<Point> {
    vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(0.0, 1.0)]
}

/// Points on a parabola, so every coordinate is distinct.
#[must_use]
pub fn parabola_points(count: usize) -> Vec<Point> {
    (0..count)
        .map(|index| {
            let x = index as f64;
            Point::new(x, 0.25 * x * x)
        })
        .collect()
}
