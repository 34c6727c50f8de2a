//! Planar coordinates used as graph vertices.

use std::{collections::HashMap, fmt};

use crate::error::{Result, SamplerError};

/// A vertex position in the plane.
///
/// A vertex is identified by its coordinate, so a vertex list must not repeat
/// a point. Edge weights are always derived from these coordinates.
///
/// # Examples
/// ```
/// use edgewalk_core::Point;
///
/// let origin = Point::new(0.0, 0.0);
/// let corner = Point::new(3.0, 4.0);
/// assert_eq!(origin.distance(corner), 5.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    x: f64,
    y: f64,
}

impl Point {
    /// Creates a point from its coordinates.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns the horizontal coordinate.
    #[must_use]
    #[rustfmt::skip]
    pub const fn x(self) -> f64 { self.x }

    /// Returns the vertical coordinate.
    #[must_use]
    #[rustfmt::skip]
    pub const fn y(self) -> f64 { self.y }

    /// Euclidean distance between two points.
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Returns `true` when both coordinates are finite.
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    fn identity(self) -> (u64, u64) {
        // `0.0` and `-0.0` name the same location.
        ((self.x + 0.0).to_bits(), (self.y + 0.0).to_bits())
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:?}, {:?})", self.x, self.y)
    }
}

/// Checks that every coordinate is finite and no coordinate repeats.
///
/// # Errors
/// Returns [`SamplerError::NonFiniteCoordinate`] or
/// [`SamplerError::DuplicateVertex`] for the first offending vertex.
pub(crate) fn validate_vertices(vertices: &[Point]) -> Result<()> {
    let mut seen = HashMap::with_capacity(vertices.len());
    for (index, point) in vertices.iter().enumerate() {
        if !point.is_finite() {
            return Err(SamplerError::NonFiniteCoordinate { index });
        }
        if let Some(&first) = seen.get(&point.identity()) {
            return Err(SamplerError::DuplicateVertex {
                first,
                second: index,
            });
        }
        seen.insert(point.identity(), index);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    #[case(Point::new(2.2, 2.2), Point::new(0.0, 0.0), 3.11)]
    #[case(Point::new(2.0, 0.0), Point::new(2.0, 0.0), 0.0)]
    #[case(Point::new(-1.0, -1.0), Point::new(2.0, 3.0), 5.0)]
    fn distance_is_euclidean(#[case] left: Point, #[case] right: Point, #[case] expected: f64) {
        let rounded = (left.distance(right) * 100.0).round() / 100.0;
        assert_eq!(rounded, expected);
        assert_eq!(left.distance(right), right.distance(left));
    }

    #[test]
    fn rejects_duplicate_coordinates() {
        let points = [Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(-0.0, 0.0)];
        assert_eq!(
            validate_vertices(&points),
            Err(SamplerError::DuplicateVertex {
                first: 0,
                second: 2
            })
        );
    }

    #[rstest]
    #[case(f64::NAN, 0.0)]
    #[case(0.0, f64::INFINITY)]
    fn rejects_non_finite_coordinates(#[case] x: f64, #[case] y: f64) {
        let points = [Point::new(5.0, 5.0), Point::new(x, y)];
        assert_eq!(
            validate_vertices(&points),
            Err(SamplerError::NonFiniteCoordinate { index: 1 })
        );
    }

    #[test]
    fn display_keeps_decimal_point() {
        assert_eq!(Point::new(1.0, -2.5).to_string(), "(1.0, -2.5)");
    }
}
