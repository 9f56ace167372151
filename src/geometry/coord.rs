use std::ops::Sub;

use crate::math::{Point2, Vector2};

/// A 2D coordinate in projected map units.
///
/// Coordinates are plain values: two coordinates are the same coordinate
/// exactly when both components compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord {
    pub x: f64,
    pub y: f64,
}

impl Coord {
    /// Creates a coordinate.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        (self - other).norm()
    }

    /// Returns `true` when both components are finite.
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Translates the coordinate by `v`.
    #[must_use]
    pub fn offset_by(self, v: &Vector2) -> Self {
        Self::new(self.x + v.x, self.y + v.y)
    }

    /// Midpoint between `self` and `other`.
    #[must_use]
    pub fn midpoint(self, other: Self) -> Self {
        Self::new((self.x + other.x) * 0.5, (self.y + other.y) * 0.5)
    }
}

impl Sub for Coord {
    type Output = Vector2;

    fn sub(self, rhs: Self) -> Vector2 {
        Vector2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl From<(f64, f64)> for Coord {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl From<Coord> for (f64, f64) {
    fn from(c: Coord) -> Self {
        (c.x, c.y)
    }
}

impl From<Point2> for Coord {
    fn from(p: Point2) -> Self {
        Self::new(p.x, p.y)
    }
}

impl From<Coord> for Point2 {
    fn from(c: Coord) -> Self {
        Point2::new(c.x, c.y)
    }
}

/// Builds a coordinate vector from `(x, y)` tuples.
#[must_use]
pub fn coords(points: &[(f64, f64)]) -> Vec<Coord> {
    points.iter().copied().map(Coord::from).collect()
}
