use super::validate_coords;
use super::Coord;
use crate::error::Result;
use crate::math::polygon_2d::signed_area_2d;

/// Rotational sense of a ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Winding {
    CounterClockwise,
    Clockwise,
}

/// A closed ring of coordinates.
///
/// The closing edge from the last coordinate back to the first is implicit.
/// A trailing coordinate that repeats the first one is dropped on
/// construction, so `coords()` never contains the closing duplicate.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ring {
    coords: Vec<Coord>,
}

impl Ring {
    /// Creates a ring without validation, stripping a repeated closing
    /// coordinate.
    #[must_use]
    pub fn new(mut coords: Vec<Coord>) -> Self {
        while coords.len() > 1 && coords.first() == coords.last() {
            coords.pop();
        }
        Self { coords }
    }

    /// Creates a ring, requiring at least 3 finite coordinates after the
    /// closing duplicate is stripped.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::TooFewPoints` or `GeometryError::NonFinite`.
    pub fn try_new(coords: Vec<Coord>) -> Result<Self> {
        let ring = Self::new(coords);
        validate_coords(&ring.coords, 3)?;
        Ok(ring)
    }

    #[must_use]
    pub fn coords(&self) -> &[Coord] {
        &self.coords
    }

    #[must_use]
    pub fn into_coords(self) -> Vec<Coord> {
        self.coords
    }

    /// Coordinates with the first one repeated at the end.
    #[must_use]
    pub fn closed_coords(&self) -> Vec<Coord> {
        let mut out = self.coords.clone();
        if let Some(&first) = self.coords.first() {
            out.push(first);
        }
        out
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.coords.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// Shoelace area, positive for counter-clockwise rings.
    #[must_use]
    pub fn signed_area(&self) -> f64 {
        signed_area_2d(&self.coords)
    }

    #[must_use]
    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    /// Rotational sense, or `None` for a ring enclosing no area.
    #[must_use]
    pub fn winding(&self) -> Option<Winding> {
        let a = self.signed_area();
        if a > 0.0 {
            Some(Winding::CounterClockwise)
        } else if a < 0.0 {
            Some(Winding::Clockwise)
        } else {
            None
        }
    }

    /// Length of the boundary including the closing edge.
    #[must_use]
    pub fn perimeter(&self) -> f64 {
        let n = self.coords.len();
        if n < 2 {
            return 0.0;
        }
        (0..n)
            .map(|i| self.coords[i].distance(self.coords[(i + 1) % n]))
            .sum()
    }

    #[must_use]
    pub fn reversed(&self) -> Self {
        Self {
            coords: self.coords.iter().rev().copied().collect(),
        }
    }

    /// Returns the ring traversed in the requested sense. Rings without
    /// area are returned unchanged.
    #[must_use]
    pub fn oriented(&self, winding: Winding) -> Self {
        match self.winding() {
            Some(w) if w != winding => self.reversed(),
            _ => self.clone(),
        }
    }
}

impl From<Vec<Coord>> for Ring {
    fn from(coords: Vec<Coord>) -> Self {
        Self::new(coords)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::coord::coords;

    fn square_cw() -> Ring {
        Ring::new(coords(&[(0.0, 0.0), (0.0, 2.0), (2.0, 2.0), (2.0, 0.0)]))
    }

    #[test]
    fn closing_duplicate_is_stripped() {
        let ring = Ring::new(coords(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 0.0)]));
        assert_eq!(ring.len(), 3);
        assert_eq!(ring.closed_coords().len(), 4);
    }

    #[test]
    fn try_new_rejects_two_points() {
        let err = Ring::try_new(coords(&[(0.0, 0.0), (1.0, 0.0), (0.0, 0.0)])).unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn try_new_rejects_nan() {
        let err = Ring::try_new(coords(&[(0.0, 0.0), (f64::NAN, 0.0), (1.0, 1.0)])).unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn winding_and_orientation() {
        let ring = square_cw();
        assert_eq!(ring.winding(), Some(Winding::Clockwise));
        assert!((ring.signed_area() + 4.0).abs() < 1e-12);
        let ccw = ring.oriented(Winding::CounterClockwise);
        assert_eq!(ccw.winding(), Some(Winding::CounterClockwise));
        assert!((ccw.area() - 4.0).abs() < 1e-12);
    }

    #[test]
    fn perimeter_includes_closing_edge() {
        assert!((square_cw().perimeter() - 8.0).abs() < 1e-12);
    }
}
