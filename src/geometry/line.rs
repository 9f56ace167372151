use super::validate_coords;
use super::Coord;
use crate::error::Result;

/// An open, ordered sequence of coordinates.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LineString {
    coords: Vec<Coord>,
}

impl LineString {
    /// Creates a line without validation.
    #[must_use]
    pub fn new(coords: Vec<Coord>) -> Self {
        Self { coords }
    }

    /// Creates a line, requiring at least 2 finite coordinates.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::TooFewPoints` or `GeometryError::NonFinite`.
    pub fn try_new(coords: Vec<Coord>) -> Result<Self> {
        validate_coords(&coords, 2)?;
        Ok(Self { coords })
    }

    #[must_use]
    pub fn coords(&self) -> &[Coord] {
        &self.coords
    }

    #[must_use]
    pub fn into_coords(self) -> Vec<Coord> {
        self.coords
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.coords.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// Total length along the line.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.coords.windows(2).map(|w| w[0].distance(w[1])).sum()
    }
}

impl From<Vec<Coord>> for LineString {
    fn from(coords: Vec<Coord>) -> Self {
        Self::new(coords)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::coord::coords;

    #[test]
    fn try_new_rejects_single_point() {
        let err = LineString::try_new(coords(&[(0.0, 0.0)])).unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn length_sums_segments() {
        let line = LineString::new(coords(&[(0.0, 0.0), (3.0, 4.0), (3.0, 10.0)]));
        assert!((line.length() - 11.0).abs() < 1e-12);
    }
}
