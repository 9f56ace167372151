use super::{Ring, Winding};

/// A polygon: one exterior ring plus zero or more holes.
///
/// Holes are assumed to lie inside the exterior and not to overlap each
/// other; nothing here re-validates that.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Polygon {
    exterior: Ring,
    holes: Vec<Ring>,
}

impl Polygon {
    #[must_use]
    pub fn new(exterior: Ring, holes: Vec<Ring>) -> Self {
        Self { exterior, holes }
    }

    #[must_use]
    pub fn exterior(&self) -> &Ring {
        &self.exterior
    }

    #[must_use]
    pub fn holes(&self) -> &[Ring] {
        &self.holes
    }

    /// Exterior first, then holes in order.
    pub fn rings(&self) -> impl Iterator<Item = &Ring> {
        std::iter::once(&self.exterior).chain(self.holes.iter())
    }

    /// Total number of coordinates over all rings.
    #[must_use]
    pub fn coord_count(&self) -> usize {
        self.rings().map(Ring::len).sum()
    }

    /// Exterior area minus hole areas.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.exterior.area() - self.holes.iter().map(Ring::area).sum::<f64>()
    }

    /// Returns the polygon with a counter-clockwise exterior and clockwise
    /// holes.
    #[must_use]
    pub fn oriented(&self) -> Self {
        Self {
            exterior: self.exterior.oriented(Winding::CounterClockwise),
            holes: self
                .holes
                .iter()
                .map(|h| h.oriented(Winding::Clockwise))
                .collect(),
        }
    }

    #[must_use]
    pub fn into_rings(self) -> (Ring, Vec<Ring>) {
        (self.exterior, self.holes)
    }
}

/// A collection of polygons forming one logical feature.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MultiPolygon {
    polygons: Vec<Polygon>,
}

impl MultiPolygon {
    #[must_use]
    pub fn new(polygons: Vec<Polygon>) -> Self {
        Self { polygons }
    }

    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.polygons.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Polygon> {
        self.polygons.iter()
    }

    #[must_use]
    pub fn area(&self) -> f64 {
        self.polygons.iter().map(Polygon::area).sum()
    }

    #[must_use]
    pub fn coord_count(&self) -> usize {
        self.polygons.iter().map(Polygon::coord_count).sum()
    }

    /// Orientation-normalized copy, see [`Polygon::oriented`].
    #[must_use]
    pub fn oriented(&self) -> Self {
        self.polygons.iter().map(Polygon::oriented).collect()
    }
}

impl From<Polygon> for MultiPolygon {
    fn from(polygon: Polygon) -> Self {
        Self::new(vec![polygon])
    }
}

impl FromIterator<Polygon> for MultiPolygon {
    fn from_iter<I: IntoIterator<Item = Polygon>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl IntoIterator for MultiPolygon {
    type Item = Polygon;
    type IntoIter = std::vec::IntoIter<Polygon>;

    fn into_iter(self) -> Self::IntoIter {
        self.polygons.into_iter()
    }
}

impl<'a> IntoIterator for &'a MultiPolygon {
    type Item = &'a Polygon;
    type IntoIter = std::slice::Iter<'a, Polygon>;

    fn into_iter(self) -> Self::IntoIter {
        self.polygons.iter()
    }
}
