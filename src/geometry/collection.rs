use super::{Coord, LineString, MultiPolygon, Polygon};
use crate::error::Result;

/// The geometry a format reader hands to the core, with no trace of the
/// source format.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VectorData {
    pub points: Vec<Coord>,
    pub lines: Vec<LineString>,
    pub polygons: Vec<Polygon>,
    pub multipolygons: Vec<MultiPolygon>,
}

impl VectorData {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
            && self.lines.is_empty()
            && self.polygons.is_empty()
            && self.multipolygons.is_empty()
    }

    /// Every coordinate in the bundle, in storage order.
    pub fn all_coords(&self) -> impl Iterator<Item = &Coord> {
        let line_coords = self.lines.iter().flat_map(|l| l.coords().iter());
        let poly_coords = self
            .polygons
            .iter()
            .chain(self.multipolygons.iter().flat_map(MultiPolygon::iter))
            .flat_map(|p| p.rings().flat_map(|r| r.coords().iter()));
        self.points.iter().chain(line_coords).chain(poly_coords)
    }
}

/// Capability interface for format readers.
///
/// Readers (GeoJSON, OSM XML, shapefiles, ...) live outside this crate;
/// callers pick one at runtime and hand the result to the core.
pub trait VectorSource {
    /// Produces the geometry bundle.
    ///
    /// # Errors
    ///
    /// Reader-specific failures, mapped into the crate error type.
    fn read(&self) -> Result<VectorData>;
}
