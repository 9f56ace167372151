use crate::geometry::{Bounds, Coord, LineString, MultiPolygon, Polygon, Ring, VectorData};

/// Geometry with an axis-aligned extent.
pub trait HasBounds {
    /// Bounds over every coordinate, `None` for empty geometry.
    fn bounds(&self) -> Option<Bounds>;
}

impl HasBounds for [Coord] {
    fn bounds(&self) -> Option<Bounds> {
        Bounds::from_coords(self)
    }
}

impl HasBounds for LineString {
    fn bounds(&self) -> Option<Bounds> {
        self.coords().bounds()
    }
}

impl HasBounds for Ring {
    fn bounds(&self) -> Option<Bounds> {
        self.coords().bounds()
    }
}

impl HasBounds for Polygon {
    /// Holes lie inside the exterior, so the exterior decides.
    fn bounds(&self) -> Option<Bounds> {
        self.exterior().bounds()
    }
}

impl HasBounds for MultiPolygon {
    fn bounds(&self) -> Option<Bounds> {
        union_all(self.iter().map(HasBounds::bounds))
    }
}

impl HasBounds for VectorData {
    fn bounds(&self) -> Option<Bounds> {
        Bounds::from_coords(self.all_coords())
    }
}

/// Bounds of any supported geometry.
#[must_use]
pub fn bounds<G: HasBounds + ?Sized>(geometry: &G) -> Option<Bounds> {
    geometry.bounds()
}

fn union_all(parts: impl Iterator<Item = Option<Bounds>>) -> Option<Bounds> {
    parts.flatten().reduce(Bounds::union)
}
