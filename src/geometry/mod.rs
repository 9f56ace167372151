pub mod bounds;
pub mod collection;
pub mod coord;
pub mod line;
pub mod polygon;
pub mod ring;

pub use bounds::Bounds;
pub use collection::{VectorData, VectorSource};
pub use coord::Coord;
pub use line::LineString;
pub use polygon::{MultiPolygon, Polygon};
pub use ring::{Ring, Winding};

use crate::error::{GeometryError, Result};

/// Checks the structural minimum and finiteness of a coordinate sequence.
///
/// # Errors
///
/// Returns `GeometryError::TooFewPoints` when fewer than `required`
/// coordinates are given, `GeometryError::NonFinite` for NaN/infinite values.
pub fn validate_coords(coords: &[Coord], required: usize) -> Result<()> {
    if coords.len() < required {
        return Err(GeometryError::TooFewPoints {
            required,
            actual: coords.len(),
        }
        .into());
    }
    if let Some(index) = coords.iter().position(|c| !c.is_finite()) {
        return Err(GeometryError::NonFinite { index }.into());
    }
    Ok(())
}
