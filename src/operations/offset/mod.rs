//! Polygon offsetting (buffering) by a signed distance.
//!
//! Every ring is offset on its own, then the raw rings are resolved
//! together: they are cut at every contact, the pieces that bound the
//! region of positive winding are kept and stitched back into rings, and
//! the rings are regrouped into polygons. Collapse and split fall out of
//! this as ordinary results (zero or several polygons).

mod assemble;
mod filter;
pub(crate) mod intersect;
mod raw_offset;
mod slice;
mod stitch;

use tracing::debug;

use crate::error::{OperationError, Result};
use crate::geometry::{validate_coords, Bounds, Coord, MultiPolygon, Polygon};
use crate::math::polygon_2d::signed_area_2d;
use crate::math::TOLERANCE;

/// Corner treatment on the convex side of an offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum JoinStyle {
    /// Extend both edges to their intersection, beveling past the miter
    /// limit.
    #[default]
    Miter,
    /// Circular arc around the original vertex.
    Round,
    /// Straight cut between the two offset edges.
    Bevel,
}

/// Tunables for [`PolygonOffset`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OffsetOptions {
    pub join: JoinStyle,
    /// Longest allowed miter, in multiples of `|distance|`.
    pub miter_limit: f64,
    /// Largest gap between a round join and its true arc, as a fraction of
    /// `|distance|`.
    pub arc_tolerance: f64,
}

impl Default for OffsetOptions {
    fn default() -> Self {
        Self {
            join: JoinStyle::Miter,
            miter_limit: 4.0,
            arc_tolerance: 0.005,
        }
    }
}

impl OffsetOptions {
    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` for a non-positive or
    /// non-finite miter limit or arc tolerance.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("miter_limit", self.miter_limit),
            ("arc_tolerance", self.arc_tolerance),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(OperationError::InvalidInput(format!(
                    "{name} must be finite and > 0, got {value}"
                ))
                .into());
            }
        }
        Ok(())
    }
}

/// Offsets every polygon of a multipolygon by a signed distance.
///
/// Positive distances grow the material, negative distances shrink it.
/// The result uses counter-clockwise exteriors and clockwise holes.
#[derive(Debug)]
pub struct PolygonOffset<'a> {
    input: &'a MultiPolygon,
    distance: f64,
    options: OffsetOptions,
}

impl<'a> PolygonOffset<'a> {
    #[must_use]
    pub fn new(input: &'a MultiPolygon, distance: f64) -> Self {
        Self {
            input,
            distance,
            options: OffsetOptions::default(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: OffsetOptions) -> Self {
        self.options = options;
        self
    }

    /// Runs the offset.
    ///
    /// # Errors
    ///
    /// Returns an invalid-input error for a non-finite distance, invalid
    /// options, a ring with fewer than 3 points, or non-finite
    /// coordinates. Collapse and split are not errors.
    pub fn execute(&self) -> Result<MultiPolygon> {
        if !self.distance.is_finite() {
            return Err(OperationError::InvalidInput(format!(
                "offset distance must be finite, got {}",
                self.distance
            ))
            .into());
        }
        self.options.validate()?;
        for ring in self.input.iter().flat_map(Polygon::rings) {
            validate_coords(ring.coords(), 3)?;
        }

        if self.distance.abs() < TOLERANCE {
            return Ok(self.input.oriented());
        }

        let rings = prepare_rings(self.input);
        let raw: Vec<Vec<Coord>> = rings
            .iter()
            .map(|r| raw_offset::build(r, self.distance, &self.options))
            .filter(|r| r.len() >= 3)
            .collect();
        let Some(extent) = Bounds::from_coords(raw.iter().flatten()) else {
            return Ok(MultiPolygon::empty());
        };
        let scale = extent.size().max(self.distance.abs());
        let node_tol = scale * 1e-9;

        let splits = intersect::find_all(&raw);
        let slices = slice::build(&raw, &splits, node_tol);
        let kept = filter::apply(&slices, &raw, self.distance, scale, node_tol);
        let closed = stitch::connect(&kept, node_tol);
        let result = assemble::build(closed, node_tol);

        debug!(
            input_rings = rings.len(),
            splits = splits.len(),
            slices = slices.len(),
            kept = kept.len(),
            polygons = result.len(),
            distance = self.distance,
            "polygon offset"
        );
        Ok(result)
    }
}

/// Offsets `input` by `distance` with default options.
///
/// # Errors
///
/// See [`PolygonOffset::execute`].
pub fn offset(input: &MultiPolygon, distance: f64) -> Result<MultiPolygon> {
    PolygonOffset::new(input, distance).execute()
}

/// Orientation-normalized, duplicate-free rings of every polygon.
///
/// Rings enclosing no area are skipped; a polygon whose exterior is such a
/// ring contributes nothing.
fn prepare_rings(input: &MultiPolygon) -> Vec<Vec<Coord>> {
    let mut out = Vec::new();
    for polygon in &input.oriented() {
        let mut rings = polygon.rings().map(|r| dedup_ring(r.coords()));
        match rings.next() {
            Some(exterior) if !is_degenerate(&exterior) => out.push(exterior),
            _ => continue,
        }
        out.extend(rings.filter(|h| !is_degenerate(h)));
    }
    out
}

fn dedup_ring(coords: &[Coord]) -> Vec<Coord> {
    let mut out: Vec<Coord> = Vec::with_capacity(coords.len());
    for &c in coords {
        if out.last().map_or(true, |&l| l.distance(c) >= TOLERANCE) {
            out.push(c);
        }
    }
    while out.len() > 1 && out[0].distance(out[out.len() - 1]) < TOLERANCE {
        out.pop();
    }
    out
}

fn is_degenerate(ring: &[Coord]) -> bool {
    ring.len() < 3 || signed_area_2d(ring).abs() < TOLERANCE
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::geometry::coord::coords;
    use crate::geometry::Ring;

    fn square(x0: f64, y0: f64, size: f64) -> Polygon {
        Polygon::new(
            Ring::new(coords(&[
                (x0, y0),
                (x0 + size, y0),
                (x0 + size, y0 + size),
                (x0, y0 + size),
            ])),
            vec![],
        )
    }

    fn assert_coords_eq(actual: &[Coord], expected: &[(f64, f64)]) {
        assert_eq!(actual.len(), expected.len(), "{actual:?}");
        for (a, &(x, y)) in actual.iter().zip(expected) {
            assert_relative_eq!(a.x, x, epsilon = 1e-9);
            assert_relative_eq!(a.y, y, epsilon = 1e-9);
        }
    }

    #[test]
    fn square_inward_by_three() {
        let out = offset(&square(0.0, 0.0, 10.0).into(), -3.0).unwrap();
        assert_eq!(out.len(), 1);
        let poly = &out.polygons()[0];
        assert!(poly.holes().is_empty());
        assert_coords_eq(
            poly.exterior().coords(),
            &[(3.0, 3.0), (7.0, 3.0), (7.0, 7.0), (3.0, 7.0)],
        );
    }

    #[test]
    fn square_inward_by_six_collapses() {
        let out = offset(&square(0.0, 0.0, 10.0).into(), -6.0).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn square_outward_miter() {
        let out = offset(&square(0.0, 0.0, 10.0).into(), 2.0).unwrap();
        assert_eq!(out.len(), 1);
        assert_coords_eq(
            out.polygons()[0].exterior().coords(),
            &[(-2.0, -2.0), (12.0, -2.0), (12.0, 12.0), (-2.0, 12.0)],
        );
    }

    #[test]
    fn round_join_area_close_to_exact_buffer() {
        let options = OffsetOptions {
            join: JoinStyle::Round,
            arc_tolerance: 0.0005,
            ..OffsetOptions::default()
        };
        let mp: MultiPolygon = square(0.0, 0.0, 10.0).into();
        let out = PolygonOffset::new(&mp, 1.0)
            .with_options(options)
            .execute()
            .unwrap();
        let exact = 100.0 + 4.0 * 10.0 + std::f64::consts::PI;
        assert_relative_eq!(out.area(), exact, max_relative = 1e-3);
        assert!(out.area() <= exact);
    }

    #[test]
    fn bevel_join_cuts_corners() {
        let options = OffsetOptions {
            join: JoinStyle::Bevel,
            ..OffsetOptions::default()
        };
        let mp: MultiPolygon = square(0.0, 0.0, 10.0).into();
        let out = PolygonOffset::new(&mp, 1.0)
            .with_options(options)
            .execute()
            .unwrap();
        assert_eq!(out.polygons()[0].exterior().len(), 8);
        assert_relative_eq!(out.area(), 100.0 + 40.0 + 2.0, epsilon = 1e-9);
    }

    #[test]
    fn hole_shrinks_when_material_grows() {
        let poly = Polygon::new(
            Ring::new(coords(&[(0.0, 0.0), (20.0, 0.0), (20.0, 20.0), (0.0, 20.0)])),
            vec![Ring::new(coords(&[
                (5.0, 5.0),
                (15.0, 5.0),
                (15.0, 15.0),
                (5.0, 15.0),
            ]))],
        );
        let out = offset(&poly.into(), 1.0).unwrap();
        assert_eq!(out.len(), 1);
        let result = &out.polygons()[0];
        assert_eq!(result.holes().len(), 1);
        assert_relative_eq!(result.exterior().signed_area(), 22.0 * 22.0, epsilon = 1e-9);
        assert_relative_eq!(result.holes()[0].signed_area(), -64.0, epsilon = 1e-9);
    }

    #[test]
    fn hole_closes_when_grown_past_half_width() {
        let poly = Polygon::new(
            Ring::new(coords(&[(0.0, 0.0), (20.0, 0.0), (20.0, 20.0), (0.0, 20.0)])),
            vec![Ring::new(coords(&[(9.0, 9.0), (11.0, 9.0), (11.0, 11.0), (9.0, 11.0)]))],
        );
        let out = offset(&poly.into(), 1.5).unwrap();
        assert_eq!(out.len(), 1);
        assert!(out.polygons()[0].holes().is_empty());
    }

    #[test]
    fn zero_distance_normalizes_orientation() {
        let cw = Polygon::new(
            Ring::new(coords(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)])),
            vec![],
        );
        let out = offset(&cw.into(), 0.0).unwrap();
        assert!(out.polygons()[0].exterior().signed_area() > 0.0);
    }

    #[test]
    fn degenerate_exterior_contributes_nothing() {
        let flat = Polygon::new(
            Ring::new(coords(&[(0.0, 0.0), (5.0, 0.0), (10.0, 0.0)])),
            vec![],
        );
        let mp = MultiPolygon::new(vec![flat, square(20.0, 0.0, 4.0)]);
        let out = offset(&mp, -1.0).unwrap();
        assert_eq!(out.len(), 1);
        assert_relative_eq!(out.area(), 4.0, epsilon = 1e-9);
    }

    #[test]
    fn rejects_bad_input() {
        let mp: MultiPolygon = square(0.0, 0.0, 1.0).into();
        assert!(offset(&mp, f64::NAN).unwrap_err().is_invalid_input());

        let bad = OffsetOptions {
            miter_limit: 0.0,
            ..OffsetOptions::default()
        };
        assert!(PolygonOffset::new(&mp, 1.0)
            .with_options(bad)
            .execute()
            .unwrap_err()
            .is_invalid_input());

        let short = MultiPolygon::from(Polygon::new(
            Ring::new(coords(&[(0.0, 0.0), (1.0, 0.0)])),
            vec![],
        ));
        assert!(offset(&short, 1.0).unwrap_err().is_invalid_input());
    }
}
