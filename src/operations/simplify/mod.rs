//! Vertex reduction for lines and rings.
//!
//! Every family implements [`Simplifier`] so callers can pick a variant at
//! runtime and compare variants against one contract. The shared call
//! boundary lives in [`prepare`]: structural violations fail there, while
//! "nothing to do" requests return an unchanged copy.

mod douglas_peucker;
mod visvalingam;

pub use douglas_peucker::DouglasPeucker;
pub use visvalingam::{EliminationOrder, Removal, VisvalingamHeap, VisvalingamNaive};

use crate::error::{OperationError, Result};
use crate::geometry::{validate_coords, Coord, LineString, MultiPolygon, Polygon, Ring};

/// How far to simplify.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Target {
    /// Reduce to this many points.
    Count(usize),
    /// Remove points whose error measure stays below this value. The
    /// measure is a distance for Douglas-Peucker and an area for
    /// Visvalingam-Whyatt.
    Tolerance(f64),
}

/// Whether a point sequence is an open line or an implicitly closed ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PathKind {
    Line,
    Ring,
}

impl PathKind {
    /// Fewest points a valid path of this kind can have.
    #[must_use]
    pub fn min_points(self) -> usize {
        match self {
            Self::Line => 2,
            Self::Ring => 3,
        }
    }
}

/// A simplification strategy.
///
/// Implementations return a subsequence (by index) of the input and never
/// modify it.
pub trait Simplifier {
    /// Short name for logs and comparisons.
    fn name(&self) -> &'static str;

    /// Simplifies `points` as a path of the given kind.
    ///
    /// # Errors
    ///
    /// Fails with an invalid-input error when `points` is below the
    /// structural minimum of `kind`, contains non-finite values, or the
    /// target is below the minimum or a negative tolerance.
    fn simplify(&self, points: &[Coord], kind: PathKind, target: Target) -> Result<Vec<Coord>>;

    /// Simplifies an open line.
    ///
    /// # Errors
    ///
    /// See [`Simplifier::simplify`].
    fn simplify_line(&self, line: &LineString, target: Target) -> Result<LineString> {
        self.simplify(line.coords(), PathKind::Line, target)
            .map(LineString::new)
    }

    /// Simplifies a ring; the result keeps at least 3 points.
    ///
    /// # Errors
    ///
    /// See [`Simplifier::simplify`].
    fn simplify_ring(&self, ring: &Ring, target: Target) -> Result<Ring> {
        self.simplify(ring.coords(), PathKind::Ring, target)
            .map(Ring::new)
    }

    /// Simplifies every ring of a polygon with the same tolerance.
    ///
    /// # Errors
    ///
    /// See [`Simplifier::simplify`].
    fn simplify_polygon(&self, polygon: &Polygon, tolerance: f64) -> Result<Polygon> {
        let target = Target::Tolerance(tolerance);
        let exterior = self.simplify_ring(polygon.exterior(), target)?;
        let holes = polygon
            .holes()
            .iter()
            .map(|h| self.simplify_ring(h, target))
            .collect::<Result<Vec<_>>>()?;
        Ok(Polygon::new(exterior, holes))
    }

    /// Simplifies every polygon of a multipolygon.
    ///
    /// # Errors
    ///
    /// See [`Simplifier::simplify`].
    fn simplify_multipolygon(
        &self,
        multipolygon: &MultiPolygon,
        tolerance: f64,
    ) -> Result<MultiPolygon> {
        multipolygon
            .iter()
            .map(|p| self.simplify_polygon(p, tolerance))
            .collect::<Result<Vec<_>>>()
            .map(MultiPolygon::new)
    }
}

/// Validated request handed to an algorithm.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Request {
    /// Keep exactly this many points (strictly fewer than the input).
    Count(usize),
    Tolerance(f64),
}

/// Shared call-boundary checks.
///
/// Returns `Ok(None)` when the target asks for at least as many points as
/// the input holds; callers then hand back an unchanged copy.
pub(crate) fn prepare(points: &[Coord], kind: PathKind, target: Target) -> Result<Option<Request>> {
    let min = kind.min_points();
    validate_coords(points, min)?;

    match target {
        Target::Count(count) if count < min => Err(OperationError::InvalidInput(format!(
            "target count {count} below structural minimum {min}"
        ))
        .into()),
        Target::Count(count) if count >= points.len() => Ok(None),
        Target::Count(count) => Ok(Some(Request::Count(count))),
        Target::Tolerance(tol) if !(tol.is_finite() && tol >= 0.0) => Err(
            OperationError::InvalidInput(format!("tolerance must be finite and >= 0, got {tol}"))
                .into(),
        ),
        Target::Tolerance(tol) => Ok(Some(Request::Tolerance(tol))),
    }
}

/// Collects the points whose mask entry is set, preserving order.
pub(crate) fn collect_kept(points: &[Coord], keep: &[bool]) -> Vec<Coord> {
    points
        .iter()
        .zip(keep)
        .filter(|&(_, &k)| k)
        .map(|(&p, _)| p)
        .collect()
}
