//! Visvalingam-Whyatt simplification.
//!
//! Points are removed one at a time in order of increasing effective area
//! (the triangle a point forms with its two current neighbours). Two
//! interchangeable implementations compute the same removal order:
//! [`VisvalingamNaive`] rescans every remaining point per removal,
//! [`VisvalingamHeap`] keeps the candidates in an indexed binary heap.
//!
//! Conventions shared by both:
//! - ties on effective area go to the lowest index;
//! - after a removal, a neighbour's recomputed area is clamped to at least
//!   the removed point's area, so removal areas never decrease;
//! - open lines never remove their first or last point; rings protect no
//!   point and use wrap-around neighbours down to three points.

mod heap;
mod naive;
mod optimized;

pub use naive::VisvalingamNaive;
pub use optimized::VisvalingamHeap;

use tracing::trace;

use super::{collect_kept, prepare, PathKind, Request, Target};
use crate::error::Result;
use crate::geometry::{validate_coords, Coord};
use crate::math::polygon_2d::triangle_area;

/// One step of the elimination sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Removal {
    /// Index of the removed point in the input.
    pub index: usize,
    /// Effective area at the moment of removal (after clamping).
    pub area: f64,
}

/// Access to the full, target-independent removal order.
pub trait EliminationOrder {
    /// Removes points until the structural minimum is reached and returns
    /// every removal in order.
    ///
    /// # Errors
    ///
    /// Fails when `points` is below the structural minimum of `kind` or
    /// contains non-finite values.
    fn removal_order(&self, points: &[Coord], kind: PathKind) -> Result<Vec<Removal>>;
}

/// The elimination loop behind both variants. Inputs are trusted: callers
/// validate before handing points over.
trait Eliminate {
    fn eliminate(&self, points: &[Coord], kind: PathKind, budget: Budget) -> Vec<Removal>;
}

fn full_order<E: Eliminate>(
    engine: &E,
    points: &[Coord],
    kind: PathKind,
) -> Result<Vec<Removal>> {
    validate_coords(points, kind.min_points())?;
    Ok(engine.eliminate(points, kind, Budget::Exhaust))
}

/// When to stop removing points.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Budget {
    /// Remove exactly this many points.
    Remove(usize),
    /// Remove while the smallest effective area is below this value.
    BelowArea(f64),
    /// Remove down to the structural minimum.
    Exhaust,
}

impl Budget {
    /// Whether removal number `removed + 1`, of a point with `area`, may go
    /// ahead.
    fn allows(self, removed: usize, area: f64) -> bool {
        match self {
            Self::Remove(limit) => removed < limit,
            Self::BelowArea(tol) => area < tol,
            Self::Exhaust => true,
        }
    }
}

/// Doubly linked neighbour indices over the input positions.
struct Links {
    prev: Vec<usize>,
    next: Vec<usize>,
}

impl Links {
    fn new(n: usize, kind: PathKind) -> Self {
        match kind {
            PathKind::Line => Self {
                prev: (0..n).map(|i| i.saturating_sub(1)).collect(),
                next: (0..n).map(|i| (i + 1).min(n - 1)).collect(),
            },
            PathKind::Ring => Self {
                prev: (0..n).map(|i| (i + n - 1) % n).collect(),
                next: (0..n).map(|i| (i + 1) % n).collect(),
            },
        }
    }

    /// Unlinks `i` and returns its former neighbours.
    fn unlink(&mut self, i: usize) -> (usize, usize) {
        let (p, n) = (self.prev[i], self.next[i]);
        self.next[p] = n;
        self.prev[n] = p;
        (p, n)
    }

    fn area(&self, points: &[Coord], i: usize) -> f64 {
        triangle_area(points[self.prev[i]], points[i], points[self.next[i]])
    }
}

/// Input positions eligible for removal.
fn is_candidate(i: usize, n: usize, kind: PathKind) -> bool {
    match kind {
        PathKind::Line => i != 0 && i + 1 != n,
        PathKind::Ring => true,
    }
}

/// Strict "comes before" ordering on `(area, index)` used by both variants.
fn precedes(area_a: f64, index_a: usize, area_b: f64, index_b: usize) -> bool {
    area_a.total_cmp(&area_b).then(index_a.cmp(&index_b)) == std::cmp::Ordering::Less
}

/// Shared target handling for both variants.
fn simplify_with<E: Eliminate>(
    engine: &E,
    name: &'static str,
    points: &[Coord],
    kind: PathKind,
    target: Target,
) -> Result<Vec<Coord>> {
    let Some(request) = prepare(points, kind, target)? else {
        return Ok(points.to_vec());
    };
    let budget = match request {
        Request::Count(count) => Budget::Remove(points.len() - count),
        Request::Tolerance(tol) => Budget::BelowArea(tol),
    };

    let mut keep = vec![true; points.len()];
    let removals = engine.eliminate(points, kind, budget);
    for r in &removals {
        keep[r.index] = false;
    }
    let out = collect_kept(points, &keep);
    trace!(
        input = points.len(),
        output = out.len(),
        ?kind,
        variant = name,
        "visvalingam simplified"
    );
    Ok(out)
}
