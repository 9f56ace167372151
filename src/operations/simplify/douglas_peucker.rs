use tracing::trace;

use super::{collect_kept, prepare, PathKind, Request, Simplifier, Target};
use crate::error::{OperationError, Result};
use crate::geometry::{Bounds, Coord};
use crate::math::distance_2d::point_to_segment_dist;

/// Douglas-Peucker simplification.
///
/// Within an index range the point farthest from the chord joining the
/// range's end points is kept when its distance exceeds the tolerance, and
/// both halves are processed in turn; otherwise the whole range collapses
/// to its end points. Ties on the farthest distance go to the lowest index.
///
/// Count targets are not native to the algorithm. They are met by a
/// bisection over tolerance values that stops at the smallest tolerance
/// whose result has at most the requested number of points. Equal
/// distances can remove several points at once, so the result may hold
/// fewer points than asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DouglasPeucker {
    /// Bisection steps used for count targets. Must be at least 1 when a
    /// count target is requested.
    pub search_iterations: u32,
}

impl Default for DouglasPeucker {
    fn default() -> Self {
        Self {
            search_iterations: 64,
        }
    }
}

impl Simplifier for DouglasPeucker {
    fn name(&self) -> &'static str {
        "douglas-peucker"
    }

    fn simplify(&self, points: &[Coord], kind: PathKind, target: Target) -> Result<Vec<Coord>> {
        let Some(request) = prepare(points, kind, target)? else {
            return Ok(points.to_vec());
        };

        let keep = match request {
            Request::Tolerance(tol) => keep_mask(points, kind, tol),
            Request::Count(_) if self.search_iterations == 0 => {
                return Err(OperationError::InvalidInput(
                    "count targets need at least one search iteration".to_owned(),
                )
                .into());
            }
            Request::Count(count) => self.search_count(points, kind, count),
        };
        let out = collect_kept(points, &keep);
        trace!(
            input = points.len(),
            output = out.len(),
            ?kind,
            "douglas-peucker simplified"
        );
        Ok(out)
    }
}

impl DouglasPeucker {
    /// Bisects tolerance values until the kept count reaches `count` or the
    /// interval is exhausted.
    ///
    /// The kept count never grows as the tolerance grows (the split tree
    /// does not depend on the tolerance), so bisection is sound.
    fn search_count(&self, points: &[Coord], kind: PathKind, count: usize) -> Vec<bool> {
        let at_zero = keep_mask(points, kind, 0.0);
        if kept_count(&at_zero) <= count {
            return at_zero;
        }

        // No distance can exceed the diagonal of the bounds, so this
        // tolerance collapses everything to the structural minimum.
        let mut lo = 0.0;
        let mut hi = Bounds::from_coords(points).map_or(0.0, |b| b.size());
        let mut best = keep_mask(points, kind, hi);

        for _ in 0..self.search_iterations {
            let mid = lo + (hi - lo) * 0.5;
            if mid <= lo || mid >= hi {
                break;
            }
            let mask = keep_mask(points, kind, mid);
            let n = kept_count(&mask);
            if n <= count {
                hi = mid;
                best = mask;
                if n == count {
                    break;
                }
            } else {
                lo = mid;
            }
        }
        best
    }
}

fn kept_count(mask: &[bool]) -> usize {
    mask.iter().filter(|&&k| k).count()
}

/// Marks the points kept at `tolerance`.
fn keep_mask(points: &[Coord], kind: PathKind, tolerance: f64) -> Vec<bool> {
    let n = points.len();
    let mut keep = vec![false; n];
    match kind {
        PathKind::Line => {
            keep[0] = true;
            keep[n - 1] = true;
            let at = |i: usize| points[i];
            reduce_ranges(&at, &mut keep, vec![(0, n - 1)], tolerance);
        }
        PathKind::Ring => {
            // Anchor at 0 and the point farthest from it; index `n` stands
            // for the wrap-around back to 0.
            let at = |i: usize| points[i % n];
            let anchor = farthest_from(points, points[0]);
            keep[0] = true;
            keep[anchor] = true;
            let mut ext = vec![false; n + 1];
            ext[..n].copy_from_slice(&keep);
            let ranges = vec![(0, anchor), (anchor, n)];
            reduce_ranges(&at, &mut ext, ranges.clone(), tolerance);
            keep.copy_from_slice(&ext[..n]);
            ensure_ring_minimum(&at, &mut keep, &ranges);
        }
    }
    keep
}

/// Douglas-Peucker over an explicit stack of index ranges.
fn reduce_ranges(
    at: &dyn Fn(usize) -> Coord,
    keep: &mut [bool],
    mut stack: Vec<(usize, usize)>,
    tolerance: f64,
) {
    while let Some((start, end)) = stack.pop() {
        if end <= start + 1 {
            continue;
        }
        let (idx, dist) = farthest_in_range(at, start, end);
        if dist > tolerance {
            keep[idx] = true;
            stack.push((idx, end));
            stack.push((start, idx));
        }
    }
}

/// Index and distance of the point in `(start, end)` farthest from the
/// chord `start`–`end`, lowest index first on ties.
fn farthest_in_range(at: &dyn Fn(usize) -> Coord, start: usize, end: usize) -> (usize, f64) {
    let a = at(start);
    let b = at(end);
    let mut best = (start + 1, -1.0);
    for i in (start + 1)..end {
        let d = point_to_segment_dist(at(i), a, b);
        if d > best.1 {
            best = (i, d);
        }
    }
    best
}

fn farthest_from(points: &[Coord], origin: Coord) -> usize {
    let mut best = (0, -1.0);
    for (i, &p) in points.iter().enumerate() {
        let d = p.distance(origin);
        if d > best.1 {
            best = (i, d);
        }
    }
    best.0
}

/// A ring must keep three points. When only the two anchors survive, the
/// farthest remaining point from either anchor chord is added back; fully
/// coincident rings fall back to the lowest unused indices.
fn ensure_ring_minimum(at: &dyn Fn(usize) -> Coord, keep: &mut [bool], ranges: &[(usize, usize)]) {
    let n = keep.len();
    if kept_count(keep) >= 3 {
        return;
    }
    let mut best: Option<(usize, f64)> = None;
    for &(start, end) in ranges {
        if end <= start + 1 {
            continue;
        }
        let (idx, dist) = farthest_in_range(at, start, end);
        if best.map_or(true, |(_, d)| dist > d) {
            best = Some((idx % n, dist));
        }
    }
    if let Some((idx, _)) = best {
        keep[idx] = true;
    }
    for i in 0..n {
        if kept_count(keep) >= 3 {
            break;
        }
        keep[i] = true;
    }
}
