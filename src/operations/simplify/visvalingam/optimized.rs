use super::heap::IndexedMinHeap;
use super::{
    full_order, is_candidate, simplify_with, Budget, Eliminate, EliminationOrder, Links, Removal,
};
use crate::error::Result;
use crate::geometry::Coord;
use crate::operations::simplify::{PathKind, Simplifier, Target};

/// Visvalingam-Whyatt over an indexed binary heap. O(n log n).
///
/// Produces the same removal order as
/// [`VisvalingamNaive`](super::VisvalingamNaive) for every input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisvalingamHeap;

impl Simplifier for VisvalingamHeap {
    fn name(&self) -> &'static str {
        "visvalingam-heap"
    }

    fn simplify(&self, points: &[Coord], kind: PathKind, target: Target) -> Result<Vec<Coord>> {
        simplify_with(self, self.name(), points, kind, target)
    }
}

impl EliminationOrder for VisvalingamHeap {
    fn removal_order(&self, points: &[Coord], kind: PathKind) -> Result<Vec<Removal>> {
        full_order(self, points, kind)
    }
}

impl Eliminate for VisvalingamHeap {
    fn eliminate(&self, points: &[Coord], kind: PathKind, budget: Budget) -> Vec<Removal> {
        let n = points.len();
        let mut links = Links::new(n, kind);
        let mut heap = IndexedMinHeap::with_capacity(n);
        for i in (0..n).filter(|&i| is_candidate(i, n, kind)) {
            heap.push(i, links.area(points, i));
        }

        let mut remaining = n;
        let mut removals = Vec::new();
        while remaining > kind.min_points() {
            let Some((_, removed_area)) = heap.peek() else {
                break;
            };
            if !budget.allows(removals.len(), removed_area) {
                break;
            }
            let Some((victim, _)) = heap.pop() else {
                break;
            };
            remaining -= 1;
            removals.push(Removal {
                index: victim,
                area: removed_area,
            });

            let (p, q) = links.unlink(victim);
            for nb in [p, q] {
                heap.update(nb, links.area(points, nb).max(removed_area));
            }
        }
        removals
    }
}
