use super::{
    full_order, is_candidate, precedes, simplify_with, Budget, Eliminate, EliminationOrder, Links,
    Removal,
};
use crate::error::Result;
use crate::geometry::Coord;
use crate::operations::simplify::{PathKind, Simplifier, Target};

/// Reference Visvalingam-Whyatt: every removal rescans all remaining
/// candidates for the minimum effective area. O(n²).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisvalingamNaive;

impl Simplifier for VisvalingamNaive {
    fn name(&self) -> &'static str {
        "visvalingam-naive"
    }

    fn simplify(&self, points: &[Coord], kind: PathKind, target: Target) -> Result<Vec<Coord>> {
        simplify_with(self, self.name(), points, kind, target)
    }
}

impl EliminationOrder for VisvalingamNaive {
    fn removal_order(&self, points: &[Coord], kind: PathKind) -> Result<Vec<Removal>> {
        full_order(self, points, kind)
    }
}

impl Eliminate for VisvalingamNaive {
    fn eliminate(&self, points: &[Coord], kind: PathKind, budget: Budget) -> Vec<Removal> {
        let n = points.len();
        let mut links = Links::new(n, kind);
        let mut alive: Vec<bool> = (0..n).map(|i| is_candidate(i, n, kind)).collect();
        let mut area: Vec<f64> = (0..n)
            .map(|i| if alive[i] { links.area(points, i) } else { 0.0 })
            .collect();

        let mut remaining = n;
        let mut removals = Vec::new();
        while remaining > kind.min_points() {
            let Some(victim) = lowest(&alive, &area) else {
                break;
            };
            let removed_area = area[victim];
            if !budget.allows(removals.len(), removed_area) {
                break;
            }

            alive[victim] = false;
            remaining -= 1;
            removals.push(Removal {
                index: victim,
                area: removed_area,
            });

            let (p, q) = links.unlink(victim);
            for nb in [p, q] {
                if alive[nb] {
                    area[nb] = links.area(points, nb).max(removed_area);
                }
            }
        }
        removals
    }
}

/// Scan for the live candidate with the smallest `(area, index)`.
fn lowest(alive: &[bool], area: &[f64]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for i in (0..alive.len()).filter(|&i| alive[i]) {
        if best.map_or(true, |b| precedes(area[i], i, area[b], b)) {
            best = Some(i);
        }
    }
    best
}
