use slotmap::SlotMap;
use tracing::debug;

use crate::geometry::{Coord, MultiPolygon, Polygon, Ring};
use crate::math::polygon_2d::{point_in_ring, rotate_to_canonical_start, signed_area_2d};
use crate::math::cross;

slotmap::new_key_type! {
    /// Key of a ring in the assembly arena.
    pub(super) struct RingKey;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RingRole {
    Exterior,
    Hole,
}

#[derive(Debug)]
struct ArenaRing {
    coords: Vec<Coord>,
    role: RingRole,
    area: f64,
    /// Exterior a hole belongs to.
    parent: Option<RingKey>,
}

/// Groups stitched rings into polygons.
///
/// Counter-clockwise rings become exteriors and clockwise rings holes.
/// Each hole goes to the smallest exterior that contains it; holes with no
/// containing exterior are dropped.
pub(super) fn build(rings: Vec<Vec<Coord>>, tol: f64) -> MultiPolygon {
    let mut arena: SlotMap<RingKey, ArenaRing> = SlotMap::with_key();
    let mut order: Vec<RingKey> = Vec::new();
    for coords in rings {
        let coords = clean_ring(coords, tol);
        if coords.len() < 3 {
            continue;
        }
        let signed = signed_area_2d(&coords);
        if signed.abs() <= tol * tol {
            continue;
        }
        let role = if signed > 0.0 {
            RingRole::Exterior
        } else {
            RingRole::Hole
        };
        order.push(arena.insert(ArenaRing {
            coords,
            role,
            area: signed.abs(),
            parent: None,
        }));
    }

    let exteriors: Vec<RingKey> = order
        .iter()
        .copied()
        .filter(|&k| arena[k].role == RingRole::Exterior)
        .collect();
    let holes: Vec<RingKey> = order
        .iter()
        .copied()
        .filter(|&k| arena[k].role == RingRole::Hole)
        .collect();

    for hole in holes {
        let probe = interior_probe(&arena[hole].coords);
        let parent = exteriors
            .iter()
            .copied()
            .filter(|&e| point_in_ring(probe, &arena[e].coords))
            .min_by(|&a, &b| arena[a].area.total_cmp(&arena[b].area));
        if parent.is_none() {
            debug!(points = arena[hole].coords.len(), "dropping hole outside every exterior");
        }
        arena[hole].parent = parent;
    }

    exteriors
        .iter()
        .map(|&e| {
            let holes = order
                .iter()
                .filter(|&&h| arena[h].parent == Some(e))
                .map(|&h| Ring::new(rotate_to_canonical_start(&arena[h].coords)))
                .collect();
            Polygon::new(
                Ring::new(rotate_to_canonical_start(&arena[e].coords)),
                holes,
            )
        })
        .collect()
}

/// Midpoint of the longest edge: on the ring, and inside whatever
/// exterior surrounds it.
fn interior_probe(coords: &[Coord]) -> Coord {
    let n = coords.len();
    let mut best = (coords[0], coords[0]);
    let mut best_len = -1.0;
    for i in 0..n {
        let (a, b) = (coords[i], coords[(i + 1) % n]);
        let len = a.distance(b);
        if len > best_len {
            best = (a, b);
            best_len = len;
        }
    }
    best.0.midpoint(best.1)
}

/// Drops near-duplicate points, collinear points and zero-width spikes.
fn clean_ring(mut pts: Vec<Coord>, tol: f64) -> Vec<Coord> {
    loop {
        let n = pts.len();
        if n < 3 {
            return pts;
        }
        let mut out: Vec<Coord> = Vec::with_capacity(n);
        for i in 0..n {
            let p = pts[i];
            let prev = out.last().copied().unwrap_or(pts[n - 1]);
            let next = pts[(i + 1) % n];
            if !is_redundant(prev, p, next, tol) {
                out.push(p);
            }
        }
        if out.len() == n {
            return out;
        }
        pts = out;
    }
}

fn is_redundant(prev: Coord, p: Coord, next: Coord, tol: f64) -> bool {
    if p.distance(prev) <= tol || p.distance(next) <= tol {
        return true;
    }
    // On the chord line is redundant both inside the chord and beyond it,
    // where p is the tip of a zero-width spike.
    let chord = next - prev;
    let len = chord.norm();
    len <= tol || cross(&chord, &(p - prev)).abs() / len <= tol
}
