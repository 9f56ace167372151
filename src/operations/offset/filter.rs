use std::collections::HashMap;

use super::slice::Slice;
use crate::geometry::Coord;
use crate::math::cross;
use crate::math::polygon_2d::{left_normal, segment_direction};

/// Keeps the slices that bound the region covered with positive winding by
/// the raw rings: positive winding on their left and none on their right.
///
/// Every raw ring carries its material on the left, so the kept slices run
/// counter-clockwise around the result and clockwise around its holes.
/// Coincident slices (same nodes, same path) are kept once.
pub(super) fn apply<'a>(
    slices: &'a [Slice],
    raw: &[Vec<Coord>],
    distance: f64,
    scale: f64,
    node_tol: f64,
) -> Vec<&'a Slice> {
    let winding = WindingIndex::new(raw);
    let mut kept: Vec<&Slice> = Vec::new();
    let mut by_nodes: HashMap<(usize, usize), Vec<usize>> = HashMap::new();
    for slice in slices {
        let Some((left, right)) = probes(slice, distance, scale) else {
            continue;
        };
        if winding.at(left) <= 0 || winding.at(right) > 0 {
            continue;
        }
        let twins = by_nodes.entry((slice.start, slice.end)).or_default();
        if twins.iter().any(|&k| coincident(kept[k], slice, node_tol)) {
            continue;
        }
        twins.push(kept.len());
        kept.push(slice);
    }
    kept
}

/// Two points just left and right of the midpoint of the slice's longest
/// segment.
fn probes(slice: &Slice, distance: f64, scale: f64) -> Option<(Coord, Coord)> {
    let (a, b) = slice
        .coords
        .windows(2)
        .map(|w| (w[0], w[1]))
        .fold(None, |best: Option<(Coord, Coord)>, (a, b)| match best {
            Some((ba, bb)) if ba.distance(bb) >= a.distance(b) => best,
            _ => Some((a, b)),
        })?;
    let dir = segment_direction(a, b)?;
    let delta = (scale * 1e-7)
        .min(distance.abs() * 1e-3)
        .min(a.distance(b) * 0.25);
    let side = left_normal(&dir) * delta;
    let mid = a.midpoint(b);
    Some((mid.offset_by(&side), mid.offset_by(&-side)))
}

/// Raw ring edges bucketed by horizontal band, so the winding number of a
/// point only visits the edges whose y range can contain it.
///
/// The band height is at least the mean edge height, which keeps the total
/// number of bucket entries linear in the edge count.
#[derive(Debug)]
struct WindingIndex {
    origin: f64,
    band: f64,
    bands: HashMap<i64, Vec<(Coord, Coord)>>,
}

impl WindingIndex {
    fn new(raw: &[Vec<Coord>]) -> Self {
        let edges: Vec<(Coord, Coord)> = raw
            .iter()
            .flat_map(|ring| {
                let n = ring.len();
                (0..n).map(move |i| (ring[i], ring[(i + 1) % n]))
            })
            .collect();

        let (lo, hi) = edges.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), (a, _)| {
            (lo.min(a.y), hi.max(a.y))
        });
        #[allow(clippy::cast_precision_loss)]
        let count = edges.len().max(1) as f64;
        let mean_height = edges.iter().map(|(a, b)| (b.y - a.y).abs()).sum::<f64>() / count;
        let band = ((hi - lo) / count).max(mean_height);

        let mut index = Self {
            origin: if lo.is_finite() { lo } else { 0.0 },
            band: if band.is_finite() && band > 0.0 { band } else { 1.0 },
            bands: HashMap::new(),
        };
        for (a, b) in edges {
            let first = index.band_of(a.y.min(b.y));
            let last = index.band_of(a.y.max(b.y));
            for key in first..=last {
                index.bands.entry(key).or_default().push((a, b));
            }
        }
        index
    }

    #[allow(clippy::cast_possible_truncation)]
    fn band_of(&self, y: f64) -> i64 {
        ((y - self.origin) / self.band).floor() as i64
    }

    /// Non-zero winding number of all raw rings around `p`.
    fn at(&self, p: Coord) -> i32 {
        let Some(edges) = self.bands.get(&self.band_of(p.y)) else {
            return 0;
        };
        let mut wn = 0;
        for &(a, b) in edges {
            let side = cross(&(b - a), &(p - a));
            if a.y <= p.y {
                if b.y > p.y && side > 0.0 {
                    wn += 1;
                }
            } else if b.y <= p.y && side < 0.0 {
                wn -= 1;
            }
        }
        wn
    }
}

fn coincident(a: &Slice, b: &Slice, tol: f64) -> bool {
    a.start == b.start
        && a.end == b.end
        && a.coords.len() == b.coords.len()
        && a.coords
            .iter()
            .zip(&b.coords)
            .all(|(p, q)| p.distance(*q) <= tol)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::coord::coords;
    use crate::math::polygon_2d::winding_number;
    use crate::operations::offset::{intersect, slice};

    fn run(raw: &[Vec<Coord>]) -> Vec<Slice> {
        let splits = intersect::find_all(raw);
        let slices = slice::build(raw, &splits, 1e-9);
        apply(&slices, raw, 1.0, 10.0, 1e-9)
            .into_iter()
            .cloned()
            .collect()
    }

    #[test]
    fn banded_winding_matches_full_scan() {
        let star: Vec<Coord> = (0..240)
            .map(|i| {
                let angle = std::f64::consts::TAU * f64::from(i) / 240.0;
                let r = if i % 2 == 0 { 10.0 } else { 6.0 } + f64::from(i % 7) * 0.3;
                Coord::new(r * angle.cos(), r * angle.sin())
            })
            .collect();
        let mut hole = coords(&[(-2.0, -2.0), (2.0, -2.0), (2.0, 2.0), (-2.0, 2.0)]);
        hole.reverse();
        let raw = vec![star, hole, coords(&[(0.0, 0.0), (30.0, 0.0), (30.0, 0.0), (0.0, 0.5)])];
        let index = WindingIndex::new(&raw);
        for gx in -60..=60 {
            for gy in -60..=60 {
                let p = Coord::new(f64::from(gx) * 0.21 + 0.013, f64::from(gy) * 0.19 + 0.007);
                let full: i32 = raw.iter().map(|r| winding_number(p, r)).sum();
                assert_eq!(index.at(p), full, "at {p:?}");
            }
        }
    }

    #[test]
    fn counter_clockwise_ring_is_kept() {
        let raw = vec![coords(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)])];
        assert_eq!(run(&raw).len(), 1);
    }

    #[test]
    fn clockwise_ring_alone_is_dropped() {
        let raw = vec![coords(&[(0.0, 0.0), (0.0, 4.0), (4.0, 4.0), (4.0, 0.0)])];
        assert!(run(&raw).is_empty());
    }

    #[test]
    fn bow_tie_keeps_positive_lobe_only() {
        // Left lobe runs counter-clockwise, right lobe clockwise.
        let raw = vec![coords(&[(0.0, 0.0), (4.0, 4.0), (4.0, 0.0), (0.0, 4.0)])];
        let kept = run(&raw);
        assert_eq!(kept.len(), 1);
        assert!(kept[0].coords.iter().all(|c| c.x <= 2.0));
    }

    #[test]
    fn overlap_keeps_outer_boundary() {
        let raw = vec![
            coords(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)]),
            coords(&[(2.0, 2.0), (6.0, 2.0), (6.0, 6.0), (2.0, 6.0)]),
        ];
        let kept = run(&raw);
        assert_eq!(kept.len(), 2);
        assert!(kept
            .iter()
            .all(|s| !s.coords.contains(&Coord::new(4.0, 4.0))));
    }

    #[test]
    fn doubled_ring_kept_once() {
        // The copies cut each other at every vertex: four edges survive.
        let raw = vec![
            coords(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)]),
            coords(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)]),
        ];
        let kept = run(&raw);
        assert_eq!(kept.len(), 4);
        assert!(kept.iter().all(|s| s.coords.len() == 2));
    }
}
