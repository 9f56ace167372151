use std::collections::HashMap;

use super::intersect::Split;
use crate::geometry::Coord;

/// A piece of a raw ring running from one node to the next.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct Slice {
    pub start: usize,
    pub end: usize,
    /// Includes both end points; they sit exactly on their node positions.
    pub coords: Vec<Coord>,
}

impl Slice {
    pub(super) fn is_closed(&self) -> bool {
        self.start == self.end
    }
}

/// Cuts every raw ring at its splits.
///
/// Split points closer than `node_tol` are merged into one node so slices
/// from different rings meet on identical ids and coordinates. A ring
/// without splits becomes a single closed slice. Zero-length pieces
/// between coincident cuts are dropped.
pub(super) fn build(rings: &[Vec<Coord>], splits: &[Split], node_tol: f64) -> Vec<Slice> {
    let mut nodes = NodeMerger::new(node_tol);
    let mut per_ring: Vec<Vec<(usize, f64, usize)>> = vec![Vec::new(); rings.len()];
    for s in splits {
        let node = nodes.get_or_insert(s.point);
        per_ring[s.ring].push((s.seg, s.t, node));
    }

    let mut slices = Vec::new();
    for (ring, mut cuts) in rings.iter().zip(per_ring) {
        if cuts.is_empty() {
            let node = nodes.get_or_insert(ring[0]);
            cuts.push((0, 0.0, node));
        }
        cuts.sort_by(|a, b| a.0.cmp(&b.0).then(a.1.total_cmp(&b.1)));
        cuts.dedup_by_key(|c| (c.0, c.2));

        let k = cuts.len();
        for i in 0..k {
            let from = cuts[i];
            let to = cuts[(i + 1) % k];
            let slice = walk(ring, &nodes, from, to, k == 1);
            let degenerate = if slice.is_closed() {
                slice.coords.len() < 4
            } else {
                slice.coords.len() < 2
            };
            if !degenerate {
                slices.push(slice);
            }
        }
    }
    slices
}

/// Collects the ring from cut `from` forward to cut `to`.
fn walk(
    ring: &[Coord],
    nodes: &NodeMerger,
    from: (usize, f64, usize),
    to: (usize, f64, usize),
    full_turn: bool,
) -> Slice {
    let n = ring.len();
    let (seg_a, t_a, node_a) = from;
    let (seg_b, t_b, node_b) = to;
    let forward = seg_b > seg_a || (seg_b == seg_a && t_b > t_a);
    let steps = if forward && !full_turn {
        seg_b - seg_a
    } else {
        seg_b + n - seg_a
    };

    let mut coords = vec![nodes.position(node_a)];
    for step in 1..=steps {
        // The vertex at `seg_b` is the end point itself when `t_b` is zero.
        if step == steps && t_b <= 0.0 {
            break;
        }
        push_distinct(&mut coords, ring[(seg_a + step) % n]);
    }
    push_distinct(&mut coords, nodes.position(node_b));

    Slice {
        start: node_a,
        end: node_b,
        coords,
    }
}

fn push_distinct(coords: &mut Vec<Coord>, c: Coord) {
    if coords.last() != Some(&c) {
        coords.push(c);
    }
}

/// Spatial hash that hands out one id per location, merging points closer
/// than the cell size.
#[derive(Debug)]
pub(super) struct NodeMerger {
    cell_size: f64,
    cells: HashMap<(i64, i64), Vec<usize>>,
    positions: Vec<Coord>,
}

impl NodeMerger {
    pub(super) fn new(cell_size: f64) -> Self {
        Self {
            cell_size: cell_size.max(f64::MIN_POSITIVE),
            cells: HashMap::new(),
            positions: Vec::new(),
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn cell_key(&self, p: Coord) -> (i64, i64) {
        let inv = 1.0 / self.cell_size;
        ((p.x * inv).floor() as i64, (p.y * inv).floor() as i64)
    }

    /// Id of the node within `cell_size` of `p`, created if none exists.
    pub(super) fn get_or_insert(&mut self, p: Coord) -> usize {
        let (cx, cy) = self.cell_key(p);
        for dx in -1..=1 {
            for dy in -1..=1 {
                if let Some(ids) = self.cells.get(&(cx + dx, cy + dy)) {
                    for &id in ids {
                        if self.positions[id].distance(p) <= self.cell_size {
                            return id;
                        }
                    }
                }
            }
        }
        let id = self.positions.len();
        self.positions.push(p);
        self.cells.entry((cx, cy)).or_default().push(id);
        id
    }

    pub(super) fn position(&self, id: usize) -> Coord {
        self.positions[id]
    }
}
