use std::collections::HashMap;

use tracing::debug;

use super::slice::Slice;
use crate::geometry::Coord;

/// Chains kept slices end to start, by node id, into closed rings.
///
/// At a node with several outgoing slices the first unused one is taken.
/// Whenever a chain comes back to a node it already passed through, the
/// loop since that node is cut off as its own ring, so every returned ring
/// visits each node once. Chains that cannot be closed are discarded.
pub(super) fn connect(slices: &[&Slice], tol: f64) -> Vec<Vec<Coord>> {
    let mut outgoing: HashMap<usize, Vec<usize>> = HashMap::new();
    for (i, s) in slices.iter().enumerate() {
        outgoing.entry(s.start).or_default().push(i);
    }
    let mut used = vec![false; slices.len()];
    let mut rings = Vec::new();

    for first in 0..slices.len() {
        if used[first] {
            continue;
        }
        used[first] = true;

        // `visits` holds (node, index into `coords`) for every node on the
        // open chain; `on_chain` maps a node to its entry in `visits`.
        let mut coords: Vec<Coord> = slices[first].coords.clone();
        let mut visits: Vec<(usize, usize)> = vec![(slices[first].start, 0)];
        let mut on_chain: HashMap<usize, usize> = HashMap::from([(slices[first].start, 0)]);
        let mut node = slices[first].end;

        loop {
            if let Some(&pos) = on_chain.get(&node) {
                let at = visits[pos].1;
                let anchor = coords[at];
                let mut ring = coords.split_off(at);
                ring.pop();
                coords.push(anchor);
                for (dropped, _) in visits.drain(pos + 1..) {
                    on_chain.remove(&dropped);
                }
                rings.push(ring);
            } else {
                on_chain.insert(node, visits.len());
                visits.push((node, coords.len() - 1));
            }
            if coords.len() == 1 && visits.len() == 1 && next_unused(&outgoing, &used, node).is_none()
            {
                break;
            }

            let Some(next) = next_unused(&outgoing, &used, node) else {
                debug!(
                    points = coords.len(),
                    node, "discarding boundary chain that does not close"
                );
                break;
            };
            used[next] = true;
            append(&mut coords, &slices[next].coords, tol);
            node = slices[next].end;
        }
    }
    rings
}

fn next_unused(outgoing: &HashMap<usize, Vec<usize>>, used: &[bool], node: usize) -> Option<usize> {
    outgoing
        .get(&node)
        .and_then(|c| c.iter().copied().find(|&i| !used[i]))
}

/// Appends a slice that starts where `coords` ends.
fn append(coords: &mut Vec<Coord>, slice: &[Coord], tol: f64) {
    let skip = usize::from(
        matches!((coords.last(), slice.first()), (Some(a), Some(b)) if a.distance(*b) <= tol),
    );
    coords.extend_from_slice(&slice[skip..]);
}
