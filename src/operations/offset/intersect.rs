use crate::geometry::Coord;
use crate::math::intersect_2d::segment_contacts_2d;
use crate::math::TOLERANCE;

/// A place where a ring has to be cut: position `t` along segment `seg`
/// of ring `ring`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Split {
    pub ring: usize,
    pub seg: usize,
    /// Parameter in `[0, 1)`; a contact at the very end of a segment is
    /// recorded as `t = 0` on the following one.
    pub t: f64,
    pub point: Coord,
}

/// A segment tagged with its ring and position for the sweep.
struct SweepSeg {
    ring: usize,
    seg: usize,
    a: Coord,
    b: Coord,
    min_x: f64,
    max_x: f64,
}

/// One contact point seen from both segments involved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Contact {
    pub first: Split,
    pub second: Split,
}

/// Every contact as two splits, one per segment involved.
pub(crate) fn find_all(rings: &[Vec<Coord>]) -> Vec<Split> {
    find_contacts(rings)
        .into_iter()
        .flat_map(|c| [c.first, c.second])
        .collect()
}

/// Finds every contact between every pair of segments of all `rings`.
///
/// Crossings, touches and the end points of collinear overlaps are all
/// reported. The shared vertex of two consecutive segments of the same
/// ring is not a contact.
pub(crate) fn find_contacts(rings: &[Vec<Coord>]) -> Vec<Contact> {
    let mut segs: Vec<SweepSeg> = rings
        .iter()
        .enumerate()
        .flat_map(|(ring, coords)| {
            let n = coords.len();
            (0..n).map(move |seg| {
                let a = coords[seg];
                let b = coords[(seg + 1) % n];
                SweepSeg {
                    ring,
                    seg,
                    a,
                    b,
                    min_x: a.x.min(b.x),
                    max_x: a.x.max(b.x),
                }
            })
        })
        .collect();
    segs.sort_by(|l, r| l.min_x.total_cmp(&r.min_x));

    let mut contacts = Vec::new();
    for (i, s) in segs.iter().enumerate() {
        for o in &segs[i + 1..] {
            if o.min_x > s.max_x + TOLERANCE {
                break;
            }
            if s.a.y.max(s.b.y) + TOLERANCE < o.a.y.min(o.b.y)
                || o.a.y.max(o.b.y) + TOLERANCE < s.a.y.min(s.b.y)
            {
                continue;
            }

            let shared = shared_vertex(rings, s, o);
            for c in segment_contacts_2d(s.a, s.b, o.a, o.b) {
                if shared == Some(c.point) {
                    continue;
                }
                contacts.push(Contact {
                    first: split_at(rings, s.ring, s.seg, c.t, c.point),
                    second: split_at(rings, o.ring, o.seg, c.u, c.point),
                });
            }
        }
    }
    contacts
}

/// The vertex joining two consecutive segments of one ring.
fn shared_vertex(rings: &[Vec<Coord>], s: &SweepSeg, o: &SweepSeg) -> Option<Coord> {
    if s.ring != o.ring {
        return None;
    }
    let n = rings[s.ring].len();
    if (s.seg + 1) % n == o.seg {
        Some(o.a)
    } else if (o.seg + 1) % n == s.seg {
        Some(s.a)
    } else {
        None
    }
}

fn split_at(rings: &[Vec<Coord>], ring: usize, seg: usize, t: f64, point: Coord) -> Split {
    if t >= 1.0 {
        let n = rings[ring].len();
        Split {
            ring,
            seg: (seg + 1) % n,
            t: 0.0,
            point,
        }
    } else {
        Split {
            ring,
            seg,
            t,
            point,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::coord::coords;

    #[test]
    fn simple_ring_has_no_contacts() {
        let rings = vec![coords(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)])];
        assert!(find_all(&rings).is_empty());
    }

    #[test]
    fn bow_tie_crosses_once() {
        let rings = vec![coords(&[(0.0, 0.0), (4.0, 4.0), (4.0, 0.0), (0.0, 4.0)])];
        let splits = find_all(&rings);
        assert_eq!(splits.len(), 2);
        assert!(splits.iter().all(|s| s.point == Coord::new(2.0, 2.0)));
        let mut segs: Vec<usize> = splits.iter().map(|s| s.seg).collect();
        segs.sort_unstable();
        assert_eq!(segs, vec![0, 2]);
    }

    #[test]
    fn overlapping_squares_cross_twice() {
        let rings = vec![
            coords(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)]),
            coords(&[(2.0, 2.0), (6.0, 2.0), (6.0, 6.0), (2.0, 6.0)]),
        ];
        let splits = find_all(&rings);
        assert_eq!(splits.len(), 4);
        assert!(splits.iter().any(|s| s.point == Coord::new(4.0, 2.0)));
        assert!(splits.iter().any(|s| s.point == Coord::new(2.0, 4.0)));
    }

    #[test]
    fn end_contact_moves_to_next_segment() {
        // Ring 1 touches ring 0's vertex (4, 0) with the interior of an edge.
        let rings = vec![
            coords(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0)]),
            coords(&[(3.0, -1.0), (5.0, 1.0), (5.0, -1.0)]),
        ];
        let splits = find_all(&rings);
        let on_ring0: Vec<&Split> = splits.iter().filter(|s| s.ring == 0).collect();
        assert!(on_ring0
            .iter()
            .any(|s| s.seg == 1 && s.t.abs() < f64::EPSILON && s.point == Coord::new(4.0, 0.0)));
    }

    #[test]
    fn backtracking_spike_reports_far_end() {
        // Segment 1 runs back over segment 0 up to x = 2.
        let rings = vec![coords(&[(0.0, 0.0), (4.0, 0.0), (2.0, 0.0), (2.0, 3.0)])];
        let splits = find_all(&rings);
        assert!(splits.iter().any(|s| s.point == Coord::new(2.0, 0.0) && s.seg == 0));
    }
}
