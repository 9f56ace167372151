use super::{cross, Vector2, TOLERANCE};
use crate::geometry::Coord;

/// Parameter-space slack used when deciding whether a contact lies on a
/// segment end point.
pub const PARAM_EPS: f64 = 1e-9;

/// A contact point between two segments `a0→a1` and `b0→b1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentContact {
    pub point: Coord,
    /// Parameter along segment `a` in `[0, 1]`.
    pub t: f64,
    /// Parameter along segment `b` in `[0, 1]`.
    pub u: f64,
}

/// Parametric 2D line-line intersection.
///
/// Given lines `p1 + t * d1` and `p2 + u * d2`, returns `(t, u)` if not parallel.
#[must_use]
pub fn line_line_intersect_2d(
    p1: Coord,
    d1: &Vector2,
    p2: Coord,
    d2: &Vector2,
) -> Option<(f64, f64)> {
    let denom = cross(d1, d2);
    if denom.abs() < TOLERANCE {
        return None;
    }
    let dp = p2 - p1;
    let t = cross(&dp, d2) / denom;
    let u = cross(&dp, d1) / denom;
    Some((t, u))
}

/// Bounded intersection of two non-parallel segments.
///
/// End point touches are included; a contact within [`PARAM_EPS`] of a
/// segment end reports that end point's exact coordinates.
#[must_use]
pub fn segment_segment_intersect_2d(
    a0: Coord,
    a1: Coord,
    b0: Coord,
    b1: Coord,
) -> Option<SegmentContact> {
    let da = a1 - a0;
    let db = b1 - b0;

    let denom = cross(&da, &db);
    if denom.abs() <= TOLERANCE * da.norm() * db.norm() {
        return None;
    }

    let dp = b0 - a0;
    let t = cross(&dp, &db) / denom;
    let u = cross(&dp, &da) / denom;

    if t < -PARAM_EPS || t > 1.0 + PARAM_EPS || u < -PARAM_EPS || u > 1.0 + PARAM_EPS {
        return None;
    }

    let (t, t_end) = snap_param(t);
    let (u, u_end) = snap_param(u);
    let point = match (t_end, u_end) {
        (Some(true), _) => a1,
        (Some(false), _) => a0,
        (None, Some(true)) => b1,
        (None, Some(false)) => b0,
        (None, None) => Coord::new(a0.x + da.x * t, a0.y + da.y * t),
    };
    Some(SegmentContact { point, t, u })
}

/// End points of the shared stretch of two collinear, overlapping segments.
///
/// Returns an empty vector when the segments are not collinear or only
/// meet outside each other.
#[must_use]
pub fn segment_overlap_2d(a0: Coord, a1: Coord, b0: Coord, b1: Coord) -> Vec<SegmentContact> {
    let da = a1 - a0;
    let db = b1 - b0;
    let len_a_sq = da.norm_squared();
    let len_b_sq = db.norm_squared();
    if len_a_sq < TOLERANCE * TOLERANCE || len_b_sq < TOLERANCE * TOLERANCE {
        return Vec::new();
    }

    let len_a = len_a_sq.sqrt();
    if cross(&da, &db).abs() > TOLERANCE * len_a * len_b_sq.sqrt() {
        return Vec::new();
    }
    // Collinear, not merely parallel.
    let scale = len_a.max(1.0);
    if cross(&da, &(b0 - a0)).abs() / len_a > TOLERANCE * scale * 100.0 {
        return Vec::new();
    }

    let param_on_a = |p: Coord| (p - a0).dot(&da) / len_a_sq;
    let param_on_b = |p: Coord| (p - b0).dot(&db) / len_b_sq;

    let mut contacts: Vec<SegmentContact> = Vec::with_capacity(4);
    let mut push = |c: SegmentContact| {
        if !contacts.iter().any(|e| e.point == c.point) {
            contacts.push(c);
        }
    };

    for (p, u) in [(b0, 0.0), (b1, 1.0)] {
        let t = param_on_a(p);
        if (-PARAM_EPS..=1.0 + PARAM_EPS).contains(&t) {
            let (t, _) = snap_param(t);
            push(SegmentContact { point: p, t, u });
        }
    }
    for (p, t) in [(a0, 0.0), (a1, 1.0)] {
        let u = param_on_b(p);
        if (-PARAM_EPS..=1.0 + PARAM_EPS).contains(&u) {
            let (u, _) = snap_param(u);
            push(SegmentContact { point: p, t, u });
        }
    }

    // Collinear segments meeting only end to end yield that single point.
    contacts
}

/// All contacts between two segments: a single crossing/touch, or the two
/// end points of a collinear overlap.
#[must_use]
pub fn segment_contacts_2d(a0: Coord, a1: Coord, b0: Coord, b1: Coord) -> Vec<SegmentContact> {
    match segment_segment_intersect_2d(a0, a1, b0, b1) {
        Some(c) => vec![c],
        None => segment_overlap_2d(a0, a1, b0, b1),
    }
}

/// Clamps a segment parameter to `[0, 1]`, reporting whether it sits on
/// the start (`Some(false)`) or end (`Some(true)`) point.
fn snap_param(t: f64) -> (f64, Option<bool>) {
    if t <= PARAM_EPS {
        (0.0, Some(false))
    } else if t >= 1.0 - PARAM_EPS {
        (1.0, Some(true))
    } else {
        (t, None)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn c(x: f64, y: f64) -> Coord {
        Coord::new(x, y)
    }

    #[test]
    fn line_line_perpendicular() {
        let (t, u) = line_line_intersect_2d(
            c(0.0, 0.0),
            &Vector2::new(1.0, 0.0),
            c(5.0, -5.0),
            &Vector2::new(0.0, 1.0),
        )
        .unwrap();
        assert!((t - 5.0).abs() < TOLERANCE);
        assert!((u - 5.0).abs() < TOLERANCE);
    }

    #[test]
    fn line_line_parallel_returns_none() {
        let r = line_line_intersect_2d(
            c(0.0, 0.0),
            &Vector2::new(1.0, 0.0),
            c(0.0, 1.0),
            &Vector2::new(1.0, 0.0),
        );
        assert!(r.is_none());
    }

    #[test]
    fn segment_segment_crossing() {
        let hit = segment_segment_intersect_2d(c(0.0, 0.0), c(2.0, 2.0), c(0.0, 2.0), c(2.0, 0.0))
            .unwrap();
        assert!((hit.point.x - 1.0).abs() < TOLERANCE);
        assert!((hit.point.y - 1.0).abs() < TOLERANCE);
        assert!((hit.t - 0.5).abs() < TOLERANCE);
        assert!((hit.u - 0.5).abs() < TOLERANCE);
    }

    #[test]
    fn segment_segment_no_crossing() {
        let hit = segment_segment_intersect_2d(c(0.0, 0.0), c(1.0, 0.0), c(0.0, 1.0), c(1.0, 2.0));
        assert!(hit.is_none());
    }

    #[test]
    fn segment_segment_end_touch_snaps_to_vertex() {
        // b ends exactly on the interior of a.
        let hit = segment_segment_intersect_2d(c(8.0, 2.0), c(8.0, 6.0), c(22.0, 4.0), c(8.0, 4.0))
            .unwrap();
        assert_eq!(hit.point, c(8.0, 4.0));
        assert!((hit.u - 1.0).abs() < f64::EPSILON);
        assert!((hit.t - 0.5).abs() < TOLERANCE);
    }

    #[test]
    fn collinear_overlap_reports_both_ends() {
        let contacts = segment_overlap_2d(c(8.0, 2.0), c(8.0, 6.0), c(8.0, 4.0), c(8.0, 8.0));
        assert_eq!(contacts.len(), 2);
        assert!(contacts.iter().any(|h| h.point == c(8.0, 4.0)));
        assert!(contacts.iter().any(|h| h.point == c(8.0, 6.0)));
    }

    #[test]
    fn parallel_offset_lines_do_not_overlap() {
        let contacts = segment_overlap_2d(c(0.0, 0.0), c(4.0, 0.0), c(0.0, 1.0), c(4.0, 1.0));
        assert!(contacts.is_empty());
    }

    #[test]
    fn contacts_prefers_crossing() {
        let contacts = segment_contacts_2d(c(0.0, 0.0), c(2.0, 0.0), c(1.0, -1.0), c(1.0, 1.0));
        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].point, c(1.0, 0.0));
    }
}
