use super::{cross, Vector2, TOLERANCE};
use crate::geometry::Coord;

/// Computes the signed area of a closed ring (shoelace formula).
///
/// Positive for counter-clockwise, negative for clockwise. The ring is
/// implicitly closed; a repeated closing coordinate contributes nothing.
#[must_use]
pub fn signed_area_2d(points: &[Coord]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].x * points[j].y - points[j].x * points[i].y;
    }
    sum * 0.5
}

/// Unsigned area of the triangle `a`, `b`, `c`.
///
/// Collinear or coincident points yield exactly `0.0`, never `-0.0`.
#[must_use]
pub fn triangle_area(a: Coord, b: Coord, c: Coord) -> f64 {
    ((b.x - a.x) * (c.y - a.y) - (c.x - a.x) * (b.y - a.y)).abs() * 0.5
}

/// Rotates a closed ring so it starts at the leftmost vertex (smallest x),
/// breaking ties by smallest y.
#[must_use]
pub fn rotate_to_canonical_start(points: &[Coord]) -> Vec<Coord> {
    if points.len() < 2 {
        return points.to_vec();
    }
    let mut best = 0;
    for (i, pt) in points.iter().enumerate().skip(1) {
        let b = &points[best];
        if pt.x < b.x - TOLERANCE || (pt.x - b.x).abs() < TOLERANCE && pt.y < b.y {
            best = i;
        }
    }
    if best == 0 {
        return points.to_vec();
    }
    let mut rotated = Vec::with_capacity(points.len());
    rotated.extend_from_slice(&points[best..]);
    rotated.extend_from_slice(&points[..best]);
    rotated
}

/// Computes the normalized direction from `a` to `b`, or `None` for a
/// zero-length segment.
#[must_use]
pub fn segment_direction(a: Coord, b: Coord) -> Option<Vector2> {
    let d = b - a;
    let len = d.norm();
    if len < TOLERANCE {
        return None;
    }
    Some(d / len)
}

/// Returns the left-pointing normal of a direction vector.
#[must_use]
pub fn left_normal(dir: &Vector2) -> Vector2 {
    Vector2::new(-dir.y, dir.x)
}

/// Returns the right-pointing normal of a direction vector.
#[must_use]
pub fn right_normal(dir: &Vector2) -> Vector2 {
    Vector2::new(dir.y, -dir.x)
}

/// Winding number of `ring` around `p`.
///
/// Counter-clockwise loops count `+1`, clockwise loops `-1`. Points exactly
/// on the boundary get an unspecified but deterministic answer.
#[must_use]
pub fn winding_number(p: Coord, ring: &[Coord]) -> i32 {
    let n = ring.len();
    let mut wn = 0;
    for i in 0..n {
        let a = ring[i];
        let b = ring[(i + 1) % n];
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

/// Non-zero containment test of `p` against a single ring.
#[must_use]
pub fn point_in_ring(p: Coord, ring: &[Coord]) -> bool {
    winding_number(p, ring) != 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::coord::coords;

    fn unit_square() -> Vec<Coord> {
        coords(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)])
    }

    #[test]
    fn signed_area_ccw_square() {
        let area = signed_area_2d(&unit_square());
        assert!((area - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn signed_area_cw_square() {
        let mut pts = unit_square();
        pts.reverse();
        let area = signed_area_2d(&pts);
        assert!((area + 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn signed_area_degenerate() {
        assert!((signed_area_2d(&[Coord::new(0.0, 0.0)])).abs() < TOLERANCE);
        assert!((signed_area_2d(&[])).abs() < TOLERANCE);
    }

    #[test]
    fn triangle_area_collinear_is_positive_zero() {
        let a = triangle_area(
            Coord::new(0.0, 0.0),
            Coord::new(2.0, 0.0),
            Coord::new(4.0, 0.0),
        );
        assert_eq!(a.to_bits(), 0.0_f64.to_bits());
    }

    #[test]
    fn triangle_area_right_triangle() {
        let a = triangle_area(
            Coord::new(0.0, 0.0),
            Coord::new(4.0, 0.0),
            Coord::new(0.0, 3.0),
        );
        assert!((a - 6.0).abs() < TOLERANCE);
    }

    #[test]
    fn canonical_start_rotation() {
        let pts = coords(&[(1.0, 0.0), (1.0, 1.0), (0.0, 1.0), (0.0, 0.0)]);
        let rotated = rotate_to_canonical_start(&pts);
        assert_eq!(rotated[0], Coord::new(0.0, 0.0));
        assert_eq!(rotated[1], Coord::new(1.0, 0.0));
    }

    #[test]
    fn segment_direction_basic() {
        let dir = segment_direction(Coord::new(0.0, 0.0), Coord::new(3.0, 4.0)).unwrap();
        assert!((dir.x - 0.6).abs() < TOLERANCE);
        assert!((dir.y - 0.8).abs() < TOLERANCE);
    }

    #[test]
    fn segment_direction_zero_length() {
        assert!(segment_direction(Coord::new(1.0, 1.0), Coord::new(1.0, 1.0)).is_none());
    }

    #[test]
    fn normals_basic() {
        let dir = Vector2::new(1.0, 0.0);
        let l = left_normal(&dir);
        let r = right_normal(&dir);
        assert!((l.y - 1.0).abs() < TOLERANCE);
        assert!((r.y + 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn winding_number_orientation() {
        let ccw = unit_square();
        let mut cw = ccw.clone();
        cw.reverse();
        let inside = Coord::new(0.5, 0.5);
        let outside = Coord::new(1.5, 0.5);
        assert_eq!(winding_number(inside, &ccw), 1);
        assert_eq!(winding_number(inside, &cw), -1);
        assert_eq!(winding_number(outside, &ccw), 0);
        assert!(point_in_ring(inside, &cw));
        assert!(!point_in_ring(outside, &cw));
    }
}
