use nalgebra::Rotation2;

use super::{JoinStyle, OffsetOptions};
use crate::geometry::Coord;
use crate::math::intersect_2d::line_line_intersect_2d;
use crate::math::polygon_2d::{right_normal, segment_direction};
use crate::math::{cross, Vector2};

/// Threshold for a spike: `cos(turn) < this` means a near-180° reversal.
const SPIKE_COS: f64 = -0.98;

/// Sine of the turn below which consecutive edges count as collinear.
const COLLINEAR_SIN: f64 = 1e-12;

/// One input edge moved sideways by the offset distance.
struct OffsetSeg {
    vertex: Coord,
    start: Coord,
    end: Coord,
    dir: Vector2,
}

impl OffsetSeg {
    fn span(&self) -> Vector2 {
        self.end - self.start
    }
}

/// Builds the raw (untrimmed) offset of one ring by moving every edge and
/// joining consecutive edges at the original vertices.
///
/// The ring must have its material on the left (exteriors
/// counter-clockwise, holes clockwise). Inner corners produce loops and
/// reversed pieces that the later passes remove.
pub(super) fn build(ring: &[Coord], distance: f64, options: &OffsetOptions) -> Vec<Coord> {
    let n = ring.len();
    let segs: Vec<OffsetSeg> = (0..n)
        .filter_map(|i| {
            let a = ring[i];
            let b = ring[(i + 1) % n];
            let dir = segment_direction(a, b)?;
            let shift = right_normal(&dir) * distance;
            Some(OffsetSeg {
                vertex: a,
                start: a.offset_by(&shift),
                end: b.offset_by(&shift),
                dir,
            })
        })
        .collect();
    let m = segs.len();
    if m < 3 {
        return Vec::new();
    }

    let mut out = Vec::with_capacity(m * 2);
    for k in 0..m {
        let prev = &segs[(k + m - 1) % m];
        push_join(&mut out, prev, &segs[k], distance, options);
    }
    out.dedup();
    if out.len() > 1 && out.first() == out.last() {
        out.pop();
    }
    out
}

/// Pushes the join between `prev` and `next` at `next.vertex`, ending on
/// the point where `next` starts.
fn push_join(
    out: &mut Vec<Coord>,
    prev: &OffsetSeg,
    next: &OffsetSeg,
    distance: f64,
    options: &OffsetOptions,
) {
    let cos = prev.dir.dot(&next.dir);
    let sin = cross(&prev.dir, &next.dir);

    if sin.abs() < COLLINEAR_SIN && cos > 0.0 {
        out.push(next.start);
        return;
    }

    let outer = if sin.abs() < COLLINEAR_SIN {
        distance > 0.0
    } else {
        sin * distance > 0.0
    };
    if !outer {
        push_inner(out, prev, next);
        return;
    }

    match options.join {
        JoinStyle::Round => push_arc(out, prev, next, distance, sin, cos, options),
        JoinStyle::Miter if cos >= SPIKE_COS => push_miter(out, prev, next, distance, options),
        JoinStyle::Miter | JoinStyle::Bevel => {
            out.push(prev.end);
            out.push(next.start);
        }
    }
}

/// Concave side: the two offset edges overlap. Their crossing is used when
/// it lies on both edges, otherwise the join is pinned through the vertex.
fn push_inner(out: &mut Vec<Coord>, prev: &OffsetSeg, next: &OffsetSeg) {
    let span_prev = prev.span();
    if let Some((t, u)) = line_line_intersect_2d(prev.start, &span_prev, next.start, &next.span())
    {
        if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u) {
            out.push(prev.start.offset_by(&(span_prev * t)));
            return;
        }
    }
    out.push(prev.end);
    out.push(next.vertex);
    out.push(next.start);
}

fn push_miter(
    out: &mut Vec<Coord>,
    prev: &OffsetSeg,
    next: &OffsetSeg,
    distance: f64,
    options: &OffsetOptions,
) {
    let span_prev = prev.span();
    let limit = options.miter_limit * distance.abs();
    if let Some((t, _)) = line_line_intersect_2d(prev.start, &span_prev, next.start, &next.span())
    {
        let corner = prev.start.offset_by(&(span_prev * t));
        if corner.distance(next.vertex) <= limit {
            out.push(corner);
            return;
        }
    }
    out.push(prev.end);
    out.push(next.start);
}

/// Arc around the original vertex from `prev.end` to `next.start`.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn push_arc(
    out: &mut Vec<Coord>,
    prev: &OffsetSeg,
    next: &OffsetSeg,
    distance: f64,
    sin: f64,
    cos: f64,
    options: &OffsetOptions,
) {
    // A spike turns by (nearly) half a circle; its sense follows the side
    // being offset.
    let sweep = if cos < SPIKE_COS {
        std::f64::consts::PI.copysign(distance)
    } else {
        sin.atan2(cos).abs().copysign(distance)
    };
    let step = 2.0 * (1.0 - options.arc_tolerance.min(1.0)).acos();
    let steps = (sweep.abs() / step).ceil().max(1.0) as usize;

    let radius = prev.end - next.vertex;
    out.push(prev.end);
    for k in 1..steps {
        let phi = sweep * k as f64 / steps as f64;
        out.push(next.vertex.offset_by(&(Rotation2::new(phi) * radius)));
    }
    out.push(next.start);
}
