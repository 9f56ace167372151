use crate::geometry::{Coord, MultiPolygon, Winding};
use crate::operations::offset::intersect::find_contacts;

/// Position of a ring inside a multipolygon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RingRef {
    pub polygon: usize,
    /// `0` is the exterior, `i + 1` is hole `i`.
    pub ring: usize,
}

/// One problem found by [`IsValid`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ValidityIssue {
    /// Fewer than 3 distinct points.
    TooFewPoints(RingRef),
    /// The ring encloses no area.
    ZeroArea(RingRef),
    /// Exterior not counter-clockwise or hole not clockwise.
    WrongOrientation(RingRef),
    /// Two rings, or two non-consecutive edges of one ring, touch or cross.
    Crossing { a: RingRef, b: RingRef, at: Coord },
}

/// Checks that a multipolygon consists of simple, correctly oriented,
/// mutually non-touching rings.
///
/// This is the shape [`PolygonOffset`](crate::operations::offset::PolygonOffset)
/// produces; input geometry is not required to pass.
#[derive(Debug)]
pub struct IsValid<'a> {
    input: &'a MultiPolygon,
}

impl<'a> IsValid<'a> {
    #[must_use]
    pub fn new(input: &'a MultiPolygon) -> Self {
        Self { input }
    }

    /// Runs every check; an empty result means the input is valid.
    #[must_use]
    pub fn execute(&self) -> Vec<ValidityIssue> {
        let mut issues = Vec::new();
        let mut refs = Vec::new();
        let mut rings: Vec<Vec<Coord>> = Vec::new();

        for (p, polygon) in self.input.iter().enumerate() {
            for (r, ring) in polygon.rings().enumerate() {
                let at = RingRef { polygon: p, ring: r };
                let mut coords = ring.coords().to_vec();
                coords.dedup();
                if coords.len() < 3 {
                    issues.push(ValidityIssue::TooFewPoints(at));
                    continue;
                }
                let expected = if r == 0 {
                    Winding::CounterClockwise
                } else {
                    Winding::Clockwise
                };
                match ring.winding() {
                    None => issues.push(ValidityIssue::ZeroArea(at)),
                    Some(w) if w != expected => {
                        issues.push(ValidityIssue::WrongOrientation(at));
                    }
                    Some(_) => {}
                }
                refs.push(at);
                rings.push(coords);
            }
        }

        for contact in find_contacts(&rings) {
            issues.push(ValidityIssue::Crossing {
                a: refs[contact.first.ring],
                b: refs[contact.second.ring],
                at: contact.first.point,
            });
        }
        issues
    }

    /// Shorthand for an empty [`IsValid::execute`] result.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.execute().is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::coord::coords;
    use crate::geometry::{Polygon, Ring};

    fn ring(pts: &[(f64, f64)]) -> Ring {
        Ring::new(coords(pts))
    }

    #[test]
    fn square_with_hole_is_valid() {
        let poly = Polygon::new(
            ring(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]),
            vec![ring(&[(2.0, 2.0), (2.0, 4.0), (4.0, 4.0), (4.0, 2.0)])],
        );
        assert!(IsValid::new(&poly.into()).is_valid());
    }

    #[test]
    fn reports_orientation_and_degenerate_rings() {
        let mp = MultiPolygon::new(vec![
            Polygon::new(
                ring(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)]),
                vec![],
            ),
            Polygon::new(ring(&[(5.0, 0.0), (6.0, 0.0)]), vec![]),
            Polygon::new(
                ring(&[(10.0, 0.0), (11.0, 0.0), (12.0, 0.0)]),
                vec![],
            ),
        ]);
        let issues = IsValid::new(&mp).execute();
        let first = RingRef { polygon: 0, ring: 0 };
        assert!(issues.contains(&ValidityIssue::WrongOrientation(first)));
        assert!(issues.contains(&ValidityIssue::TooFewPoints(RingRef {
            polygon: 1,
            ring: 0
        })));
        assert!(issues.contains(&ValidityIssue::ZeroArea(RingRef {
            polygon: 2,
            ring: 0
        })));
    }

    #[test]
    fn reports_self_crossing() {
        let bow_tie = Polygon::new(
            ring(&[(0.0, 0.0), (4.0, 4.0), (4.0, 0.0), (0.0, 4.0)]),
            vec![],
        );
        let issues = IsValid::new(&bow_tie.into()).execute();
        assert!(issues.iter().any(|i| matches!(
            i,
            ValidityIssue::Crossing { at, .. } if *at == Coord::new(2.0, 2.0)
        )));
    }

    #[test]
    fn reports_touching_polygons() {
        let mp = MultiPolygon::new(vec![
            Polygon::new(ring(&[(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0)]), vec![]),
            Polygon::new(ring(&[(2.0, 1.0), (4.0, 1.0), (4.0, 3.0)]), vec![]),
        ]);
        assert!(!IsValid::new(&mp).is_valid());
    }
}
