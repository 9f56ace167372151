use super::Coord;

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub min: Coord,
    pub max: Coord,
}

impl Bounds {
    /// Bounds of a single coordinate.
    #[must_use]
    pub fn from_coord(c: Coord) -> Self {
        Self { min: c, max: c }
    }

    /// Create bounds from a set of coordinates, `None` when empty.
    pub fn from_coords<'a, I>(coords: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Coord>,
    {
        let mut iter = coords.into_iter();
        let first = *iter.next()?;
        Some(iter.fold(Self::from_coord(first), |b, &c| b.expand_to(c)))
    }

    /// Smallest bounds containing `self` and `c`.
    #[must_use]
    pub fn expand_to(self, c: Coord) -> Self {
        Self {
            min: Coord::new(self.min.x.min(c.x), self.min.y.min(c.y)),
            max: Coord::new(self.max.x.max(c.x), self.max.y.max(c.y)),
        }
    }

    /// Smallest bounds containing both.
    #[must_use]
    pub fn union(self, other: Self) -> Self {
        self.expand_to(other.min).expand_to(other.max)
    }

    /// Grows every side by `margin`.
    #[must_use]
    pub fn expand_by(self, margin: f64) -> Self {
        Self {
            min: Coord::new(self.min.x - margin, self.min.y - margin),
            max: Coord::new(self.max.x + margin, self.max.y + margin),
        }
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Length of the diagonal, the scalar extent of the geometry.
    #[must_use]
    pub fn size(&self) -> f64 {
        self.width().hypot(self.height())
    }

    /// `fraction` of [`Bounds::size`], for deriving tolerances or offset
    /// distances relative to feature extent.
    #[must_use]
    pub fn scaled(&self, fraction: f64) -> f64 {
        self.size() * fraction
    }

    #[must_use]
    pub fn center(&self) -> Coord {
        self.min.midpoint(self.max)
    }

    /// Inclusive containment test.
    #[must_use]
    pub fn contains(&self, c: Coord) -> bool {
        c.x >= self.min.x && c.x <= self.max.x && c.y >= self.min.y && c.y <= self.max.y
    }

    /// Inclusive overlap test.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        self.min.x <= other.max.x
            && other.min.x <= self.max.x
            && self.min.y <= other.max.y
            && other.min.y <= self.max.y
    }
}
