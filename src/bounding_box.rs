//! Inclusive axis-aligned bounding boxes.

use crate::Point;

/// Axis-aligned box `[min_x, max_x] × [min_y, max_y]`, inclusive on every side.
///
/// Used both for index nodes and for the query window derived from a polygon.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    /// Left edge.
    pub min_x: f64,
    /// Bottom edge.
    pub min_y: f64,
    /// Right edge.
    pub max_x: f64,
    /// Top edge.
    pub max_y: f64,
}

impl BoundingBox {
    /// Creates a box from its four edges (min_x, min_y, max_x, max_y).
    #[inline]
    pub const fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self { min_x, min_y, max_x, max_y }
    }

    /// Degenerate box covering a single point.
    #[inline]
    pub const fn from_point(p: Point) -> Self {
        Self::new(p.x(), p.y(), p.x(), p.y())
    }

    /// Box spanned by two opposite corners, in that order.
    #[inline]
    pub const fn from_corners(min: Point, max: Point) -> Self {
        Self::new(min.x(), min.y(), max.x(), max.y())
    }

    /// Smallest box containing every point, or `None` for an empty slice.
    pub fn of_points(points: &[Point]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        Some(
            rest.iter()
                .fold(Self::from_point(*first), |acc, &p| acc.merge(&Self::from_point(p))),
        )
    }

    /// Lower-left corner.
    #[inline]
    pub const fn min(&self) -> Point {
        Point::new(self.min_x, self.min_y)
    }

    /// Upper-right corner.
    #[inline]
    pub const fn max(&self) -> Point {
        Point::new(self.max_x, self.max_y)
    }

    /// Horizontal extent.
    #[inline]
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Vertical extent.
    #[inline]
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Inclusive point test: `min_x <= p.x <= max_x && min_y <= p.y <= max_y`.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x() >= self.min_x && p.x() <= self.max_x && p.y() >= self.min_y && p.y() <= self.max_y
    }

    /// Inclusive overlap test; boxes touching at an edge or corner intersect.
    ///
    /// Any NaN edge makes every comparison false, so a NaN box intersects nothing.
    #[inline]
    pub fn intersects(&self, other: &Self) -> bool {
        self.min_x <= other.max_x
            && self.max_x >= other.min_x
            && self.min_y <= other.max_y
            && self.max_y >= other.min_y
    }

    /// Union of two boxes.
    #[inline]
    #[must_use]
    pub fn merge(&self, other: &Self) -> Self {
        Self::new(
            self.min_x.min(other.min_x),
            self.min_y.min(other.min_y),
            self.max_x.max(other.max_x),
            self.max_y.max(other.max_y),
        )
    }
}
