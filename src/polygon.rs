//! Simple polygons and the crossing-number containment test.

use crate::error::{RangeSearchError, Result};
use crate::{BoundingBox, Point};

/// A simple (non self-intersecting) closed polygon.
///
/// The boundary runs through the vertices in order and closes from the last
/// vertex back to the first. Winding direction does not matter.
///
/// # Boundary points
///
/// [`contains`](Self::contains) is the plain crossing-number test, so points
/// exactly on an edge are classified by which side the interior lies on
/// relative to a rightward ray. For an axis-aligned rectangle the covered
/// region is half-open, `[min_x, max_x) × [min_y, max_y)`: the left and
/// bottom edges are inside, the right and top edges are outside.
///
/// # Example
/// ```
/// use polyrange::{Point, Polygon};
///
/// let square = Polygon::new(vec![
///     Point::new(0.0, 0.0),
///     Point::new(4.0, 0.0),
///     Point::new(4.0, 4.0),
///     Point::new(0.0, 4.0),
/// ])?;
/// assert!(square.contains(Point::new(2.0, 2.0)));
/// assert!(square.contains(Point::new(0.0, 0.0)));
/// assert!(!square.contains(Point::new(4.0, 2.0)));
/// # Ok::<(), polyrange::RangeSearchError>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Polygon {
    vertices: Vec<Point>,
    bounds: BoundingBox,
}

impl Polygon {
    /// Minimum number of vertices a polygon must have.
    pub const MIN_VERTICES: usize = 3;

    /// Validates and wraps a vertex ring.
    ///
    /// # Errors
    /// [`RangeSearchError::TooFewVertices`] for fewer than three vertices and
    /// [`RangeSearchError::NonFiniteVertex`] for a NaN or infinite coordinate.
    /// Degenerate but finite rings (zero area, repeated vertices) are accepted.
    pub fn new(vertices: Vec<Point>) -> Result<Self> {
        if vertices.len() < Self::MIN_VERTICES {
            return Err(RangeSearchError::TooFewVertices(vertices.len()));
        }
        if let Some((index, v)) = vertices.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(RangeSearchError::NonFiniteVertex { index, x: v.x(), y: v.y() });
        }
        let bounds = vertices[1..]
            .iter()
            .fold(BoundingBox::from_point(vertices[0]), |acc, &v| acc.merge(&BoundingBox::from_point(v)));
        Ok(Self { vertices, bounds })
    }

    /// The vertex ring, in boundary order.
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    /// Number of vertices (equal to the number of edges).
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Always `false`; a valid polygon has at least three vertices.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Coordinate-wise min/max over all vertices.
    pub fn bounding_box(&self) -> BoundingBox {
        self.bounds
    }

    /// Crossing-number point-in-polygon test.
    ///
    /// Casts a ray from `p` towards +x and flips the result for every edge
    /// whose endpoints straddle `p.y` and whose intercept at `p.y` lies to the
    /// right of `p.x`. Horizontal edges never straddle, so the intercept
    /// division is always by a non-zero height.
    pub fn contains(&self, p: Point) -> bool {
        let mut inside = false;
        let mut prev = match self.vertices.last() {
            Some(&v) => v,
            None => return false,
        };
        for &curr in &self.vertices {
            if (curr.y() > p.y()) != (prev.y() > p.y()) {
                let intercept =
                    (prev.x() - curr.x()) * (p.y() - curr.y()) / (prev.y() - curr.y()) + curr.x();
                if p.x() < intercept {
                    inside = !inside;
                }
            }
            prev = curr;
        }
        inside
    }
}

impl TryFrom<Vec<Point>> for Polygon {
    type Error = RangeSearchError;

    fn try_from(vertices: Vec<Point>) -> Result<Self> {
        Self::new(vertices)
    }
}

impl TryFrom<&[[f64; 2]]> for Polygon {
    type Error = RangeSearchError;

    fn try_from(coords: &[[f64; 2]]) -> Result<Self> {
        Self::new(coords.iter().copied().map(Point::from).collect())
    }
}
