//! Polygon range search over a fixed dataset.

use serde::Serialize;

use crate::error::{RangeSearchError, Result};
use crate::{HilbertRTree, Point, Polygon};

/// Points found inside one query polygon.
///
/// `indices` are dataset positions in ascending order and `count` always
/// equals `indices.len()`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct QueryResult {
    indices: Vec<usize>,
    count: usize,
}

impl QueryResult {
    fn new(indices: Vec<usize>) -> Self {
        let count = indices.len();
        Self { indices, count }
    }

    /// Matching dataset positions, ascending.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Number of matching points.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Returns whether no point matched.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Consumes the result, keeping only the indices.
    pub fn into_indices(self) -> Vec<usize> {
        self.indices
    }
}

/// Answers "which points lie inside this polygon?" for a static dataset.
///
/// The dataset is indexed once at construction. Each query narrows the
/// dataset to the polygon's bounding box through the index and then applies
/// the exact [`Polygon::contains`] test to the surviving candidates.
///
/// The engine is immutable after construction and can be shared between
/// threads (for instance behind an `Arc`) for concurrent queries.
///
/// # Example
/// ```
/// use polyrange::{Point, Polygon, RangeSearch};
///
/// let engine = RangeSearch::new(vec![
///     Point::new(0.0, 0.0),
///     Point::new(5.0, 5.0),
///     Point::new(10.0, 10.0),
///     Point::new(2.0, 2.0),
/// ])?;
/// let square = Polygon::try_from(&[[0.0, 0.0], [4.0, 0.0], [4.0, 4.0], [0.0, 4.0]][..])?;
///
/// let result = engine.query_poly(&square);
/// assert_eq!(result.indices(), &[0, 3]);
/// assert_eq!(engine.query_poly_count(&square), 2);
/// # Ok::<(), polyrange::RangeSearchError>(())
/// ```
#[derive(Clone, Debug)]
pub struct RangeSearch {
    points: Vec<Point>,
    index: HilbertRTree,
}

impl RangeSearch {
    /// Indexes `points`; their positions become the identifiers in results.
    ///
    /// # Errors
    /// [`RangeSearchError::EmptyDataset`] for an empty dataset and
    /// [`RangeSearchError::NonFiniteCoordinate`] for a NaN or infinite point.
    pub fn new(points: Vec<Point>) -> Result<Self> {
        let index = HilbertRTree::build(&points)?;
        Self::from_parts(points, index)
    }

    /// Like [`new`](Self::new) with an explicit index fan-out.
    ///
    /// # Errors
    /// As [`new`](Self::new), plus [`RangeSearchError::InvalidNodeSize`] when
    /// `node_size < 2`.
    pub fn with_node_size(points: Vec<Point>, node_size: usize) -> Result<Self> {
        let index = HilbertRTree::with_node_size(&points, node_size)?;
        Self::from_parts(points, index)
    }

    fn from_parts(points: Vec<Point>, index: HilbertRTree) -> Result<Self> {
        if points.is_empty() {
            return Err(RangeSearchError::EmptyDataset);
        }
        Ok(Self { points, index })
    }

    /// Number of indexed points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always `false`; an engine is never built over an empty dataset.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The spatial index backing candidate retrieval.
    pub fn index(&self) -> &HilbertRTree {
        &self.index
    }

    /// Returns every dataset point inside `polygon`, in ascending order.
    pub fn query_poly(&self, polygon: &Polygon) -> QueryResult {
        QueryResult::new(self.points_inside(polygon))
    }

    /// Number of dataset points inside `polygon`.
    ///
    /// Always equal to `self.query_poly(polygon).count()`.
    pub fn query_poly_count(&self, polygon: &Polygon) -> usize {
        self.points_inside(polygon).len()
    }

    /// Candidate retrieval from the index, then exact refinement.
    fn points_inside(&self, polygon: &Polygon) -> Vec<usize> {
        let bbox = polygon.bounding_box();
        let mut candidates = self.index.range_query(bbox.min(), bbox.max());
        candidates.retain(|&i| polygon.contains(self.points[i]));
        candidates
    }
}
