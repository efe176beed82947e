//! Packed Hilbert R-tree over a static point set.
//!
//! Points are sorted along a Hilbert curve and packed bottom-up into a
//! flatbush-style hierarchy: leaves occupy positions `[0, num_items)` of a
//! single node array and every parent level is appended after its children.
//! Each node stores its bounding box and one index. For a leaf that index is
//! the point's position in the original dataset, and for a parent it is the
//! position of its first child.
//!
//! The tree is built once and never mutated afterwards, so it is `Send + Sync`
//! and queries only need `&self`.

use crate::error::{RangeSearchError, Result};
use crate::{BoundingBox, Point};

/// Hilbert grid resolution per axis (16 bits).
const MAX_HILBERT: u32 = u16::MAX as u32;
const HILBERT_SIDE: u32 = 1 << 16;
const DEFAULT_NODE_SIZE: usize = 16;

/// Static spatial index answering inclusive axis-aligned range queries.
///
/// # Example
/// ```
/// use polyrange::{HilbertRTree, Point};
///
/// let points = [
///     Point::new(0.0, 0.0),
///     Point::new(5.0, 5.0),
///     Point::new(10.0, 10.0),
///     Point::new(2.0, 2.0),
/// ];
/// let tree = HilbertRTree::build(&points)?;
///
/// let hits = tree.range_query(Point::new(0.0, 0.0), Point::new(5.0, 5.0));
/// assert_eq!(hits, vec![0, 1, 3]);
/// # Ok::<(), polyrange::RangeSearchError>(())
/// ```
#[derive(Clone, Debug)]
pub struct HilbertRTree {
    /// Node boxes: leaves first, then each parent level
    pub(crate) boxes: Vec<BoundingBox>,
    /// Leaf: dataset index. Parent: position of first child.
    pub(crate) indices: Vec<usize>,
    /// Level boundaries: end position of each tree level
    pub(crate) level_bounds: Vec<usize>,
    /// Maximum children per parent
    pub(crate) node_size: usize,
    /// Number of leaf items
    pub(crate) num_items: usize,
}

impl HilbertRTree {
    /// Builds the index with the default fan-out of 16.
    ///
    /// # Errors
    /// [`RangeSearchError::NonFiniteCoordinate`] if any point has a NaN or
    /// infinite coordinate.
    pub fn build(points: &[Point]) -> Result<Self> {
        Self::with_node_size(points, DEFAULT_NODE_SIZE)
    }

    /// Builds the index with `node_size` children per parent.
    ///
    /// An empty slice produces an empty tree on which every query returns
    /// nothing. Duplicate points are kept as separate leaves.
    ///
    /// # Errors
    /// [`RangeSearchError::InvalidNodeSize`] when `node_size < 2`, and
    /// [`RangeSearchError::NonFiniteCoordinate`] for the first point with a
    /// NaN or infinite coordinate.
    pub fn with_node_size(points: &[Point], node_size: usize) -> Result<Self> {
        if node_size < 2 {
            return Err(RangeSearchError::InvalidNodeSize(node_size));
        }
        if let Some((index, p)) = points.iter().enumerate().find(|(_, p)| !p.is_finite()) {
            return Err(RangeSearchError::NonFiniteCoordinate { index, x: p.x(), y: p.y() });
        }

        let num_items = points.len();
        let Some(bounds) = BoundingBox::of_points(points) else {
            return Ok(Self {
                boxes: Vec::new(),
                indices: Vec::new(),
                level_bounds: Vec::new(),
                node_size,
                num_items: 0,
            });
        };

        // Calculate total nodes and level bounds
        let mut level_bounds = Vec::with_capacity(16);
        let mut count = num_items;
        let mut total_nodes = num_items;
        level_bounds.push(total_nodes);
        loop {
            count = count.div_ceil(node_size);
            total_nodes += count;
            level_bounds.push(total_nodes);
            if count <= 1 {
                break;
            }
        }

        let mut boxes = Vec::with_capacity(total_nodes);
        let mut indices = Vec::with_capacity(total_nodes);

        // Leaves in Hilbert order; a single node needs no ordering
        if num_items > node_size {
            for (_, id) in hilbert_order(points, &bounds) {
                boxes.push(BoundingBox::from_point(points[id]));
                indices.push(id);
            }
        } else {
            boxes.extend(points.iter().copied().map(BoundingBox::from_point));
            indices.extend(0..num_items);
        }

        // Build parent levels
        let mut pos = 0;
        for &level_end in &level_bounds[..level_bounds.len() - 1] {
            while pos < level_end {
                let first_child = pos;
                let end = pos.saturating_add(node_size).min(level_end);
                let node_box = boxes[pos..end]
                    .iter()
                    .fold(boxes[pos], |acc, child| acc.merge(child));
                boxes.push(node_box);
                indices.push(first_child);
                pos = end;
            }
        }

        Ok(Self { boxes, indices, level_bounds, node_size, num_items })
    }

    /// Returns the number of indexed points
    pub fn len(&self) -> usize {
        self.num_items
    }

    /// Returns whether the tree indexes no points
    pub fn is_empty(&self) -> bool {
        self.num_items == 0
    }

    /// Maximum number of children per parent node.
    pub fn node_size(&self) -> usize {
        self.node_size
    }

    /// Number of levels, leaves included. Zero for an empty tree.
    pub fn depth(&self) -> usize {
        self.level_bounds.len()
    }

    /// Bounding box of every indexed point, or `None` for an empty tree.
    pub fn bounds(&self) -> Option<BoundingBox> {
        self.boxes.last().copied()
    }

    /// Finds every point inside the inclusive box spanned by `min` and `max`.
    ///
    /// The result is exact (no false positives or negatives for the test
    /// `min.x <= p.x <= max.x && min.y <= p.y <= max.y`) and sorted in
    /// ascending dataset order. An inverted box or a NaN bound matches nothing.
    pub fn range_query(&self, min: Point, max: Point) -> Vec<usize> {
        let mut results = Vec::new();
        self.range_query_into(min, max, &mut results);
        results
    }

    /// Same as [`range_query`](Self::range_query) but reuses `results`.
    ///
    /// `results` is cleared before being filled.
    ///
    /// # Example
    /// ```
    /// use polyrange::{HilbertRTree, Point};
    ///
    /// let points: Vec<Point> = (0..100).map(|i| Point::new(i as f64, i as f64)).collect();
    /// let tree = HilbertRTree::build(&points)?;
    ///
    /// let mut results = Vec::new();
    /// tree.range_query_into(Point::new(10.0, 10.0), Point::new(12.0, 12.0), &mut results);
    /// assert_eq!(results, vec![10, 11, 12]);
    ///
    /// tree.range_query_into(Point::new(-5.0, -5.0), Point::new(-1.0, -1.0), &mut results);
    /// assert!(results.is_empty());
    /// # Ok::<(), polyrange::RangeSearchError>(())
    /// ```
    pub fn range_query_into(&self, min: Point, max: Point, results: &mut Vec<usize>) {
        self.search(min, max, results);
    }

    /// Collects matches into `results` and returns how many leaf boxes were
    /// tested against the query.
    pub(crate) fn search(&self, min: Point, max: Point, results: &mut Vec<usize>) -> usize {
        results.clear();
        if self.num_items == 0 {
            return 0;
        }

        let query = BoundingBox::from_corners(min, max);
        let mut stack = vec![self.boxes.len() - 1];
        let mut leaves_tested = 0;

        while let Some(node_index) = stack.pop() {
            let end_pos = node_index
                .saturating_add(self.node_size)
                .min(self.upper_bound(node_index));
            let is_leaf_level = node_index < self.num_items;
            if is_leaf_level {
                leaves_tested += end_pos - node_index;
            }

            for pos in node_index..end_pos {
                if !query.intersects(&self.boxes[pos]) {
                    continue;
                }
                if is_leaf_level {
                    results.push(self.indices[pos]);
                } else {
                    stack.push(self.indices[pos]);
                }
            }
        }

        results.sort_unstable();
        leaves_tested
    }

    // --- Private helpers ---

    /// End position of the level that `node_index` belongs to
    #[inline]
    fn upper_bound(&self, node_index: usize) -> usize {
        let level = self.level_bounds.partition_point(|&bound| bound <= node_index);
        self.level_bounds
            .get(level)
            .copied()
            .unwrap_or(self.boxes.len())
    }
}

/// Dataset ids paired with their Hilbert value, sorted along the curve.
fn hilbert_order(points: &[Point], bounds: &BoundingBox) -> Vec<(u32, usize)> {
    // A zero-extent axis collapses to the first grid column
    let scale = |extent: f64| if extent > 0.0 { f64::from(MAX_HILBERT) / extent } else { 0.0 };
    let hilbert_width = scale(bounds.width());
    let hilbert_height = scale(bounds.height());
    let cell_max = f64::from(MAX_HILBERT - 1);

    let mut order: Vec<(u32, usize)> = points
        .iter()
        .enumerate()
        .map(|(id, p)| {
            let hx = ((p.x() - bounds.min_x) * hilbert_width).clamp(0.0, cell_max) as u32;
            let hy = ((p.y() - bounds.min_y) * hilbert_height).clamp(0.0, cell_max) as u32;
            (hilbert_xy_to_index(hx, hy), id)
        })
        .collect();
    // Ties broken by dataset id keep the build deterministic
    order.sort_unstable();
    order
}

/// Distance of grid cell `(x, y)` along a 16-bit Hilbert curve.
fn hilbert_xy_to_index(mut x: u32, mut y: u32) -> u32 {
    let mut d = 0_u32;
    let mut s = HILBERT_SIDE / 2;
    while s > 0 {
        let rx = u32::from(x & s != 0);
        let ry = u32::from(y & s != 0);
        d += s * s * ((3 * rx) ^ ry);
        if ry == 0 {
            if rx == 1 {
                x = HILBERT_SIDE - 1 - x;
                y = HILBERT_SIDE - 1 - y;
            }
            std::mem::swap(&mut x, &mut y);
        }
        s /= 2;
    }
    d
}

#[cfg(test)]
mod tests {
    use super::hilbert_xy_to_index;

    #[test]
    fn hilbert_index_visits_first_quadrant_cells_in_curve_order() {
        // 16-bit curve starts at the origin and moves to a neighbouring cell
        assert_eq!(hilbert_xy_to_index(0, 0), 0);
        let neighbours = [hilbert_xy_to_index(0, 1), hilbert_xy_to_index(1, 0)];
        assert!(neighbours.contains(&1), "second cell must be adjacent to the origin");
    }

    #[test]
    fn hilbert_index_is_a_bijection_on_a_small_block() {
        let mut seen: Vec<u32> = (0..8)
            .flat_map(|x| (0..8).map(move |y| hilbert_xy_to_index(x, y)))
            .collect();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), 64, "distinct cells must map to distinct indices");
    }
}
