//! 2D point value type.

use serde::{Deserialize, Serialize};

/// An immutable 2D coordinate pair.
///
/// Points serialize as a two-element array `[x, y]`, which is the format the
/// driver reads datasets and polygons in.
///
/// # Example
/// ```
/// use polyrange::Point;
///
/// let p = Point::new(1.5, -2.0);
/// assert_eq!((p.x(), p.y()), (1.5, -2.0));
/// assert_eq!(Point::from([1.5, -2.0]), p);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Point {
    x: f64,
    y: f64,
}

impl Point {
    /// Creates a point at `(x, y)`.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Horizontal coordinate.
    #[inline]
    pub const fn x(self) -> f64 {
        self.x
    }

    /// Vertical coordinate.
    #[inline]
    pub const fn y(self) -> f64 {
        self.y
    }

    /// Returns `true` when neither coordinate is NaN or infinite.
    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<[f64; 2]> for Point {
    fn from([x, y]: [f64; 2]) -> Self {
        Self::new(x, y)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl From<Point> for [f64; 2] {
    fn from(p: Point) -> Self {
        [p.x, p.y]
    }
}
