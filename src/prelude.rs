//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types from the crate.
//! Users can import everything they need with:
//!
//! ```
//! use polyrange::prelude::*;
//! ```

pub use crate::{BoundingBox, HilbertRTree, Point, Polygon, QueryResult, RangeSearch, RangeSearchError};
