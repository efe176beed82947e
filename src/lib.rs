//! # polyrange - Point-in-Polygon Range Search
//!
//! Answers "which points lie inside this polygon?" for a static 2D point set
//! and any number of query polygons, without scanning the whole dataset for
//! every query.
//!
//! ## Features
//!
//! - **Hilbert R-tree Index**: Points are packed once into a static Hilbert R-tree
//! - **Exact Results**: Index candidates are refined with a crossing-number test
//! - **Shared Pipeline**: `query_poly` and `query_poly_count` can never disagree
//! - **Thread Safe**: The engine is immutable after construction
//!
//! ## Quick Start
//!
//! ```rust
//! use polyrange::prelude::*;
//!
//! let engine = RangeSearch::new(vec![
//!     Point::new(0.0, 0.0),
//!     Point::new(5.0, 5.0),
//!     Point::new(10.0, 10.0),
//!     Point::new(2.0, 2.0),
//! ])?;
//!
//! let square = Polygon::new(vec![
//!     Point::new(0.0, 0.0),
//!     Point::new(4.0, 0.0),
//!     Point::new(4.0, 4.0),
//!     Point::new(0.0, 4.0),
//! ])?;
//!
//! let result = engine.query_poly(&square);
//! println!("Found {} points: {:?}", result.count(), result.indices());
//! // Output: Found 2 points: [0, 3]
//! # Ok::<(), polyrange::RangeSearchError>(())
//! ```
//!
//! ## How It Works
//!
//! A query first computes the polygon's bounding box and asks the
//! [`HilbertRTree`] for every point inside it. The tree only descends into
//! nodes whose box overlaps the query, so the cost follows the number of
//! points near the polygon rather than the dataset size. The remaining
//! candidates are then tested against the polygon itself.
//!
//! Points exactly on a polygon edge follow the crossing-number convention
//! documented on [`Polygon`].
//!
//! ## Batch Driver
//!
//! The [`driver`] module (and the `polyrange` binary) runs directories of
//! JSON test cases through the engine and writes the results back as JSON.

pub mod bounding_box;
pub mod config;
pub mod driver;
pub mod error;
pub mod hilbert_rtree;
pub mod point;
pub mod polygon;
pub mod prelude;
pub mod range_search;

pub use bounding_box::BoundingBox;
pub use error::{RangeSearchError, Result};
pub use hilbert_rtree::HilbertRTree;
pub use point::Point;
pub use polygon::Polygon;
pub use range_search::{QueryResult, RangeSearch};

mod integration_test;
