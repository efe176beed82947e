//! Error type shared by the index, the engine and the driver.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while building an index, validating a polygon, or running
/// the file-based driver.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RangeSearchError {
    /// A search engine cannot be built over zero points.
    #[error("dataset is empty")]
    EmptyDataset,

    /// A dataset point has a NaN or infinite coordinate.
    #[error("point {index} has non-finite coordinates ({x}, {y})")]
    NonFiniteCoordinate {
        /// Position of the offending point in the dataset.
        index: usize,
        /// Its x coordinate.
        x: f64,
        /// Its y coordinate.
        y: f64,
    },

    /// A polygon was given fewer than three vertices.
    #[error("polygon needs at least 3 vertices, got {0}")]
    TooFewVertices(usize),

    /// A polygon vertex has a NaN or infinite coordinate.
    #[error("polygon vertex {index} has non-finite coordinates ({x}, {y})")]
    NonFiniteVertex {
        /// Position of the offending vertex in the polygon.
        index: usize,
        /// Its x coordinate.
        x: f64,
        /// Its y coordinate.
        y: f64,
    },

    /// Tree fan-out below 2 cannot form a hierarchy.
    #[error("node size must be at least 2, got {0}")]
    InvalidNodeSize(usize),

    /// Reading or writing a driver file failed.
    #[error("IO error on {path}: {source}")]
    Io {
        /// File or directory being accessed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },

    /// A driver input file is not valid JSON of the expected shape.
    #[error("JSON error in {path}: {source}")]
    Json {
        /// File being parsed or written.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: serde_json::Error,
    },

    /// The driver root does not exist or is not a directory.
    #[error("not a directory: {0}")]
    NotADirectory(PathBuf),
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, RangeSearchError>;
