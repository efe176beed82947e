//! File-based batch driver.
//!
//! Each test case is a directory holding a dataset (`[[x, y], ...]`) and a
//! list of query polygons (`[[[x, y], ...], ...]`). The driver builds one
//! [`RangeSearch`] per case, answers every polygon, and writes the index
//! lists and counts back next to the inputs.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use log::{debug, error, info, warn};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::DriverConfig;
use crate::error::{RangeSearchError, Result};
use crate::{Point, Polygon, RangeSearch};

/// Timings and sizes for one processed test case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaseReport {
    /// Dataset size
    pub points: usize,
    /// Number of query polygons
    pub polygons: usize,
    /// Parsing plus index construction
    pub preprocessing: Duration,
    /// All polygon queries
    pub query: Duration,
}

impl CaseReport {
    /// Preprocessing plus query time.
    pub fn total(&self) -> Duration {
        self.preprocessing + self.query
    }
}

/// Outcome of a whole driver run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Cases whose outputs were written
    pub succeeded: usize,
    /// Cases that failed and were skipped
    pub failed: usize,
}

/// Lists test-case directories under `config.root`, sorted by name.
///
/// # Errors
/// [`RangeSearchError::NotADirectory`] if the root is missing or not a
/// directory, [`RangeSearchError::Io`] if it cannot be listed.
pub fn discover_test_cases(config: &DriverConfig) -> Result<Vec<PathBuf>> {
    if !config.root.is_dir() {
        return Err(RangeSearchError::NotADirectory(config.root.clone()));
    }
    let io_err = |source: std::io::Error| RangeSearchError::Io { path: config.root.clone(), source };

    let mut cases = Vec::new();
    for entry in fs::read_dir(&config.root).map_err(io_err)? {
        let entry = entry.map_err(io_err)?;
        let is_case = entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.starts_with(&config.case_prefix));
        if is_case && entry.path().is_dir() {
            cases.push(entry.path());
        }
    }
    cases.sort();
    Ok(cases)
}

/// Reads a dataset file: a JSON array of `[x, y]` pairs.
///
/// # Errors
/// [`RangeSearchError::Io`] or [`RangeSearchError::Json`].
pub fn read_points(path: &Path) -> Result<Vec<Point>> {
    read_json(path)
}

/// Reads a query file: a JSON array of polygons, each an array of `[x, y]` pairs.
///
/// Every ring is validated on its own, so one invalid polygon leaves the
/// others usable.
///
/// # Errors
/// [`RangeSearchError::Io`] or [`RangeSearchError::Json`] for the file as a
/// whole.
pub fn read_polygons(path: &Path) -> Result<Vec<Result<Polygon>>> {
    let rings: Vec<Vec<Point>> = read_json(path)?;
    Ok(rings.into_iter().map(Polygon::new).collect())
}

/// Runs every polygon of one test case and writes both output files.
///
/// An invalid polygon is logged and reported as an empty result.
///
/// # Errors
/// Any input, engine construction or output error of this case.
pub fn process_test_case(dir: &Path, config: &DriverConfig) -> Result<CaseReport> {
    info!("Processing test case in directory: {}", dir.display());

    let start_preprocessing = Instant::now();
    let points = read_points(&dir.join(&config.points_file))?;
    let polygons = read_polygons(&dir.join(&config.query_file))?;
    let num_points = points.len();
    let engine = RangeSearch::new(points)?;
    let preprocessing = start_preprocessing.elapsed();
    debug!(
        "built hilbert r-tree: {} points, {} levels, node size {}",
        engine.len(),
        engine.index().depth(),
        engine.index().node_size()
    );

    let start_query = Instant::now();
    let results: Vec<Vec<usize>> = polygons
        .iter()
        .enumerate()
        .map(|(i, polygon)| match polygon {
            Ok(polygon) => engine.query_poly(polygon).into_indices(),
            Err(e) => {
                warn!("{}: query {} skipped: {}", dir.display(), i, e);
                Vec::new()
            }
        })
        .collect();
    let query = start_query.elapsed();

    let counts: Vec<usize> = results.iter().map(Vec::len).collect();
    write_json_array(&dir.join(&config.report_file), &results)?;
    write_json_array(&dir.join(&config.count_file), &counts)?;

    let report = CaseReport { points: num_points, polygons: polygons.len(), preprocessing, query };
    info!(
        "{}: {} points, {} polygons; preprocessing {:.2}ms, query {:.2}ms, total {:.2}ms",
        dir.display(),
        report.points,
        report.polygons,
        report.preprocessing.as_secs_f64() * 1000.0,
        report.query.as_secs_f64() * 1000.0,
        report.total().as_secs_f64() * 1000.0
    );
    Ok(report)
}

/// Processes every discovered test case; a failing case is logged and counted.
///
/// # Errors
/// Only discovery errors abort the run.
pub fn run(config: &DriverConfig) -> Result<RunSummary> {
    let cases = discover_test_cases(config)?;
    info!("Found {} test case(s) in {}", cases.len(), config.root.display());

    let mut summary = RunSummary::default();
    for case in &cases {
        match process_test_case(case, config) {
            Ok(_) => summary.succeeded += 1,
            Err(e) => {
                error!("Error in {}: {}", case.display(), e);
                summary.failed += 1;
            }
        }
    }
    Ok(summary)
}

// --- Private helpers ---

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path)
        .map_err(|source| RangeSearchError::Io { path: path.to_path_buf(), source })?;
    serde_json::from_str(&text)
        .map_err(|source| RangeSearchError::Json { path: path.to_path_buf(), source })
}

/// Top-level elements separated by `", "`, nested values compact: `[[0,3], [], [7]]`.
fn format_json_array<T: Serialize>(items: &[T]) -> serde_json::Result<String> {
    let parts = items
        .iter()
        .map(serde_json::to_string)
        .collect::<serde_json::Result<Vec<_>>>()?;
    Ok(format!("[{}]", parts.join(", ")))
}

fn write_json_array<T: Serialize>(path: &Path, items: &[T]) -> Result<()> {
    let text = format_json_array(items)
        .map_err(|source| RangeSearchError::Json { path: path.to_path_buf(), source })?;
    fs::write(path, text).map_err(|source| RangeSearchError::Io { path: path.to_path_buf(), source })
}
