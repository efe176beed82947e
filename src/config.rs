//! Driver configuration

use std::path::PathBuf;

/// Environment variable consulted for the driver root when no argument is given.
pub const ROOT_ENV_VAR: &str = "POLYRANGE_ROOT";

/// Where the driver looks for test cases and how their files are named.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverConfig {
    /// Directory scanned for test-case subdirectories
    pub root: PathBuf,
    /// Prefix a subdirectory name must start with to count as a test case
    pub case_prefix: String,
    /// Dataset file inside a test case
    pub points_file: String,
    /// Query polygons file inside a test case
    pub query_file: String,
    /// Output: one index array per polygon
    pub report_file: String,
    /// Output: one count per polygon
    pub count_file: String,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            case_prefix: "test_case_".to_owned(),
            points_file: "input_points.json".to_owned(),
            query_file: "input_query.json".to_owned(),
            report_file: "output_result_report.json".to_owned(),
            count_file: "output_result_count.json".to_owned(),
        }
    }
}

impl DriverConfig {
    /// Default file names under `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Default::default()
        }
    }

    /// Root from the first argument, then [`ROOT_ENV_VAR`], then `.`.
    pub fn from_args<I>(args: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        match args.into_iter().next() {
            Some(root) => Self::new(root),
            None => match std::env::var(ROOT_ENV_VAR) {
                Ok(root) if !root.is_empty() => Self::new(root),
                _ => Self::default(),
            },
        }
    }
}
