//! Batch driver: runs every `test_case_*` directory under a root through the engine.
//!
//! ```bash
//! RUST_LOG=info polyrange path/to/cases
//! ```

use std::process::ExitCode;

use log::error;
use polyrange::config::DriverConfig;
use polyrange::driver;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = DriverConfig::from_args(std::env::args().skip(1));
    match driver::run(&config) {
        Ok(summary) if summary.failed == 0 => ExitCode::SUCCESS,
        Ok(summary) => {
            error!("{} of {} test case(s) failed", summary.failed, summary.failed + summary.succeeded);
            ExitCode::FAILURE
        }
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
