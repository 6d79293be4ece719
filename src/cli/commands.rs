//! CLI command implementations
//!
//! Command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use miette::Report;

use crate::batch::{BatchConfig, ConsoleReporter, run_batch};

use super::{CliError, CliResult, ExitCode};

/// Add timeouts to every candidate file under `config.test_dir`.
///
/// In write mode the run always succeeds once the directory exists; per-file
/// errors are printed but do not change the exit code. In check and diff
/// mode the exit code is 1 when any file still needs timeouts.
pub fn add_timeouts(config: &BatchConfig) -> CliResult<ExitCode> {
    let mut reporter = ConsoleReporter::new(config.mode);

    let summary = run_batch(config, &mut reporter).map_err(|e| CliError::failure(format!("{:?}", Report::new(e))))?;

    if !config.mode.writes() && summary.modified > 0 {
        return Ok(ExitCode::FAILURE);
    }

    Ok(ExitCode::SUCCESS)
}
