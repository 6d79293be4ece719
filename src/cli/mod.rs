//! Command-line interface
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.
//!
//! Every flag has a default equal to the built-in constants, so running the
//! binary with no arguments from a package root processes `test/*_test.dart`.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use timeouts_core::{DEFAULT_TIMEOUT_SECS, NETWORK_TIMEOUT_SECS, TimeoutPolicy};

use crate::batch::{BatchConfig, DEFAULT_SUFFIX, DEFAULT_TEST_DIR};
use crate::rewrite::RunMode;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Add missing timeouts to async Dart tests
#[derive(Parser, Debug)]
#[command(name = "test-timeouts")]
#[command(version = VERSION)]
#[command(about = "Add missing timeouts to async Dart tests", long_about = None)]
pub struct Cli {
    /// Directory containing the test files
    #[arg(value_name = "DIR", default_value = DEFAULT_TEST_DIR)]
    pub dir: PathBuf,

    /// File name suffix of test files
    #[arg(long, value_name = "SUFFIX", default_value = DEFAULT_SUFFIX)]
    pub suffix: String,

    /// Timeout for ordinary test files, in seconds
    #[arg(long, value_name = "SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub default_timeout: u64,

    /// Timeout for network test files, in seconds
    #[arg(long, value_name = "SECS", default_value_t = NETWORK_TIMEOUT_SECS)]
    pub network_timeout: u64,

    /// File name treated as a network test (repeatable; replaces the built-in set)
    #[arg(long = "network-file", value_name = "NAME")]
    pub network_files: Vec<String>,

    /// File name to report as skipped without reading it (repeatable)
    #[arg(long = "skip", value_name = "NAME")]
    pub skip_files: Vec<String>,

    /// Also search subdirectories
    #[arg(short, long)]
    pub recursive: bool,

    /// Report files that need timeouts without modifying them
    #[arg(long, conflicts_with = "diff")]
    pub check: bool,

    /// Show a diff of the timeouts that would be added, without modifying files
    #[arg(long)]
    pub diff: bool,
}

impl Cli {
    pub fn mode(&self) -> RunMode {
        if self.diff {
            RunMode::Diff
        } else if self.check {
            RunMode::Check
        } else {
            RunMode::Write
        }
    }

    /// Build the immutable run configuration from parsed flags.
    pub fn batch_config(&self) -> BatchConfig {
        let mut policy = TimeoutPolicy::new()
            .with_default_secs(self.default_timeout)
            .with_network_secs(self.network_timeout);
        if !self.network_files.is_empty() {
            policy = policy.with_network_files(self.network_files.iter().cloned());
        }

        BatchConfig::new(&self.dir)
            .with_suffix(&self.suffix)
            .with_skip_files(self.skip_files.iter().cloned())
            .with_recursive(self.recursive)
            .with_mode(self.mode())
            .with_policy(policy)
    }
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the parsed command line and return the exit code.
fn execute(cli: Cli) -> CliResult<ExitCode> {
    commands::add_timeouts(&cli.batch_config())
}

// ============================================================================
// Tests
// ============================================================================
