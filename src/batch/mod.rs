//! Batch driver
//!
//! Walks a test directory in sorted order, classifies every candidate file,
//! and runs the file rewriter on each one. Files are handled one at a time;
//! a failure on one file is recorded and the batch moves on. Only a missing
//! or unlistable test directory stops the run, and it does so before any
//! file is touched.

mod discovery;
mod reporter;

pub use discovery::discover_test_files;
pub use reporter::{BatchReporter, ConsoleReporter};

use std::collections::BTreeSet;
use std::io;
use std::path::{Path, PathBuf};

use miette::Diagnostic;
use thiserror::Error;
use timeouts_core::TimeoutPolicy;

use crate::rewrite::{ProcessingResult, RunMode, Status, process_file};

/// Directory searched when none is given
pub const DEFAULT_TEST_DIR: &str = "test";

/// File name suffix of candidate test files
pub const DEFAULT_SUFFIX: &str = "_test.dart";

/// Errors that abort a batch before any file is processed
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("test directory not found: {}", .0.display())]
    #[diagnostic(
        code(test_timeouts::missing_test_dir),
        help("run from the package root, or pass the test directory as an argument")
    )]
    MissingTestDir(PathBuf),

    #[error("{} is not a directory", .0.display())]
    #[diagnostic(code(test_timeouts::not_a_directory))]
    NotADirectory(PathBuf),

    #[error("cannot list {}: {source}", .path.display())]
    #[diagnostic(code(test_timeouts::unreadable_test_dir))]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Everything a batch run needs, fixed before the first file is read
#[derive(Debug, Clone)]
pub struct BatchConfig {
    pub test_dir: PathBuf,
    /// Candidate files end with this
    pub suffix: String,
    /// File names reported as skipped without being read
    pub skip_files: BTreeSet<String>,
    pub recursive: bool,
    pub mode: RunMode,
    pub policy: TimeoutPolicy,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            test_dir: PathBuf::from(DEFAULT_TEST_DIR),
            suffix: DEFAULT_SUFFIX.to_string(),
            skip_files: BTreeSet::new(),
            recursive: false,
            mode: RunMode::Write,
            policy: TimeoutPolicy::default(),
        }
    }
}

impl BatchConfig {
    pub fn new(test_dir: impl Into<PathBuf>) -> Self {
        Self {
            test_dir: test_dir.into(),
            ..Self::default()
        }
    }

    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    pub fn with_skip_files<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skip_files = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    pub fn with_mode(mut self, mode: RunMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_policy(mut self, policy: TimeoutPolicy) -> Self {
        self.policy = policy;
        self
    }
}

/// Aggregate counts over one batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub modified: usize,
    pub unchanged: usize,
    pub skipped: usize,
    pub errors: usize,
    /// Timeouts injected across all modified files
    pub injected: usize,
}

impl BatchSummary {
    pub fn record(&mut self, result: &ProcessingResult) {
        match result.status {
            Status::Modified => self.modified += 1,
            Status::Unchanged => self.unchanged += 1,
            Status::Skipped => self.skipped += 1,
            Status::Error => self.errors += 1,
        }
        self.injected += result.injected;
    }

    pub fn total(&self) -> usize {
        self.modified + self.unchanged + self.skipped + self.errors
    }
}

/// Run the rewriter over every candidate file in `config.test_dir`.
pub fn run_batch(config: &BatchConfig, reporter: &mut dyn BatchReporter) -> Result<BatchSummary, ConfigError> {
    let dir = config.test_dir.as_path();
    if !dir.exists() {
        return Err(ConfigError::MissingTestDir(dir.to_path_buf()));
    }
    if !dir.is_dir() {
        return Err(ConfigError::NotADirectory(dir.to_path_buf()));
    }

    let files =
        discover_test_files(dir, &config.suffix, config.recursive).map_err(|source| ConfigError::Unreadable {
            path: dir.to_path_buf(),
            source,
        })?;

    tracing::info!(dir = %dir.display(), files = files.len(), mode = ?config.mode, "starting batch");
    reporter.on_batch_start(dir, files.len());

    let mut summary = BatchSummary::default();
    for path in &files {
        let name = file_name(path);

        if config.skip_files.contains(name) {
            let result = ProcessingResult::skipped("already processed");
            reporter.on_file_complete(path, None, 0, &result);
            summary.record(&result);
            continue;
        }

        let class = config.policy.classify(name);
        let seconds = config.policy.duration_for(class);
        tracing::debug!(file = name, class = class.as_str(), seconds, "processing");

        let result = process_file(path, seconds, config.mode);
        reporter.on_file_complete(path, Some(class), seconds, &result);
        summary.record(&result);
    }

    reporter.on_batch_complete(&summary);
    Ok(summary)
}

fn file_name(path: &Path) -> &str {
    path.file_name().and_then(|n| n.to_str()).unwrap_or("")
}
