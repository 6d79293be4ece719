//! Batch progress reporting
//!
//! The driver never prints; everything the user sees goes through a
//! `BatchReporter`.

use std::path::Path;

use timeouts_core::FileClass;

use super::BatchSummary;
use crate::rewrite::{ProcessingResult, RunMode, Status};

/// Receives batch events in order
pub trait BatchReporter {
    /// Called once files are discovered, before any is processed
    fn on_batch_start(&mut self, _dir: &Path, _file_count: usize) {}

    /// Called after each file. `class` is `None` for skipped files.
    fn on_file_complete(&mut self, path: &Path, class: Option<FileClass>, seconds: u64, result: &ProcessingResult);

    /// Called once after the last file
    fn on_batch_complete(&mut self, summary: &BatchSummary);
}

/// Default console reporter
pub struct ConsoleReporter {
    pub mode: RunMode,
}

impl ConsoleReporter {
    pub fn new(mode: RunMode) -> Self {
        Self { mode }
    }
}

impl BatchReporter for ConsoleReporter {
    fn on_batch_start(&mut self, dir: &Path, file_count: usize) {
        println!("Found {} test file(s) in {}", file_count, dir.display());
        if self.mode.writes() {
            println!("Adding timeouts to async tests...");
        } else {
            println!("Checking async tests for timeouts...");
        }
        println!();
    }

    fn on_file_complete(&mut self, path: &Path, class: Option<FileClass>, seconds: u64, result: &ProcessingResult) {
        let name = path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();

        match result.status {
            Status::Modified => {
                let verb = if self.mode.writes() { "added" } else { "would add" };
                let class = class.map(FileClass::as_str).unwrap_or("default");
                println!(
                    "  {}: \x1b[32m{} {} timeout(s)\x1b[0m ({}s, {})",
                    name, verb, result.injected, seconds, class
                );
            }
            Status::Unchanged => {
                let detail = result.detail.as_deref().unwrap_or("no changes needed");
                println!("  {}: unchanged ({})", name, detail);
            }
            Status::Skipped => {
                let detail = result.detail.as_deref().unwrap_or("skipped");
                println!("  {}: \x1b[33mskipped\x1b[0m ({})", name, detail);
            }
            Status::Error => {
                let detail = result.detail.as_deref().unwrap_or("unknown error");
                eprintln!("  {}: \x1b[31merror\x1b[0m: {}", name, detail);
            }
        }

        if result.unterminated > 0 {
            eprintln!(
                "  {}: \x1b[33mwarning\x1b[0m: {} unterminated test block(s) left untouched",
                name, result.unterminated
            );
        }

        if let Some(diff) = &result.diff {
            println!("--- {}", path.display());
            print!("{}", diff);
            println!();
        }
    }

    fn on_batch_complete(&mut self, summary: &BatchSummary) {
        println!();
        let verb = if self.mode.writes() { "modified" } else { "would be modified" };
        println!(
            "====== {} {}, {} unchanged, {} skipped, {} error(s) ======",
            summary.modified, verb, summary.unchanged, summary.skipped, summary.errors
        );
        if self.mode.writes() && summary.modified > 0 {
            println!("Review the changes and run the tests to verify.");
        }
    }
}
