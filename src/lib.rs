#![forbid(unsafe_code)]
//! test-timeouts
//!
//! Adds a `timeout: Timeout(Duration(seconds: N))` argument to every async
//! Dart `test(...)` that lacks one, so a hung test fails instead of stalling
//! the whole run. The text transformation lives in `timeouts_core`; this
//! crate adds file I/O, directory batching, reporting and the CLI.
//!
//! ## Panic Policy
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` module enforces
//!   `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//!
//! - **True invariants**: If a panic represents a logic error, use `.expect("INVARIANT: reason")` with a clear
//!   explanation.

pub mod batch;
pub mod cli;
pub mod diff;
pub mod rewrite;

pub use timeouts_core;

pub use batch::{BatchConfig, BatchReporter, BatchSummary, ConfigError, ConsoleReporter, run_batch};
pub use diff::line_diff;
pub use rewrite::{FileError, ProcessingResult, RunMode, Status, process_file};
pub use timeouts_core::{FileClass, Rewrite, TimeoutPolicy, rewrite_source};
