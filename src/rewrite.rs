//! File-level rewriting
//!
//! Reads a whole test file, runs the text rewriter over it, and replaces the
//! file only if at least one timeout was injected. The replacement goes
//! through a temporary file in the same directory and a rename, so the file
//! on disk is always either the original or the complete rewrite.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;
use timeouts_core::rewrite_source;

use crate::diff::line_diff;

/// What to do with a file that needs timeouts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunMode {
    /// Rewrite files in place
    #[default]
    Write,
    /// Report files that would change, touch nothing
    Check,
    /// Like `Check`, and include a line diff of each change
    Diff,
}

impl RunMode {
    pub fn writes(self) -> bool {
        matches!(self, RunMode::Write)
    }
}

/// Per-file outcome tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Modified,
    Unchanged,
    Skipped,
    Error,
}

/// Outcome of processing one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessingResult {
    pub status: Status,
    /// Human-readable reason or error message
    pub detail: Option<String>,
    /// Timeouts injected (or that would be, outside `Write` mode)
    pub injected: usize,
    /// Tests that already had a timeout
    pub already_timed: usize,
    /// Declarations left alone because their block never closed
    pub unterminated: usize,
    /// Line diff of the change, `Diff` mode only
    pub diff: Option<String>,
}

impl ProcessingResult {
    fn new(status: Status, detail: Option<String>) -> Self {
        Self {
            status,
            detail,
            injected: 0,
            already_timed: 0,
            unterminated: 0,
            diff: None,
        }
    }

    pub fn skipped(reason: impl Into<String>) -> Self {
        Self::new(Status::Skipped, Some(reason.into()))
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Status::Error, Some(message.into()))
    }
}

/// I/O failures while processing one file
#[derive(Debug, Error)]
pub enum FileError {
    #[error("cannot read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Process one file. I/O failures become a `Status::Error` result.
pub fn process_file(path: &Path, seconds: u64, mode: RunMode) -> ProcessingResult {
    match try_process_file(path, seconds, mode) {
        Ok(result) => result,
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "file failed");
            ProcessingResult::error(e.to_string())
        }
    }
}

fn try_process_file(path: &Path, seconds: u64, mode: RunMode) -> Result<ProcessingResult, FileError> {
    let source = fs::read_to_string(path).map_err(|source| FileError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let rewrite = rewrite_source(&source, seconds);

    let mut result = if !rewrite.is_changed() {
        let detail = if rewrite.declarations() == 0 {
            "no async tests"
        } else {
            "all async tests already have timeouts"
        };
        ProcessingResult::new(Status::Unchanged, Some(detail.to_string()))
    } else {
        if mode.writes() {
            write_atomically(path, &rewrite.text)?;
        }
        let mut result = ProcessingResult::new(Status::Modified, None);
        if mode == RunMode::Diff {
            result.diff = line_diff(&source, &rewrite.text);
        }
        result
    };

    result.injected = rewrite.injected;
    result.already_timed = rewrite.already_timed;
    result.unterminated = rewrite.unterminated.len();
    Ok(result)
}

/// Replace `path` with `contents` via a sibling temp file and rename.
pub fn write_atomically(path: &Path, contents: &str) -> Result<(), FileError> {
    let write_err = |source: io::Error| FileError::Write {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
    tmp.write_all(contents.as_bytes()).map_err(write_err)?;
    tmp.as_file().sync_all().map_err(write_err)?;

    if let Ok(metadata) = fs::metadata(path) {
        fs::set_permissions(tmp.path(), metadata.permissions()).map_err(write_err)?;
    }

    tmp.persist(path).map_err(|e| write_err(e.error))?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const UNTIMED: &str = "test('x', () async { doSomething(); });";
    const TIMED: &str = "test('x', () async { doSomething(); }, timeout: Timeout(Duration(seconds: 5)));";

    fn write_file(dir: &Path, name: &str, contents: &[u8]) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    // ========================================
    // Write mode
    // ========================================

    #[test]
    fn test_modified_then_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "core_test.dart", UNTIMED.as_bytes());

        let first = process_file(&path, 5, RunMode::Write);
        assert_eq!(first.status, Status::Modified);
        assert_eq!(first.injected, 1);
        assert_eq!(fs::read_to_string(&path).unwrap(), TIMED);

        let second = process_file(&path, 5, RunMode::Write);
        assert_eq!(second.status, Status::Unchanged);
        assert_eq!(second.already_timed, 1);
        assert_eq!(fs::read_to_string(&path).unwrap(), TIMED);
    }

    #[test]
    fn test_no_tests_leaves_file_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "util_test.dart", b"void main() {}\n");
        let before = fs::metadata(&path).unwrap().modified().unwrap();

        let result = process_file(&path, 5, RunMode::Write);
        assert_eq!(result.status, Status::Unchanged);
        assert_eq!(result.detail.as_deref(), Some("no async tests"));
        assert_eq!(fs::metadata(&path).unwrap().modified().unwrap(), before);
    }

    #[test]
    fn test_unterminated_is_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let src = "test('x', () async {\n  a();\n";
        let path = write_file(dir.path(), "broken_test.dart", src.as_bytes());

        let result = process_file(&path, 5, RunMode::Write);
        assert_eq!(result.status, Status::Unchanged);
        assert_eq!(result.unterminated, 1);
        assert_eq!(fs::read_to_string(&path).unwrap(), src);
    }

    // ========================================
    // Check and diff modes
    // ========================================

    #[test]
    fn test_check_mode_does_not_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "core_test.dart", UNTIMED.as_bytes());

        let result = process_file(&path, 5, RunMode::Check);
        assert_eq!(result.status, Status::Modified);
        assert!(result.diff.is_none());
        assert_eq!(fs::read_to_string(&path).unwrap(), UNTIMED);
    }

    #[test]
    fn test_diff_mode_reports_diff() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "core_test.dart", UNTIMED.as_bytes());

        let result = process_file(&path, 5, RunMode::Diff);
        let diff = result.diff.unwrap();
        assert!(diff.contains(&format!("-   1 | {UNTIMED}")));
        assert!(diff.contains(&format!("+   1 | {TIMED}")));
        assert_eq!(fs::read_to_string(&path).unwrap(), UNTIMED);
    }

    // ========================================
    // Errors
    // ========================================

    #[test]
    fn test_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = process_file(&dir.path().join("gone_test.dart"), 5, RunMode::Write);
        assert_eq!(result.status, Status::Error);
        assert!(result.detail.unwrap().starts_with("cannot read"));
    }

    #[test]
    fn test_invalid_utf8_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "bin_test.dart", &[0xff, 0xfe, b't']);
        let result = process_file(&path, 5, RunMode::Write);
        assert_eq!(result.status, Status::Error);
        assert_eq!(fs::read(&path).unwrap(), vec![0xff, 0xfe, b't']);
    }

    #[test]
    fn test_write_atomically_replaces_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "a_test.dart", b"old");
        write_atomically(&path, "new").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_write_atomically_missing_dir_is_write_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope/a_test.dart");

        let err = write_atomically(&path, "x").unwrap_err();
        assert!(matches!(&err, FileError::Write { path: p, .. } if *p == path));
        assert!(err.to_string().starts_with("cannot write"));
        assert!(!path.exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_unwritable_dir_is_error_and_keeps_original() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let locked = dir.path().join("locked");
        fs::create_dir(&locked).unwrap();
        let path = write_file(&locked, "core_test.dart", UNTIMED.as_bytes());
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o555)).unwrap();

        // Permission bits do not bind a privileged user.
        if fs::File::create(locked.join("canary")).is_ok() {
            fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let result = process_file(&path, 5, RunMode::Write);
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        assert_eq!(result.status, Status::Error);
        assert!(result.detail.unwrap().starts_with("cannot write"));
        assert_eq!(fs::read_to_string(&path).unwrap(), UNTIMED);
        assert_eq!(fs::read_dir(&locked).unwrap().count(), 1);
    }
}
