//! Candidate file discovery

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Collect files in `dir` whose name ends with `suffix`, sorted by path.
///
/// Subdirectories are searched only when `recursive` is set; hidden
/// directories and `build` output are never entered. Symlinked directories
/// are not followed; symlinked files are listed. Failure to list `dir`
/// itself is an error. An unreadable subdirectory is logged and skipped.
pub fn discover_test_files(dir: &Path, suffix: &str, recursive: bool) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    collect(dir, suffix, recursive, &mut files)?;
    files.sort();
    Ok(files)
}

fn collect(dir: &Path, suffix: &str, recursive: bool, files: &mut Vec<PathBuf>) -> io::Result<()> {
    for entry in fs::read_dir(dir)?.flatten() {
        let entry_path = entry.path();
        let name = entry_path.file_name().and_then(|n| n.to_str()).unwrap_or("");
        let Ok(file_type) = entry.file_type() else {
            continue;
        };

        if file_type.is_dir() {
            if recursive && !name.starts_with('.') && name != "build" {
                if let Err(e) = collect(&entry_path, suffix, recursive, files) {
                    tracing::warn!("cannot list {}: {}", entry_path.display(), e);
                }
            }
        } else if entry_path.is_file() && name.ends_with(suffix) {
            files.push(entry_path);
        }
    }
    Ok(())
}
