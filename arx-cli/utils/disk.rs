//! On-disk size measurement.

use std::path::Path;

use walkdir::WalkDir;

/// Total size of a file, or the sum of all file sizes under a directory.
///
/// Unreadable entries are skipped rather than failing the report.
pub fn size_of(path: &Path) -> u64 {
    if path.is_file() {
        return path.metadata().map(|meta| meta.len()).unwrap_or(0);
    }

    WalkDir::new(path)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| entry.metadata().ok())
        .map(|meta| meta.len())
        .sum()
}
