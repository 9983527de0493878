//! Glob detection and expansion for source selection.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

const GLOB_CHARS: [char; 4] = ['*', '?', '[', ']'];

/// True if the string contains glob syntax and should be expanded rather
/// than resolved as a literal path.
pub fn is_pattern(source: &str) -> bool {
    source.chars().any(|c| GLOB_CHARS.contains(&c))
}

/// Expand a glob pattern to the regular files it matches.
///
/// Relative patterns are anchored at `base_dir`. `**` recursion is
/// supported. Matches are returned in traversal order, deduplicated, and
/// filtered to regular files; symlinks are followed, so a dangling link is
/// never reported as a match.
///
/// # Errors
///
/// [`Error::InvalidPattern`] when the pattern does not parse, and
/// [`Error::NoMatch`] when nothing matched. Soft-fail handling of the
/// latter belongs to the caller.
pub fn expand(pattern: &str, base_dir: &Path) -> Result<Vec<PathBuf>> {
    let trimmed = pattern.trim();
    let anchored = if Path::new(trimmed).is_absolute() {
        trimmed.to_string()
    } else {
        base_dir.join(trimmed).to_string_lossy().into_owned()
    };

    // A leading `**/` must also match zero components, so `**/*.doc` picks
    // up files directly under the base directory.
    let mut candidates = vec![anchored];
    if let Some(rest) = trimmed.strip_prefix("**/") {
        candidates.push(base_dir.join(rest).to_string_lossy().into_owned());
    }

    let mut seen = HashSet::new();
    let mut files = Vec::new();
    for candidate in &candidates {
        let entries = glob::glob(candidate).map_err(|source| Error::InvalidPattern {
            pattern: trimmed.to_string(),
            source,
        })?;
        for entry in entries {
            let Ok(path) = entry else {
                // Unreadable directories are skipped, matching archiver behavior.
                continue;
            };
            if !path.is_file() {
                continue;
            }
            if seen.insert(path.clone()) {
                files.push(path);
            }
        }
    }

    if files.is_empty() {
        return Err(Error::NoMatch {
            pattern: trimmed.to_string(),
        });
    }
    Ok(files)
}
