//! Exclusion pattern rendering for zip and tar invocations.
//!
//! The raw input is a single space-separated string. Two rules here are
//! load-bearing: root-name prefixing when the archive includes the source
//! directory itself, and dual expansion of directory patterns. Archivers
//! match a directory entry and its contents independently, so excluding
//! `build` must emit both a contents pattern and a directory marker or the
//! contents survive in the archive.

use std::ffi::OsString;
use std::path::Path;

use crate::format::ToolKind;

/// Split the raw space-separated exclude input into patterns.
///
/// Tokens are trimmed by the split itself; empty tokens are dropped.
pub fn split_patterns(raw: &str) -> Vec<String> {
    raw.split_whitespace().map(str::to_string).collect()
}

/// Render exclusion arguments for one archiver invocation.
///
/// `source_dir` is the directory being archived and `source_name` its base
/// name; patterns are checked against `source_dir` to decide whether they
/// name a directory. Returns ready-to-append argument vectors:
/// `-x <pattern>` pairs for zip, single `--exclude=<pattern>` arguments
/// for tar.
pub fn exclude_args(
    patterns: &[String],
    tool: ToolKind,
    include_root: bool,
    source_dir: &Path,
    source_name: &str,
) -> Vec<OsString> {
    let mut expanded = Vec::new();
    for pattern in patterns {
        let prefixed = if include_root {
            prefix_with_root(pattern, source_name)
        } else {
            pattern.clone()
        };
        push_expanded(
            &mut expanded,
            prefixed,
            tool,
            include_root,
            source_dir,
            source_name,
        );
    }

    render(&expanded, tool)
}

fn render(patterns: &[String], tool: ToolKind) -> Vec<OsString> {
    match tool {
        ToolKind::Zip => patterns
            .iter()
            .flat_map(|pattern| [OsString::from("-x"), OsString::from(pattern)])
            .collect(),
        ToolKind::Tar => patterns
            .iter()
            .map(|pattern| OsString::from(format!("--exclude={pattern}")))
            .collect(),
    }
}

/// Prefix a pattern with `<source_name>/` unless it already carries it.
fn prefix_with_root(pattern: &str, source_name: &str) -> String {
    let prefix = format!("{source_name}/");
    if pattern == source_name || pattern.starts_with(&prefix) {
        pattern.to_string()
    } else {
        format!("{prefix}{pattern}")
    }
}

/// Emit the pattern, doubling it for directories.
///
/// The directory-marker spelling is tool specific: zip stores directory
/// entries with a trailing slash, while tar strips trailing slashes before
/// matching, so the marker is `<p>/` for zip and bare `<p>` for tar.
fn push_expanded(
    out: &mut Vec<String>,
    pattern: String,
    tool: ToolKind,
    include_root: bool,
    source_dir: &Path,
    source_name: &str,
) {
    // Where the pattern points on disk, relative to the archived tree.
    let relative = if include_root {
        let prefix = format!("{source_name}/");
        pattern
            .strip_prefix(&prefix)
            .unwrap_or(pattern.as_str())
            .to_string()
    } else {
        pattern.clone()
    };

    let names_directory = !relative.is_empty() && source_dir.join(&relative).is_dir();
    if names_directory && !pattern.ends_with("/*") {
        let base = pattern.trim_end_matches('/');
        out.push(format!("{base}/*"));
        match tool {
            ToolKind::Zip => out.push(format!("{base}/")),
            ToolKind::Tar => out.push(base.to_string()),
        }
    } else {
        out.push(pattern);
    }
}
