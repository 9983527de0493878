//! Runtime configuration for the action.

use std::path::PathBuf;
use std::str::FromStr;

use arx_core::format::ArchiveFormat;
use arx_core::paths::PathContext;

/// Operation selected by the `COMMAND` input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionCommand {
    /// Create an archive from the source
    Compress,
    /// Extract the source archive
    Decompress,
}

impl ActionCommand {
    /// Canonical lowercase name, as accepted on input.
    pub fn name(self) -> &'static str {
        match self {
            ActionCommand::Compress => "compress",
            ActionCommand::Decompress => "decompress",
        }
    }
}

impl FromStr for ActionCommand {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compress" => Ok(ActionCommand::Compress),
            "decompress" => Ok(ActionCommand::Decompress),
            other => Err(other.to_string()),
        }
    }
}

/// Explicit configuration assembled once at startup.
///
/// Passed by reference to every component; nothing below the entrypoint
/// reads ambient environment state.
#[derive(Debug, Clone)]
pub struct ActionConfig {
    /// Operation to run
    pub command: ActionCommand,
    /// Raw source input: path or glob pattern
    pub source: String,
    /// Archive format
    pub format: ArchiveFormat,
    /// Archive the source directory itself rather than its contents
    pub include_root: bool,
    /// Raw space-separated exclusion patterns
    pub exclude: String,
    /// Explicitly configured destination directory
    pub dest: Option<PathBuf>,
    /// Archive file name override, without extension
    pub dest_file_name: Option<String>,
    /// Echo archiver output and extra progress detail
    pub verbose: bool,
    /// Abort on the first error instead of warning and continuing
    pub fail_on_error: bool,
    /// Base directory for relative paths
    pub workspace_root: PathBuf,
    /// Host runner workspace, for container path remapping
    pub runner_workspace: Option<PathBuf>,
    /// Repository slug (`owner/name`), for container path remapping
    pub repository: Option<String>,
    /// CI output file the `file_path` line is appended to
    pub github_output: Option<PathBuf>,
}

impl ActionConfig {
    /// Path-resolution context for this run.
    pub fn path_context(&self) -> PathContext {
        PathContext::new(&self.workspace_root)
            .with_runner(self.runner_workspace.clone(), self.repository.clone())
    }
}

/// Parse a boolean action input the way the workflow runner passes it.
pub fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "yes"
    )
}

/// [`parse_flag`], falling back to a default for blank input.
///
/// The runner passes unset action inputs as empty strings, which must not
/// override the documented default.
pub fn parse_flag_or(value: &str, default: bool) -> bool {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        default
    } else {
        parse_flag(trimmed)
    }
}
