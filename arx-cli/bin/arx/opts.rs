//! Command line and environment argument parsing for the action binary.

use std::path::PathBuf;

use clap::Parser;

use arx_cli::config::{parse_flag_or, ActionCommand, ActionConfig};
use arx_cli::error::ActionError;
use arx_core::format::ArchiveFormat;

/// Compress or decompress files with system archivers.
#[derive(Parser, Debug)]
#[command(
    name = "arx",
    version,
    about = "Compress or decompress files with system archivers",
    long_about = "arx drives the system zip/unzip and tar utilities to create or \
                  extract archives in CI workflows. Every option can also be \
                  supplied through the action's environment variable of the \
                  same purpose."
)]
pub struct ArxOpts {
    /// Operation to perform (compress or decompress)
    #[arg(long, env = "COMMAND", value_name = "COMMAND")]
    pub command: Option<String>,

    /// File, directory, or glob pattern to operate on
    #[arg(long, env = "SOURCE", value_name = "PATH")]
    pub source: Option<String>,

    /// Archive format (zip, tar, tgz, tbz2)
    #[arg(long, env = "FORMAT", value_name = "FORMAT")]
    pub format: Option<String>,

    /// Archive the source directory itself rather than its contents
    #[arg(
        long = "include-root",
        env = "INCLUDEROOT",
        default_value = "true",
        value_name = "BOOL"
    )]
    pub include_root: String,

    /// Space-separated patterns to exclude from the archive
    #[arg(long, env = "EXCLUDE", default_value = "", value_name = "PATTERNS")]
    pub exclude: String,

    /// Directory the archive is written to or extracted into
    #[arg(long, env = "DEST", value_name = "DIR")]
    pub dest: Option<String>,

    /// Archive file name override, without extension
    #[arg(long = "dest-filename", env = "DESTFILENAME", value_name = "NAME")]
    pub dest_filename: Option<String>,

    /// Echo archiver output and extra progress detail
    #[arg(long, env = "VERBOSE", default_value = "false", value_name = "BOOL")]
    pub verbose: String,

    /// Abort with exit code 1 on any error instead of warning
    #[arg(
        long = "fail-on-error",
        env = "FAIL_ON_ERROR",
        default_value = "true",
        value_name = "BOOL"
    )]
    pub fail_on_error: String,

    /// Workspace root that relative paths resolve against
    #[arg(long, env = "GITHUB_WORKSPACE", value_name = "DIR")]
    pub workspace: Option<PathBuf>,

    /// Host runner workspace, for container path remapping
    #[arg(
        long = "runner-workspace",
        env = "RUNNER_WORKSPACE",
        value_name = "DIR",
        hide = true
    )]
    pub runner_workspace: Option<PathBuf>,

    /// Repository slug (owner/name), for container path remapping
    #[arg(long, env = "GITHUB_REPOSITORY", value_name = "SLUG", hide = true)]
    pub repository: Option<String>,

    /// CI output file the file_path line is appended to
    #[arg(
        long = "github-output",
        env = "GITHUB_OUTPUT",
        value_name = "FILE",
        hide = true
    )]
    pub github_output: Option<PathBuf>,
}

impl ArxOpts {
    /// Parse command line arguments and environment fallbacks.
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Validate the inputs and build the runtime configuration.
    ///
    /// # Errors
    ///
    /// [`ActionError::MissingInput`] for absent required inputs,
    /// [`ActionError::InvalidCommand`] for an unknown command, and the
    /// planning error for an unsupported format.
    pub fn config(&self) -> Result<ActionConfig, ActionError> {
        let command = required(self.command.as_deref(), "Command")?;
        let source = required(self.source.as_deref(), "Source")?;
        let format = required(self.format.as_deref(), "Format")?;

        let command = command
            .parse::<ActionCommand>()
            .map_err(ActionError::InvalidCommand)?;
        let format = format
            .parse::<ArchiveFormat>()
            .map_err(ActionError::from)?;

        let workspace_root = match self.workspace.clone().filter(|p| !p.as_os_str().is_empty()) {
            Some(root) => root,
            None => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
        };

        Ok(ActionConfig {
            command,
            source: source.trim().to_string(),
            format,
            include_root: parse_flag_or(&self.include_root, true),
            exclude: self.exclude.clone(),
            dest: non_empty(self.dest.as_deref()).map(PathBuf::from),
            dest_file_name: non_empty(self.dest_filename.as_deref()),
            verbose: parse_flag_or(&self.verbose, false),
            fail_on_error: parse_flag_or(&self.fail_on_error, true),
            workspace_root,
            runner_workspace: self
                .runner_workspace
                .clone()
                .filter(|p| !p.as_os_str().is_empty()),
            repository: non_empty(self.repository.as_deref()),
            github_output: self
                .github_output
                .clone()
                .filter(|p| !p.as_os_str().is_empty()),
        })
    }
}

/// A required action input: present and non-blank.
fn required<'a>(value: Option<&'a str>, name: &'static str) -> Result<&'a str, ActionError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ActionError::MissingInput(name)),
    }
}

/// Unset action inputs arrive as empty strings; treat them as absent.
fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
