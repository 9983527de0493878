//! Error types for the action CLI.

use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

/// Specialized `Result` type for action operations.
pub type Result<T> = std::result::Result<T, ActionError>;

/// Failure modes of a full action run.
///
/// Whether any of these aborts the process with exit code 1 or is reported
/// as a warning is decided by the fail-fast flag at the entrypoint; the
/// variants themselves carry no severity.
#[derive(Debug, Error)]
pub enum ActionError {
    /// A required input was not provided
    #[error("{0} is required")]
    MissingInput(&'static str),

    /// The `COMMAND` input named an unknown operation
    #[error("invalid command: {0} (supported: compress, decompress)")]
    InvalidCommand(String),

    /// Planning failed: path resolution, glob expansion, format, staging
    #[error(transparent)]
    Plan(#[from] arx_core::Error),

    /// An archiver binary could not be started
    #[error("failed to start {program}: {source}")]
    Spawn {
        /// Program that failed to spawn
        program: String,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// An archiver exited nonzero after retries were exhausted
    #[error("{program} exited with {status}: {stderr}")]
    CommandFailed {
        /// Program that failed
        program: String,
        /// Exit status of the final attempt
        status: ExitStatus,
        /// Captured standard error of the final attempt
        stderr: String,
    },

    /// The CI output file could not be written
    #[error("{}: {source}", path.display())]
    OutputWrite {
        /// Output file path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Filesystem failure during orchestration
    #[error("{}: {source}", path.display())]
    Io {
        /// Path the operation was acting on
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },
}

impl ActionError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        ActionError::Io {
            path: path.into(),
            source,
        }
    }
}
