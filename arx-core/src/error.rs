//! Error types for archive planning.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Specialized `Result` type for planning operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Failure modes encountered while resolving sources and building plans.
#[derive(Debug, Error)]
pub enum Error {
    /// Source path does not exist
    #[error("{}: no such file or directory", path.display())]
    PathNotFound {
        /// Path that failed to resolve
        path: PathBuf,
    },

    /// Source is a symbolic link whose target is missing
    #[error("{}: symbolic link target does not exist", path.display())]
    BrokenLink {
        /// Path of the dangling link
        path: PathBuf,
    },

    /// Glob pattern matched no files
    #[error("{pattern}: no files matched")]
    NoMatch {
        /// The pattern as supplied by the user
        pattern: String,
    },

    /// Glob pattern failed to parse
    #[error("{pattern}: invalid pattern: {source}")]
    InvalidPattern {
        /// The pattern as supplied by the user
        pattern: String,
        /// Parse failure from the glob engine
        #[source]
        source: glob::PatternError,
    },

    /// Requested archive format is not in the supported set
    #[error("unsupported format: {value} (supported: zip, tar, tgz, tbz2)")]
    UnsupportedFormat {
        /// The rejected format string
        value: String,
    },

    /// Source path has no usable final component
    #[error("{}: cannot determine archive name", path.display())]
    InvalidSourceName {
        /// The offending path
        path: PathBuf,
    },

    /// Filesystem failure while preparing a plan
    #[error("{}: {source}", path.display())]
    Io {
        /// Path the operation was acting on
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}
