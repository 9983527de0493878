//! Common orchestration for the `arx` action binary.
//!
//! This crate ties the planning layer (`arx-core`) to the outside world:
//! the environment-backed configuration, the subprocess runner with its
//! retry policy, console reporting, and the CI output variable. The
//! binary under `bin/arx` is a thin wrapper around [`run`].

pub mod config;
pub mod error;
pub mod operations;
pub mod output;
pub mod process;
pub mod report;
pub mod utils;


pub use config::{ActionCommand, ActionConfig};
pub use error::{ActionError, Result};

/// Run the configured operation end to end and publish its result path.
///
/// # Errors
///
/// Propagates validation, planning, execution, and output-write failures.
/// The caller decides whether an error is fatal (fail-fast) or reported as
/// a warning.
pub fn run(config: &ActionConfig) -> Result<()> {
    let produced = match config.command {
        ActionCommand::Compress => operations::compress(config)?,
        ActionCommand::Decompress => operations::decompress(config)?,
    };

    output::write_file_path(config.github_output.as_deref(), &produced)
}
