//! CI output variable writing.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use crate::error::{ActionError, Result};

/// Append `file_path=<value>` to the CI output file.
///
/// Falls back to printing the same line on stdout when no output file is
/// configured, so local runs still surface the result.
///
/// # Errors
///
/// [`ActionError::OutputWrite`] when the output file cannot be opened or
/// appended to.
pub fn write_file_path(output_file: Option<&Path>, value: &Path) -> Result<()> {
    match output_file {
        Some(path) => {
            let mut file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|source| ActionError::OutputWrite {
                    path: path.to_path_buf(),
                    source,
                })?;
            writeln!(file, "file_path={}", value.display()).map_err(|source| {
                ActionError::OutputWrite {
                    path: path.to_path_buf(),
                    source,
                }
            })?;
        }
        None => println!("file_path={}", value.display()),
    }

    Ok(())
}
