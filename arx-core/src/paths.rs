//! Source path normalization for CI runners.
//!
//! User-supplied paths arrive relative to the CI workspace, or as absolute
//! host-runner paths that must be remapped when the action executes inside a
//! container with a different mount point.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Directory roots the resolver needs to know about.
///
/// Built once from the CI environment and passed by reference; the resolver
/// itself never reads ambient state.
#[derive(Debug, Clone, Default)]
pub struct PathContext {
    /// Base directory for relative paths (`GITHUB_WORKSPACE` or the
    /// process working directory).
    pub workspace_root: PathBuf,
    /// Host-runner workspace parent (`RUNNER_WORKSPACE`), when known.
    pub runner_workspace: Option<PathBuf>,
    /// `owner/name` repository slug (`GITHUB_REPOSITORY`), when known.
    pub repository: Option<String>,
}

impl PathContext {
    /// Context anchored at the given workspace root.
    pub fn new(workspace_root: impl Into<PathBuf>) -> Self {
        PathContext {
            workspace_root: workspace_root.into(),
            runner_workspace: None,
            repository: None,
        }
    }

    /// Attach host-runner remapping information.
    pub fn with_runner(
        mut self,
        runner_workspace: Option<PathBuf>,
        repository: Option<String>,
    ) -> Self {
        self.runner_workspace = runner_workspace;
        self.repository = repository;
        self
    }

    /// The host-side checkout prefix: `<runner_workspace>/<repo short name>`.
    ///
    /// This is what `GITHUB_WORKSPACE` points at on the runner host; inside a
    /// container the same tree is mounted at [`PathContext::workspace_root`].
    fn runner_prefix(&self) -> Option<PathBuf> {
        let runner = self.runner_workspace.as_ref()?;
        let repository = self.repository.as_deref()?;
        let short_name = repository.rsplit('/').next()?;
        if short_name.is_empty() {
            return None;
        }
        Some(runner.join(short_name))
    }
}

/// Normalize a user-supplied source path to an absolute path.
///
/// Leading and trailing whitespace is trimmed. Absolute paths pass through,
/// except that a path under the host-runner checkout prefix is rebased onto
/// the workspace root. Relative paths are joined to the workspace root.
///
/// # Errors
///
/// [`Error::PathNotFound`] when the result does not exist, and
/// [`Error::BrokenLink`] when it is a symbolic link whose target is missing.
/// Whether either aborts the run is the caller's fail-fast decision.
pub fn resolve(raw: &str, ctx: &PathContext) -> Result<PathBuf> {
    let trimmed = raw.trim();
    let candidate = Path::new(trimmed);

    let resolved = if candidate.is_absolute() {
        remap_runner_path(candidate, ctx)
    } else {
        ctx.workspace_root.join(candidate)
    };

    ensure_present(&resolved)?;
    Ok(resolved)
}

/// Rebase a host-runner path onto the container workspace root.
fn remap_runner_path(path: &Path, ctx: &PathContext) -> PathBuf {
    if let Some(prefix) = ctx.runner_prefix() {
        if prefix != ctx.workspace_root {
            if let Ok(rest) = path.strip_prefix(&prefix) {
                return ctx.workspace_root.join(rest);
            }
        }
    }
    path.to_path_buf()
}

/// Verify the path exists, distinguishing a dangling symlink from absence.
fn ensure_present(path: &Path) -> Result<()> {
    match path.symlink_metadata() {
        Err(_) => Err(Error::PathNotFound {
            path: path.to_path_buf(),
        }),
        Ok(meta) if meta.file_type().is_symlink() => {
            // The link entry exists; the target must too.
            if path.metadata().is_ok() {
                Ok(())
            } else {
                Err(Error::BrokenLink {
                    path: path.to_path_buf(),
                })
            }
        }
        Ok(_) => Ok(()),
    }
}
