//! Invocation planning for compress and extract runs.
//!
//! Plans are derived once from a validated request and are immutable
//! afterwards. Every external command is a structured [`Invocation`]
//! (program, argument vector, optional working directory) spawned without a
//! shell, so paths and user patterns pass through verbatim. Archives are
//! written to a dot-prefixed scratch file in the destination directory and
//! renamed into place by [`ArchivePlan::commit`] only after the archiver
//! succeeds, which keeps re-running a failed plan safe.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::error::{Error, Result};
use crate::exclude;
use crate::format::{ArchiveFormat, ToolKind};

/// One external command, ready to spawn without a shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Program name, resolved through `PATH`
    pub program: &'static str,
    /// Argument vector, passed verbatim
    pub args: Vec<OsString>,
    /// Working directory for the child, when it must differ from the parent's
    pub cwd: Option<PathBuf>,
}

impl Invocation {
    fn new(program: &'static str) -> Self {
        Invocation {
            program,
            args: Vec::new(),
            cwd: None,
        }
    }

    /// Single-line rendering for progress output.
    pub fn display_line(&self) -> String {
        let mut line = String::new();
        if let Some(cwd) = &self.cwd {
            line.push('[');
            line.push_str(&cwd.display().to_string());
            line.push_str("] ");
        }
        line.push_str(self.program);
        for arg in &self.args {
            line.push(' ');
            line.push_str(&arg.to_string_lossy());
        }
        line
    }
}

/// What to archive and where to put it.
#[derive(Debug, Clone)]
pub struct ArchiveRequest {
    /// Resolved source path (regular file or directory)
    pub source: PathBuf,
    /// Archive format to produce
    pub format: ArchiveFormat,
    /// Archive the source directory itself rather than its contents
    pub include_root: bool,
    /// Exclusion patterns, already split from the raw input
    pub exclude_patterns: Vec<String>,
    /// Explicitly configured destination directory, if any
    pub dest_dir: Option<PathBuf>,
    /// Override for the archive file name (without extension)
    pub dest_file_name: Option<String>,
}

/// A set of resolved files (typically a glob expansion) to archive.
#[derive(Debug, Clone)]
pub struct FilesetRequest {
    /// Files to include; paths inside the archive are relative to `base_dir`
    pub files: Vec<PathBuf>,
    /// Directory the member paths are made relative to
    pub base_dir: PathBuf,
    /// Archive format to produce
    pub format: ArchiveFormat,
    /// Exclusion patterns, already split from the raw input
    pub exclude_patterns: Vec<String>,
    /// Explicitly configured destination directory, if any
    pub dest_dir: Option<PathBuf>,
    /// Override for the archive file name (without extension)
    pub dest_file_name: Option<String>,
}

/// Fully derived compress plan.
///
/// Holding the plan keeps its staging directory alive; dropping it removes
/// the staging tree whether or not execution succeeded.
#[derive(Debug)]
pub struct ArchivePlan {
    steps: Vec<Invocation>,
    scratch_output: PathBuf,
    destination: PathBuf,
    staging: Option<TempDir>,
}

impl ArchivePlan {
    /// Commands to execute, in order.
    pub fn steps(&self) -> &[Invocation] {
        &self.steps
    }

    /// Final archive path, valid only after [`ArchivePlan::commit`].
    pub fn destination(&self) -> &Path {
        &self.destination
    }

    /// In-progress archive path the steps write to.
    pub fn scratch_output(&self) -> &Path {
        &self.scratch_output
    }

    /// Whether the plan stages files through a temporary directory.
    pub fn uses_staging(&self) -> bool {
        self.staging.is_some()
    }

    /// Staging directory path, while the plan is alive.
    pub fn staging_path(&self) -> Option<&Path> {
        self.staging.as_ref().map(TempDir::path)
    }

    /// Promote the scratch archive to its final destination.
    ///
    /// A rename within one directory, so the destination is never observable
    /// in a half-written state.
    pub fn commit(&self) -> Result<()> {
        fs::rename(&self.scratch_output, &self.destination)
            .map_err(|source| Error::io(&self.destination, source))
    }
}

/// Extraction request: format alone decides tool and flags.
#[derive(Debug, Clone)]
pub struct ExtractRequest {
    /// Resolved archive path
    pub archive: PathBuf,
    /// Format the archive was created with
    pub format: ArchiveFormat,
    /// Explicitly configured destination directory, if any
    pub dest_dir: Option<PathBuf>,
}

/// Fully derived extract plan.
#[derive(Debug)]
pub struct ExtractPlan {
    step: Invocation,
    archive: PathBuf,
    dest_dir: Option<PathBuf>,
}

impl ExtractPlan {
    /// The single extraction command.
    pub fn step(&self) -> &Invocation {
        &self.step
    }

    /// The archive being extracted.
    pub fn archive(&self) -> &Path {
        &self.archive
    }

    /// Destination directory, or `None` for the current directory.
    pub fn dest_dir(&self) -> Option<&Path> {
        self.dest_dir.as_deref()
    }
}

/// Build the compress plan for a resolved file or directory source.
///
/// Directory sources follow the format × include-root decision table; a
/// rootless single file is staged so every format takes the same
/// "archive a directory's contents" shape.
///
/// # Errors
///
/// Fails when the source has no usable base name or a staging directory
/// cannot be created.
pub fn build_archive_plan(request: &ArchiveRequest) -> Result<ArchivePlan> {
    let source_name = base_name(&request.source)?;

    if request.source.is_dir() || request.include_root {
        build_source_plan(request, &source_name)
    } else {
        let fileset = FilesetRequest {
            files: vec![request.source.clone()],
            base_dir: parent_of(&request.source),
            format: request.format,
            exclude_patterns: request.exclude_patterns.clone(),
            dest_dir: request.dest_dir.clone(),
            dest_file_name: Some(
                request
                    .dest_file_name
                    .clone()
                    .unwrap_or_else(|| source_name.clone()),
            ),
        };
        build_fileset_plan(&fileset)
    }
}

/// Build the compress plan for a staged file set.
///
/// Members are copied into a staging directory (relative paths preserved)
/// at plan-build time, then archived with the rootless strategy. The
/// archive name defaults to `archive.<ext>` unless overridden.
///
/// # Errors
///
/// Fails when the staging directory cannot be created or a member cannot be
/// copied into it.
pub fn build_fileset_plan(request: &FilesetRequest) -> Result<ArchivePlan> {
    let staging = TempDir::new().map_err(|source| Error::io(&request.base_dir, source))?;

    for file in &request.files {
        let relative = match file.strip_prefix(&request.base_dir) {
            Ok(rest) => rest.to_path_buf(),
            Err(_) => PathBuf::from(base_name(file)?),
        };
        let target = staging.path().join(&relative);
        if let Some(dir) = target.parent() {
            fs::create_dir_all(dir).map_err(|source| Error::io(dir, source))?;
        }
        fs::copy(file, &target).map_err(|source| Error::io(file, source))?;
    }

    let dest_dir = request
        .dest_dir
        .clone()
        .unwrap_or_else(|| request.base_dir.clone());
    let stem = request
        .dest_file_name
        .clone()
        .unwrap_or_else(|| "archive".to_string());
    let destination = dest_dir.join(archive_file_name(&stem, request.format));
    let scratch = dest_dir.join(scratch_file_name(&stem, request.format));

    let staged_root = staging.path().to_path_buf();
    let step = match request.format.tool() {
        ToolKind::Zip => {
            let excludes = exclude::exclude_args(
                &request.exclude_patterns,
                ToolKind::Zip,
                false,
                &staged_root,
                &stem,
            );
            let mut zip = Invocation::new("zip");
            zip.args.push("-r".into());
            zip.args.push(os(&scratch));
            zip.args.push(".".into());
            zip.args.extend(excludes);
            zip.cwd = Some(staged_root);
            zip
        }
        ToolKind::Tar => {
            let excludes = exclude::exclude_args(
                &request.exclude_patterns,
                ToolKind::Tar,
                false,
                &staged_root,
                &stem,
            );
            let mut tar = Invocation::new("tar");
            tar.args.extend(excludes);
            tar.args.push(request.format.create_flag().into());
            tar.args.push(os(&scratch));
            tar.args.push("-C".into());
            tar.args.push(os(&staged_root));
            tar.args.push(".".into());
            tar
        }
    };

    Ok(ArchivePlan {
        steps: vec![step],
        scratch_output: scratch,
        destination,
        staging: Some(staging),
    })
}

/// Build the extract plan; format alone selects tool and flags.
pub fn build_extract_plan(request: &ExtractRequest) -> ExtractPlan {
    let step = match request.format.tool() {
        ToolKind::Zip => {
            let mut unzip = Invocation::new("unzip");
            match &request.dest_dir {
                Some(dest) => {
                    unzip.args.push("-d".into());
                    unzip.args.push(os(dest));
                }
                None => {
                    unzip.args.push("-j".into());
                    unzip.args.push("-d".into());
                    unzip.args.push(".".into());
                }
            }
            unzip.args.push(os(&request.archive));
            unzip
        }
        ToolKind::Tar => {
            let mut tar = Invocation::new("tar");
            tar.args.push(request.format.extract_flag().into());
            tar.args.push(os(&request.archive));
            tar.args.push("-C".into());
            tar.args.push(match &request.dest_dir {
                Some(dest) => os(dest),
                None => ".".into(),
            });
            tar
        }
    };

    ExtractPlan {
        step,
        archive: request.archive.clone(),
        dest_dir: request.dest_dir.clone(),
    }
}

/// Decision table rows for directory sources (and rooted single files).
fn build_source_plan(request: &ArchiveRequest, source_name: &str) -> Result<ArchivePlan> {
    let source = &request.source;
    let parent = parent_of(source);

    let default_dir = if request.include_root {
        parent.clone()
    } else {
        source.clone()
    };
    let dest_dir = request.dest_dir.clone().unwrap_or(default_dir);
    let stem = request
        .dest_file_name
        .clone()
        .unwrap_or_else(|| source_name.to_string());
    let destination = dest_dir.join(archive_file_name(&stem, request.format));
    let scratch = dest_dir.join(scratch_file_name(&stem, request.format));

    let mut patterns = request.exclude_patterns.clone();
    if !request.include_root && dest_dir == *source {
        // Keep the in-progress archive out of its own contents.
        patterns.push(scratch_file_name(&stem, request.format));
    }

    match request.format.tool() {
        ToolKind::Zip => {
            let excludes = exclude::exclude_args(
                &patterns,
                ToolKind::Zip,
                request.include_root,
                source,
                source_name,
            );
            let mut zip = Invocation::new("zip");
            zip.args.push("-r".into());
            zip.args.push(os(&scratch));
            if request.include_root {
                zip.args.push(source_name.into());
                zip.cwd = Some(parent);
            } else {
                zip.args.push(".".into());
                zip.cwd = Some(source.clone());
            }
            zip.args.extend(excludes);

            Ok(ArchivePlan {
                steps: vec![zip],
                scratch_output: scratch,
                destination,
                staging: None,
            })
        }
        ToolKind::Tar => {
            let excludes = exclude::exclude_args(
                &patterns,
                ToolKind::Tar,
                request.include_root,
                source,
                source_name,
            );

            let compressed = matches!(request.format, ArchiveFormat::Tgz | ArchiveFormat::Tbz2);
            if compressed && !request.include_root {
                // Rootless tgz/tbz2 archives the source contents from a
                // staged copy; a single-pass `-C <source> .` picks up the
                // `.` entry with format-specific path metadata quirks.
                let (staging, copy) = stage_tree(source, source_name, request.format)?;

                let mut tar = Invocation::new("tar");
                tar.args.extend(excludes);
                tar.args.push(request.format.create_flag().into());
                tar.args.push(os(&scratch));
                tar.args.push("-C".into());
                tar.args.push(os(staging.path()));
                tar.args.push(".".into());

                return Ok(ArchivePlan {
                    steps: vec![copy, tar],
                    scratch_output: scratch,
                    destination,
                    staging: Some(staging),
                });
            }

            let mut tar = Invocation::new("tar");
            tar.args.extend(excludes);
            tar.args.push(request.format.create_flag().into());
            tar.args.push(os(&scratch));
            tar.args.push("-C".into());
            if request.include_root {
                tar.args.push(os(&parent));
                tar.args.push(source_name.into());
            } else {
                tar.args.push(os(source));
                tar.args.push(".".into());
            }

            Ok(ArchivePlan {
                steps: vec![tar],
                scratch_output: scratch,
                destination,
                staging: None,
            })
        }
    }
}

/// Create the staging directory beside the source and the copy step that
/// fills it with the source's contents (dotfiles included).
fn stage_tree(
    source: &Path,
    source_name: &str,
    format: ArchiveFormat,
) -> Result<(TempDir, Invocation)> {
    let parent = parent_of(source);
    let staging = tempfile::Builder::new()
        .prefix(&format!(".{source_name}-{format}-stage-"))
        .tempdir_in(&parent)
        .map_err(|err| Error::io(&parent, err))?;

    let mut copy = Invocation::new("cp");
    copy.args.push("-r".into());
    copy.args.push(os(source.join(".")));
    copy.args.push(os(staging.path()));

    Ok((staging, copy))
}

fn base_name(path: &Path) -> Result<String> {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| Error::InvalidSourceName {
            path: path.to_path_buf(),
        })
}

fn parent_of(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn archive_file_name(stem: &str, format: ArchiveFormat) -> String {
    format!("{stem}.{}", format.extension())
}

fn scratch_file_name(stem: &str, format: ArchiveFormat) -> String {
    format!(".{stem}.{}.partial", format.extension())
}

fn os(path: impl AsRef<Path>) -> OsString {
    path.as_ref().as_os_str().to_os_string()
}
