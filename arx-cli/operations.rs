//! Compress and decompress orchestration.
//!
//! Each operation follows the same arc: resolve the source, derive the
//! plan, prepare the destination, execute, then report. Errors propagate
//! to the entrypoint, where the fail-fast flag decides their severity.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use arx_core::plan::{self, ArchiveRequest, ExtractRequest, FilesetRequest};
use arx_core::{exclude, paths, pattern};

use crate::config::ActionConfig;
use crate::error::{ActionError, Result};
use crate::process::{ProcessRunner, RetryPolicy};
use crate::report;
use crate::utils::{bytes, disk};

/// Compress the configured source; returns the final archive path.
///
/// # Errors
///
/// Propagates source-resolution, planning, execution, and rename failures.
pub fn compress(config: &ActionConfig) -> Result<PathBuf> {
    report::header("Compression");

    let ctx = config.path_context();
    let patterns = exclude::split_patterns(&config.exclude);
    let dest_dir = resolved_dest(config, &ctx.workspace_root);
    let started = Instant::now();

    let (plan, source_size) = if pattern::is_pattern(&config.source) {
        let files = pattern::expand(&config.source, &ctx.workspace_root)?;
        let size = files.iter().map(|file| disk::size_of(file)).sum();
        let plan = plan::build_fileset_plan(&FilesetRequest {
            files,
            base_dir: ctx.workspace_root.clone(),
            format: config.format,
            exclude_patterns: patterns,
            dest_dir,
            dest_file_name: config.dest_file_name.clone(),
        })?;
        (plan, size)
    } else {
        let source = paths::resolve(&config.source, &ctx)?;
        let size = disk::size_of(&source);
        let plan = plan::build_archive_plan(&ArchiveRequest {
            source,
            format: config.format,
            include_root: config.include_root,
            exclude_patterns: patterns,
            dest_dir,
            dest_file_name: config.dest_file_name.clone(),
        })?;
        (plan, size)
    };

    report::section("Configuration");
    report::item("Source", &config.source);
    report::item("Format", config.format);
    report::item("Include root", config.include_root);
    report::item("Source size", bytes::format_size(source_size));
    report::item("Destination", plan.destination().display());

    prepare_directory(plan.destination().parent())?;

    let runner = ProcessRunner::new(config.verbose);
    runner.run(plan.steps(), RetryPolicy::archiving())?;
    plan.commit()?;

    let compressed_size = disk::size_of(plan.destination());
    report::section("Compression results");
    report::item("Original size", bytes::format_size(source_size));
    report::item("Compressed size", bytes::format_size(compressed_size));
    report::item(
        "Compression ratio",
        format!("{:.1}%", bytes::ratio_percent(source_size, compressed_size)),
    );
    report::item(
        "Duration",
        format!("{:.2} seconds", started.elapsed().as_secs_f64()),
    );
    report::success("compression finished");

    Ok(plan.destination().to_path_buf())
}

/// Extract the configured archive; returns the destination directory.
///
/// # Errors
///
/// Propagates source-resolution and execution failures.
pub fn decompress(config: &ActionConfig) -> Result<PathBuf> {
    report::header("Decompression");

    let ctx = config.path_context();
    let archive = paths::resolve(&config.source, &ctx)?;
    let dest_dir = resolved_dest(config, &ctx.workspace_root);
    let started = Instant::now();
    let archive_size = disk::size_of(&archive);

    report::section("Configuration");
    report::item("Source", archive.display());
    report::item("Format", config.format);
    report::item(
        "Destination",
        match &dest_dir {
            Some(dir) => dir.display().to_string(),
            None => "current directory".to_string(),
        },
    );

    if let Some(dir) = &dest_dir {
        prepare_directory(Some(dir))?;
    }

    let plan = plan::build_extract_plan(&ExtractRequest {
        archive,
        format: config.format,
        dest_dir: dest_dir.clone(),
    });

    let runner = ProcessRunner::new(config.verbose);
    runner.run(std::slice::from_ref(plan.step()), RetryPolicy::extraction())?;

    report::section("Decompression results");
    report::item("Archive size", bytes::format_size(archive_size));
    report::item(
        "Duration",
        format!("{:.2} seconds", started.elapsed().as_secs_f64()),
    );

    let listing_dir = dest_dir.unwrap_or_else(|| PathBuf::from("."));
    report::list_contents(&listing_dir);
    report::success("decompression finished");

    Ok(listing_dir)
}

/// Anchor a configured destination directory at the workspace root.
fn resolved_dest(config: &ActionConfig, workspace_root: &Path) -> Option<PathBuf> {
    config.dest.as_ref().map(|dest| {
        if dest.is_absolute() {
            dest.clone()
        } else {
            workspace_root.join(dest)
        }
    })
}

fn prepare_directory(dir: Option<&Path>) -> Result<()> {
    if let Some(dir) = dir {
        if !dir.exists() {
            fs::create_dir_all(dir).map_err(|source| ActionError::io(dir, source))?;
        }
    }
    Ok(())
}
