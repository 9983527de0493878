//! # arx-core
//!
//! Invocation planning for archive compression and decompression runs.
//!
//! This crate turns a validated request (source path, archive format,
//! root-inclusion flag, exclusion patterns, destination) into a concrete,
//! structured plan: the exact external commands to spawn, the working
//! directory for each, any staging directory required, and the scratch
//! path the archive is written to before being renamed into place.
//!
//! It performs no subprocess execution and reads no environment state;
//! filesystem access is limited to read-only checks (existence, metadata,
//! glob walks) plus creation of staging directories owned by the returned
//! plan. Execution and reporting live in `arx-cli`.

pub mod error;
pub mod exclude;
pub mod format;
pub mod paths;
pub mod pattern;
pub mod plan;

pub use error::{Error, Result};
pub use format::{ArchiveFormat, ToolKind};
pub use plan::{
    ArchivePlan, ArchiveRequest, ExtractPlan, ExtractRequest, FilesetRequest, Invocation,
};
