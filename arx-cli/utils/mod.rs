//! Small shared utilities for the action CLI.

pub mod bytes;
pub mod disk;
