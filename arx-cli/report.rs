//! Console reporting helpers.
//!
//! Plain-text sections bracket each operation so workflow logs read as
//! header, configuration, per-command progress, results.

use std::fmt::Display;
use std::fs;
use std::path::Path;

use crate::utils::bytes::format_size;

const RULE_WIDTH: usize = 50;

/// Banner announcing an operation.
pub fn header(title: &str) {
    println!();
    println!("{}", "=".repeat(RULE_WIDTH));
    println!("{title}");
    println!("{}", "=".repeat(RULE_WIDTH));
}

/// Titled block of `item` lines.
pub fn section(title: &str) {
    println!();
    println!("{title}:");
}

/// One labeled value inside a section.
pub fn item(label: &str, value: impl Display) {
    println!("  - {label}: {value}");
}

pub fn success(message: &str) {
    println!("success: {message}");
}

pub fn warning(message: &str) {
    eprintln!("warning: {message}");
}

pub fn error(message: &str) {
    eprintln!("error: {message}");
}

/// Echo a command about to run.
pub fn executing(line: &str) {
    println!("executing: {line}");
}

/// Print the destination's top-level entries with sizes.
pub fn list_contents(dest: &Path) {
    let Ok(entries) = fs::read_dir(dest) else {
        return;
    };

    section("Decompressed contents");
    let mut entries: Vec<_> = entries.flatten().collect();
    entries.sort_by_key(|entry| entry.file_name());
    for entry in entries {
        let name = entry.file_name().to_string_lossy().into_owned();
        match entry.file_type() {
            Ok(kind) if kind.is_dir() => println!("  - {name}/ (directory)"),
            _ => {
                let size = entry.metadata().map(|meta| meta.len()).unwrap_or(0);
                println!("  - {name}: {}", format_size(size));
            }
        }
    }
}
