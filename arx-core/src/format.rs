//! Archive format selection and archiver tool mapping.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Supported archive formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveFormat {
    /// PKZIP archive handled by `zip`/`unzip`
    Zip,
    /// Uncompressed POSIX tar archive
    Tar,
    /// Gzip-compressed tar archive
    Tgz,
    /// Bzip2-compressed tar archive
    Tbz2,
}

/// Tool family that handles a format on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    /// `zip` for creation, `unzip` for extraction
    Zip,
    /// `tar` for both directions
    Tar,
}

impl ArchiveFormat {
    /// Every supported format, in documentation order.
    pub const ALL: [ArchiveFormat; 4] = [
        ArchiveFormat::Zip,
        ArchiveFormat::Tar,
        ArchiveFormat::Tgz,
        ArchiveFormat::Tbz2,
    ];

    /// Canonical lowercase name, as accepted on input.
    pub fn name(self) -> &'static str {
        match self {
            ArchiveFormat::Zip => "zip",
            ArchiveFormat::Tar => "tar",
            ArchiveFormat::Tgz => "tgz",
            ArchiveFormat::Tbz2 => "tbz2",
        }
    }

    /// File extension appended to archive names (without the dot).
    pub fn extension(self) -> &'static str {
        self.name()
    }

    /// Which external tool family creates and extracts this format.
    pub fn tool(self) -> ToolKind {
        match self {
            ArchiveFormat::Zip => ToolKind::Zip,
            ArchiveFormat::Tar | ArchiveFormat::Tgz | ArchiveFormat::Tbz2 => ToolKind::Tar,
        }
    }

    /// `tar` creation flag cluster for this format.
    ///
    /// Meaningless for [`ArchiveFormat::Zip`], which is never passed to `tar`.
    pub fn create_flag(self) -> &'static str {
        match self {
            ArchiveFormat::Zip | ArchiveFormat::Tar => "-cf",
            ArchiveFormat::Tgz => "-czf",
            ArchiveFormat::Tbz2 => "-cjf",
        }
    }

    /// `tar` extraction flag cluster for this format.
    pub fn extract_flag(self) -> &'static str {
        match self {
            ArchiveFormat::Zip | ArchiveFormat::Tar => "-xf",
            ArchiveFormat::Tgz => "-xzf",
            ArchiveFormat::Tbz2 => "-xjf",
        }
    }

    /// Comma-separated list of supported format names, for error output.
    pub fn supported_list() -> String {
        Self::ALL
            .iter()
            .map(|format| format.name())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl FromStr for ArchiveFormat {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "zip" => Ok(ArchiveFormat::Zip),
            "tar" => Ok(ArchiveFormat::Tar),
            "tgz" => Ok(ArchiveFormat::Tgz),
            "tbz2" => Ok(ArchiveFormat::Tbz2),
            _ => Err(Error::UnsupportedFormat {
                value: value.trim().to_string(),
            }),
        }
    }
}

impl fmt::Display for ArchiveFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
