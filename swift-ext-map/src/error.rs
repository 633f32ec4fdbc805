//! Error types for extension scanning.

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

/// Errors that stop a scan before any file is read.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ScanSetupError {
    /// The scan root does not exist or is not a directory.
    #[error("'{}' is not a valid directory", .0.display())]
    NotADirectory(PathBuf),
}

/// The kind of failure that kept a single file (or walk step) from being scanned.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[non_exhaustive]
pub enum ScanErrorKind {
    /// An I/O error occurred while reading the file.
    IoError,
    /// The file content is not valid UTF-8.
    InvalidEncoding,
    /// A directory traversal error (permission denied, loop detected, etc.).
    WalkError,
    /// An exclude glob pattern could not be parsed.
    InvalidExcludePattern,
}

/// A recoverable scan failure. The scan continues past it.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[non_exhaustive]
pub struct ScanError {
    /// The path that could not be scanned.
    pub file: PathBuf,
    /// The kind of failure.
    pub kind: ScanErrorKind,
    /// Human-readable description of the failure.
    pub message: String,
}

impl ScanError {
    /// Create a scan error for `file`.
    #[must_use]
    pub fn new(file: PathBuf, kind: ScanErrorKind, message: String) -> Self {
        Self {
            file,
            kind,
            message,
        }
    }

    /// Format the error the way it is reported on stderr.
    #[must_use]
    pub fn format_human_readable(&self) -> String {
        format!("Error processing {}: {}", self.file.display(), self.message)
    }
}
