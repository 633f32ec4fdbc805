//! Scan report types.

use serde::Serialize;

use crate::error::ScanError;
use crate::map::ExtensionMap;

/// Result of a scan run.
///
/// `scan_errors` lists files that were skipped; everything read before and
/// after them is still in `extensions`.
#[derive(Debug, Clone, Serialize)]
#[non_exhaustive]
pub struct ScanReport {
    /// Number of source files read and parsed.
    pub scanned_files: usize,
    /// Number of source files that could not be read or decoded.
    pub failed_files: usize,
    /// The finalized mapping.
    pub extensions: ExtensionMap,
    /// Recoverable failures, in the order they were hit.
    pub scan_errors: Vec<ScanError>,
}

impl ScanReport {
    /// Total number of source files attempted (scanned + failed).
    #[must_use]
    pub fn files_attempted(&self) -> usize {
        self.scanned_files + self.failed_files
    }
}
