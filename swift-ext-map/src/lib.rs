//! # swift-ext-map
//!
//! Indexes `SwiftProtobuf` message extensions in a tree of Swift sources.
//!
//! Every `static let` of type `SwiftProtobuf.MessageExtension<_, Extended>`
//! declared inside an `enum Extensions` block of an `extension Name` is
//! recorded as `Name.Extensions.<property>` under the key `Extended`.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use swift_ext_map::{ScanConfig, scan_directory, output};
//!
//! let report = scan_directory(&ScanConfig::new("Sources")).unwrap();
//! println!("Files scanned: {}", report.scanned_files);
//! println!("{}", output::to_pretty_json(&report.extensions).unwrap());
//! ```

mod config;
mod error;
mod map;
pub mod output;
pub mod parser;
mod report;
mod walk;

pub use config::{DEFAULT_SOURCE_SUFFIX, ScanConfig};
pub use error::{ScanError, ScanErrorKind, ScanSetupError};
pub use map::ExtensionMap;
pub use parser::{ExtensionDecl, LineScanner, ScanState, parse_source};
pub use report::ScanReport;
pub use walk::{SourceFiles, read_source_file};

use std::path::Path;

use tracing::{debug, info, warn};

/// A validated scan, ready to run.
///
/// Splitting setup from [`Scanner::run`] lets callers report a bad root
/// before announcing the scan.
pub struct Scanner {
    files: SourceFiles,
}

impl Scanner {
    /// Check the root and prepare the directory walk.
    ///
    /// # Errors
    ///
    /// Returns [`ScanSetupError::NotADirectory`] if `config.root` does not
    /// exist or is not a directory.
    pub fn new(config: &ScanConfig) -> Result<Self, ScanSetupError> {
        Ok(Self {
            files: SourceFiles::new(config)?,
        })
    }

    /// Walk, parse and aggregate. Per-file failures are collected, never fatal.
    #[must_use]
    pub fn run(self) -> ScanReport {
        let mut extensions = ExtensionMap::new();
        let mut scan_errors = Vec::new();
        let mut scanned_files: usize = 0;
        let mut failed_files: usize = 0;

        for item in self.files {
            let path = match item {
                Ok(path) => path,
                Err(e) => {
                    warn!(file = %e.file.display(), "{}", e.message);
                    scan_errors.push(e);
                    continue;
                }
            };

            match read_source_file(&path) {
                Ok(content) => {
                    scan_content(&content, &path, &mut extensions);
                    scanned_files += 1;
                }
                Err(e) => {
                    warn!(file = %path.display(), "{}", e.message);
                    scan_errors.push(e);
                    failed_files += 1;
                }
            }
        }

        let extensions = extensions.finalize();
        info!(
            scanned_files,
            failed_files,
            extended_types = extensions.len(),
            declarations = extensions.declarations_count(),
            "scan finished"
        );

        ScanReport {
            scanned_files,
            failed_files,
            extensions,
            scan_errors,
        }
    }
}

/// Scan every matching file below `config.root`.
///
/// # Errors
///
/// Returns [`ScanSetupError::NotADirectory`] if `config.root` does not exist
/// or is not a directory. Unreadable or undecodable files are reported in
/// `report.scan_errors` and do not fail the scan.
pub fn scan_directory(config: &ScanConfig) -> Result<ScanReport, ScanSetupError> {
    Ok(Scanner::new(config)?.run())
}

fn scan_content(content: &str, path: &Path, extensions: &mut ExtensionMap) {
    let decls = parse_source(content);
    debug!(file = %path.display(), declarations = decls.len(), "parsed");
    for decl in &decls {
        debug!(
            file = %path.display(),
            line = decl.line,
            extended_type = %decl.extended_type,
            "{}",
            decl.qualified_name
        );
    }
    extensions.extend_from(decls);
}
