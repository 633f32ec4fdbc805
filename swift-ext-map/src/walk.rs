//! Source file discovery and reading.
//!
//! Walks the scan root lazily and yields every regular file whose name ends
//! with the configured suffix. Traversal failures are yielded as recoverable
//! [`ScanError`]s instead of ending the walk.

use std::path::{Path, PathBuf};

use glob::Pattern;
use walkdir::WalkDir;

use crate::config::ScanConfig;
use crate::error::{ScanError, ScanErrorKind, ScanSetupError};

/// Lazy iterator over the source files below a scan root.
pub struct SourceFiles {
    root: PathBuf,
    suffix: String,
    exclude: Vec<Pattern>,
    pending: std::vec::IntoIter<ScanError>,
    walker: walkdir::IntoIter,
}

impl SourceFiles {
    /// Start walking `config.root`.
    ///
    /// Invalid exclude patterns are not fatal: they are yielded as
    /// `InvalidExcludePattern` errors before the first file.
    ///
    /// # Errors
    ///
    /// Returns [`ScanSetupError::NotADirectory`] if the root does not exist or
    /// is not a directory.
    pub fn new(config: &ScanConfig) -> Result<Self, ScanSetupError> {
        if !config.root.is_dir() {
            return Err(ScanSetupError::NotADirectory(config.root.clone()));
        }

        let mut exclude = Vec::with_capacity(config.exclude.len());
        let mut pending = Vec::new();
        for pat_str in &config.exclude {
            match Pattern::new(pat_str) {
                Ok(pat) => exclude.push(pat),
                Err(e) => pending.push(ScanError::new(
                    PathBuf::from(pat_str),
                    ScanErrorKind::InvalidExcludePattern,
                    format!("Invalid exclude glob pattern '{pat_str}': {e}"),
                )),
            }
        }

        Ok(Self {
            root: config.root.clone(),
            suffix: config.suffix.clone(),
            exclude,
            pending: pending.into_iter(),
            walker: WalkDir::new(&config.root)
                .follow_links(config.follow_links)
                .max_depth(config.max_depth)
                .into_iter(),
        })
    }

    fn is_selected(&self, path: &Path) -> bool {
        let Some(name) = path.file_name() else {
            return false;
        };
        if !name.to_string_lossy().ends_with(self.suffix.as_str()) {
            return false;
        }
        !matches_exclude(path, &self.exclude)
    }
}

impl Iterator for SourceFiles {
    type Item = Result<PathBuf, ScanError>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(err) = self.pending.next() {
            return Some(Err(err));
        }

        loop {
            let entry = match self.walker.next()? {
                Ok(entry) => entry,
                Err(walk_err) => {
                    let path = walk_err
                        .path()
                        .map_or_else(|| self.root.clone(), Path::to_path_buf);
                    return Some(Err(ScanError::new(
                        path,
                        ScanErrorKind::WalkError,
                        format!("Directory traversal error: {walk_err}"),
                    )));
                }
            };

            // Follows file symlinks; directories named `*.swift` are skipped.
            // A dangling symlink is yielded so the failed read gets reported.
            let dangling = entry.path_is_symlink() && std::fs::metadata(entry.path()).is_err();
            if !dangling && !entry.path().is_file() {
                continue;
            }

            if self.is_selected(entry.path()) {
                return Some(Ok(entry.into_path()));
            }
        }
    }
}

/// Check if a path matches any of the exclude patterns
fn matches_exclude(path: &Path, exclude_patterns: &[Pattern]) -> bool {
    let path_str = path.to_string_lossy();
    exclude_patterns.iter().any(|pattern| {
        pattern.matches(&path_str)
            || path
                .file_name()
                .is_some_and(|name| pattern.matches(&name.to_string_lossy()))
    })
}

/// Read a whole source file as UTF-8 text.
///
/// # Errors
///
/// Returns an `IoError` scan error if the file cannot be read, or an
/// `InvalidEncoding` one if the content is not valid UTF-8.
pub fn read_source_file(path: &Path) -> Result<String, ScanError> {
    let bytes = std::fs::read(path).map_err(|e| {
        ScanError::new(
            path.to_owned(),
            ScanErrorKind::IoError,
            format!("Failed to read file: {e}"),
        )
    })?;

    String::from_utf8(bytes).map_err(|e| {
        ScanError::new(
            path.to_owned(),
            ScanErrorKind::InvalidEncoding,
            format!("File is not valid UTF-8: {}", e.utf8_error()),
        )
    })
}
