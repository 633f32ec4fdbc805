//! Configuration for an extension scan.

use std::path::PathBuf;

/// File name suffix selected when no other suffix is configured.
pub const DEFAULT_SOURCE_SUFFIX: &str = ".swift";

/// Filesystem options for a scan.
///
/// NOTE: the output file name is a CLI concern and is not part of this
/// config; the library only produces the map.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct ScanConfig {
    /// Directory to scan recursively. Must exist and be a directory.
    pub root: PathBuf,
    /// Only files whose name ends with this suffix are parsed (default: `.swift`).
    pub suffix: String,
    /// Exclude patterns (glob format), matched against the full path and the file name.
    pub exclude: Vec<String>,
    /// Whether to descend into symlinked directories.
    ///
    /// Defaults to `false`. Symlinks to files are read either way.
    pub follow_links: bool,
    /// Maximum directory depth below `root` (default: unlimited).
    /// Files directly in `root` are at depth 1.
    pub max_depth: usize,
}

impl ScanConfig {
    /// Config for scanning `root` with default options.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::new(),
            suffix: DEFAULT_SOURCE_SUFFIX.to_owned(),
            exclude: Vec::new(),
            follow_links: false,
            max_depth: usize::MAX,
        }
    }
}
