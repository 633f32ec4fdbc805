//! Line scanner for `SwiftProtobuf` extension declarations.
//!
//! Generated Swift sources declare message extensions like this:
//!
//! ```text
//! extension Pkg_Options {
//!   enum Extensions {
//!     static let my_option = SwiftProtobuf.MessageExtension<OptionalExtensionField<...>, Google_Protobuf_FieldOptions>(
//! ```
//!
//! The scanner does not parse Swift. It walks the lines once, tracking the
//! current `extension` name and whether it is inside an `enum Extensions`
//! block by counting braces, and reports every matching `static let`.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

/// `extension <Identifier>` anywhere on the line.
static EXTENSION_OPENER: LazyLock<Regex> = LazyLock::new(|| {
    match Regex::new(r"extension\s+(\w+)") {
        Ok(regex) => regex,
        Err(err) => panic!("Invalid extension regex: {err}"),
    }
});

/// The nested block whose members are collected.
static TARGET_BLOCK_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    match Regex::new(r"enum\s+Extensions") {
        Ok(regex) => regex,
        Err(err) => panic!("Invalid target block regex: {err}"),
    }
});

/// `static let <property> = SwiftProtobuf.MessageExtension<_, <Extended>>(`
static MESSAGE_EXTENSION_DECL: LazyLock<Regex> = LazyLock::new(|| {
    match Regex::new(concat!(
        r"static\s+let\s+(\w+)\s+=\s+",        // property name
        r"SwiftProtobuf\.MessageExtension<",   // descriptor type
        r"[^,]+,\s*",                          // field type (ignored)
        r"(\w+)>\(",                           // extended message type
    )) {
        Ok(regex) => regex,
        Err(err) => panic!("Invalid declaration regex: {err}"),
    }
});

/// Literal segment between the extension name and the property name.
pub const TARGET_BLOCK_NAME: &str = "Extensions";

/// One extension property found in a source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionDecl {
    /// The message type being extended (grouping key of the output map).
    pub extended_type: String,
    /// `<ExtensionName>.Extensions.<property>`.
    pub qualified_name: String,
    /// 1-based line number of the declaration.
    pub line: usize,
}

/// Per-file scanner state.
///
/// `depth` is the brace balance of the current `enum Extensions` block. It is
/// reset only by a new `extension` line, so a block re-entered after closing
/// starts from whatever balance the previous block ended on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ScanState {
    /// No `extension` seen yet.
    #[default]
    Idle,
    /// Inside an `extension`, outside its target block.
    InExtension { name: String, depth: i64 },
    /// Inside the `enum Extensions` block of an `extension`.
    InTargetBlock { name: String, depth: i64 },
}

impl ScanState {
    /// Name of the current extension, if any.
    #[must_use]
    pub fn extension_name(&self) -> Option<&str> {
        match self {
            Self::Idle => None,
            Self::InExtension { name, .. } | Self::InTargetBlock { name, .. } => Some(name),
        }
    }

    /// Apply one line's opener, marker and brace updates.
    #[must_use]
    pub fn advance(self, line: &str) -> Self {
        // A new opener always wins, even inside another extension.
        let state = match EXTENSION_OPENER.captures(line) {
            Some(caps) => Self::InExtension {
                name: caps[1].to_owned(),
                depth: 0,
            },
            None => self,
        };

        let state = match state {
            Self::InExtension { name, depth } if TARGET_BLOCK_MARKER.is_match(line) => {
                Self::InTargetBlock { name, depth }
            }
            other => other,
        };

        // Runs on the marker line too: a marker without `{` closes at once.
        match state {
            Self::InTargetBlock { name, depth } => {
                let depth = depth.saturating_add(brace_delta(line));
                if depth <= 0 {
                    Self::InExtension { name, depth }
                } else {
                    Self::InTargetBlock { name, depth }
                }
            }
            other => other,
        }
    }
}

/// Net count of `{` minus `}` on a line.
fn brace_delta(line: &str) -> i64 {
    line.chars().fold(0, |delta, c| match c {
        '{' => delta + 1,
        '}' => delta - 1,
        _ => delta,
    })
}

/// Feeds lines through [`ScanState`] and reports declarations.
#[derive(Debug, Default)]
pub struct LineScanner {
    state: ScanState,
    line_number: usize,
}

impl LineScanner {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> &ScanState {
        &self.state
    }

    /// Process the next line. Returns the declaration on it, if any.
    pub fn feed_line(&mut self, line: &str) -> Option<ExtensionDecl> {
        self.line_number += 1;
        self.state = std::mem::take(&mut self.state).advance(line);

        let ScanState::InTargetBlock { name, .. } = &self.state else {
            return None;
        };
        let caps = MESSAGE_EXTENSION_DECL.captures(line)?;

        Some(ExtensionDecl {
            extended_type: caps[2].to_owned(),
            qualified_name: format!("{name}.{TARGET_BLOCK_NAME}.{}", &caps[1]),
            line: self.line_number,
        })
    }
}

/// Scan a whole file's content.
///
/// `\r\n`, lone `\r` and `\n` all end a line.
#[must_use]
pub fn parse_source(content: &str) -> Vec<ExtensionDecl> {
    let mut scanner = LineScanner::new();
    normalize_newlines(content)
        .lines()
        .filter_map(|line| scanner.feed_line(line))
        .collect()
}

fn normalize_newlines(content: &str) -> Cow<'_, str> {
    if content.contains('\r') {
        Cow::Owned(content.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(content)
    }
}
