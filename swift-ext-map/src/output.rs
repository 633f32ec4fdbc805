//! Output formatting for the extension map.
//!
//! JSON is written with 2-space indentation and every character from U+007F
//! upward escaped as `\uXXXX` (UTF-16 surrogate pairs above the BMP), so the
//! output is plain ASCII.

use std::io::{self, Write};
use std::path::Path;

use anyhow::Context;
use serde::Serialize;
use serde_json::Serializer;
use serde_json::ser::{Formatter, PrettyFormatter};

use crate::map::ExtensionMap;
use crate::report::ScanReport;

/// File written to the current directory when no other output is given.
pub const DEFAULT_OUTPUT_FILE: &str = "extensions_map.json";

/// Pretty formatter that keeps string output ASCII-only.
struct AsciiPrettyFormatter {
    inner: PrettyFormatter<'static>,
}

impl AsciiPrettyFormatter {
    fn new() -> Self {
        Self {
            inner: PrettyFormatter::with_indent(b"  "),
        }
    }
}

impl Formatter for AsciiPrettyFormatter {
    fn begin_array<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.begin_array(writer)
    }

    fn end_array<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_array(writer)
    }

    fn begin_array_value<W: ?Sized + Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        self.inner.begin_array_value(writer, first)
    }

    fn end_array_value<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_array_value(writer)
    }

    fn begin_object<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.begin_object(writer)
    }

    fn end_object<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_object(writer)
    }

    fn begin_object_key<W: ?Sized + Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        self.inner.begin_object_key(writer, first)
    }

    fn begin_object_value<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.begin_object_value(writer)
    }

    fn end_object_value<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_object_value(writer)
    }

    fn write_string_fragment<W: ?Sized + Write>(
        &mut self,
        writer: &mut W,
        fragment: &str,
    ) -> io::Result<()> {
        let mut start = 0;
        for (idx, c) in fragment.char_indices() {
            if u32::from(c) < 0x7f {
                continue;
            }
            writer.write_all(fragment[start..idx].as_bytes())?;
            let mut units = [0u16; 2];
            for unit in c.encode_utf16(&mut units) {
                write!(writer, "\\u{unit:04x}")?;
            }
            start = idx + c.len_utf8();
        }
        writer.write_all(fragment[start..].as_bytes())
    }
}

fn to_ascii_pretty_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<String> {
    let mut buf = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buf, AsciiPrettyFormatter::new());
    value.serialize(&mut serializer)?;
    Ok(String::from_utf8(buf)?)
}

/// Render the map as ASCII-only JSON with 2-space indentation.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_pretty_json(map: &ExtensionMap) -> anyhow::Result<String> {
    to_ascii_pretty_json(map)
}

/// Write the `Results:` block to a writer.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_results(json: &str, writer: &mut dyn Write) -> anyhow::Result<()> {
    writeln!(writer)?;
    writeln!(writer, "Results:")?;
    writeln!(writer, "{json}")?;
    Ok(())
}

/// Write the full scan report (counts, map and scan errors) as JSON.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn write_report_json(report: &ScanReport, writer: &mut dyn Write) -> anyhow::Result<()> {
    let json = to_ascii_pretty_json(report)?;
    writeln!(writer, "{json}")?;
    Ok(())
}

/// Write `json` to `path`, replacing any existing file. No trailing newline is added.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub fn write_output_file(path: &Path, json: &str) -> anyhow::Result<()> {
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write output file {}", path.display()))
}
