#![allow(clippy::unwrap_used)]
//! Command-line contract tests for the `swift-ext-map` binary.
//!
//! Each test runs the built binary with a temporary working directory so the
//! default `extensions_map.json` lands inside the sandbox.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

const OUTPUT_FILE: &str = "extensions_map.json";

const FOO_SOURCE: &str = concat!(
    "extension Foo {\n",
    "  enum Extensions {\n",
    "    static let bar = SwiftProtobuf.MessageExtension<SwiftProtobuf.OptionalExtensionField<SwiftProtobuf.ProtobufString>, Baz>(\n",
    "      _protobuf_fieldNumber: 1000,\n",
    "      fieldName: \"bar\"\n",
    "    )\n",
    "  }\n",
    "}\n",
);

fn run_in(cwd: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_swift-ext-map"))
        .args(args)
        .current_dir(cwd)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

/// A sandbox with `src/` to scan and `work/` as the working directory.
fn sandbox() -> (TempDir, std::path::PathBuf, std::path::PathBuf) {
    let tmp = TempDir::new().unwrap();
    let src = tmp.path().join("src");
    let work = tmp.path().join("work");
    fs::create_dir_all(&src).unwrap();
    fs::create_dir_all(&work).unwrap();
    (tmp, src, work)
}

#[test]
fn test_no_arguments_prints_usage_and_fails() {
    let (_tmp, _src, work) = sandbox();

    let output = run_in(&work, &[]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout_of(&output).contains("Usage:"), "stdout: {}", stdout_of(&output));
    assert!(!work.join(OUTPUT_FILE).exists());
}

#[test]
fn test_two_arguments_prints_usage_and_fails() {
    let (_tmp, src, work) = sandbox();
    let src_str = src.to_string_lossy();

    let output = run_in(&work, &[src_str.as_ref(), src_str.as_ref()]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout_of(&output).contains("Usage:"));
}

#[test]
fn test_file_argument_is_rejected() {
    let (_tmp, src, work) = sandbox();
    let file = src.join("Foo.swift");
    fs::write(&file, FOO_SOURCE).unwrap();

    let output = run_in(&work, &[file.to_string_lossy().as_ref()]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = stderr_of(&output);
    assert!(stderr.contains("is not a valid directory"), "stderr: {stderr}");
    assert!(stderr.contains("Foo.swift"), "stderr: {stderr}");
    assert!(!stdout_of(&output).contains("Scanning"));
    assert!(!work.join(OUTPUT_FILE).exists());
}

#[test]
fn test_empty_result_written_to_stdout_and_file() {
    let (_tmp, src, work) = sandbox();
    fs::write(src.join("Plain.swift"), "struct Plain {}\n").unwrap();

    let output = run_in(&work, &[src.to_string_lossy().as_ref()]);

    assert_eq!(output.status.code(), Some(0));
    let stdout = stdout_of(&output);
    assert!(stdout.starts_with("Scanning Swift files in: "), "stdout: {stdout}");
    assert!(stdout.contains("\nResults:\n{}\n"), "stdout: {stdout}");
    assert!(stdout.contains("Output written to: extensions_map.json"));
    assert_eq!(fs::read_to_string(work.join(OUTPUT_FILE)).unwrap(), "{}");
}

#[test]
fn test_result_matches_file_content() {
    let (_tmp, src, work) = sandbox();
    fs::write(src.join("Foo.pb.swift"), FOO_SOURCE).unwrap();

    let output = run_in(&work, &[src.to_string_lossy().as_ref()]);

    assert_eq!(output.status.code(), Some(0));
    let written = fs::read_to_string(work.join(OUTPUT_FILE)).unwrap();
    assert_eq!(
        written,
        "{\n  \"Baz\": [\n    \"Foo.Extensions.bar\"\n  ]\n}"
    );
    assert!(stdout_of(&output).contains(&format!("Results:\n{written}\n")));
}

#[test]
fn test_bad_file_reported_on_stderr_and_scan_continues() {
    let (_tmp, src, work) = sandbox();
    fs::write(src.join("Broken.swift"), [0xc3, 0x28, 0x0a]).unwrap();
    fs::write(src.join("Foo.pb.swift"), FOO_SOURCE).unwrap();

    let output = run_in(&work, &[src.to_string_lossy().as_ref()]);

    assert_eq!(output.status.code(), Some(0));
    let stderr = stderr_of(&output);
    assert!(stderr.contains("Error processing"), "stderr: {stderr}");
    assert!(stderr.contains("Broken.swift"), "stderr: {stderr}");
    let written: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(work.join(OUTPUT_FILE)).unwrap()).unwrap();
    assert_eq!(written, serde_json::json!({"Baz": ["Foo.Extensions.bar"]}));
}

#[test]
fn test_existing_output_is_overwritten_and_runs_are_identical() {
    let (_tmp, src, work) = sandbox();
    fs::write(src.join("Foo.pb.swift"), FOO_SOURCE).unwrap();
    fs::write(work.join(OUTPUT_FILE), "not json at all, and quite long").unwrap();

    let first = run_in(&work, &[src.to_string_lossy().as_ref()]);
    let first_content = fs::read(work.join(OUTPUT_FILE)).unwrap();
    let second = run_in(&work, &[src.to_string_lossy().as_ref()]);
    let second_content = fs::read(work.join(OUTPUT_FILE)).unwrap();

    assert_eq!(first.status.code(), Some(0));
    assert_eq!(second.status.code(), Some(0));
    assert_eq!(first_content, second_content);
    assert!(first_content.starts_with(b"{\n  \"Baz\""));
}

#[test]
fn test_output_option() {
    let (_tmp, src, work) = sandbox();
    fs::write(src.join("Foo.pb.swift"), FOO_SOURCE).unwrap();

    let output = run_in(
        &work,
        &[src.to_string_lossy().as_ref(), "--output", "custom.json"],
    );

    assert_eq!(output.status.code(), Some(0));
    assert!(work.join("custom.json").exists());
    assert!(!work.join(OUTPUT_FILE).exists());
    assert!(stdout_of(&output).contains("Output written to: custom.json"));
}

#[test]
fn test_help_exits_zero() {
    let (_tmp, _src, work) = sandbox();

    let output = run_in(&work, &["--help"]);

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout_of(&output).contains("--exclude"));
}

#[test]
fn test_exclude_and_suffix_options() {
    let (_tmp, src, work) = sandbox();
    fs::create_dir_all(src.join("Tests")).unwrap();
    fs::write(src.join("Foo.pb.swift"), FOO_SOURCE).unwrap();
    fs::write(src.join("Tests").join("Foo.pb.swift"), FOO_SOURCE).unwrap();
    fs::write(src.join("Other.swiftsrc"), FOO_SOURCE.replace("Foo", "Other")).unwrap();
    let src_arg = src.to_string_lossy();

    let excluded = run_in(&work, &[src_arg.as_ref(), "--exclude", "*/Tests/*"]);
    assert_eq!(excluded.status.code(), Some(0));
    let written: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(work.join(OUTPUT_FILE)).unwrap()).unwrap();
    assert_eq!(written, serde_json::json!({"Baz": ["Foo.Extensions.bar"]}));

    let suffixed = run_in(&work, &[src_arg.as_ref(), "--suffix", ".swiftsrc"]);
    assert_eq!(suffixed.status.code(), Some(0));
    let written: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(work.join(OUTPUT_FILE)).unwrap()).unwrap();
    assert_eq!(written, serde_json::json!({"Baz": ["Other.Extensions.bar"]}));
}

#[test]
fn test_max_depth_option() {
    let (_tmp, src, work) = sandbox();
    fs::create_dir_all(src.join("nested")).unwrap();
    fs::write(src.join("nested").join("Foo.pb.swift"), FOO_SOURCE).unwrap();

    let output = run_in(&work, &[src.to_string_lossy().as_ref(), "--max-depth", "1"]);

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(fs::read_to_string(work.join(OUTPUT_FILE)).unwrap(), "{}");
}

#[test]
fn test_unwritable_output_fails_with_cause() {
    let (_tmp, src, work) = sandbox();
    fs::write(src.join("Foo.pb.swift"), FOO_SOURCE).unwrap();

    let output = run_in(
        &work,
        &[src.to_string_lossy().as_ref(), "--output", "missing_dir/out.json"],
    );

    assert_eq!(output.status.code(), Some(1));
    let stderr = stderr_of(&output);
    assert!(stderr.contains("Failed to write output file"), "stderr: {stderr}");
    // The OS error is appended after the context.
    assert!(stderr.contains("out.json: "), "stderr: {stderr}");
    assert!(!stdout_of(&output).contains("Output written to"));
}

#[test]
fn test_report_option_writes_scan_errors() {
    let (_tmp, src, work) = sandbox();
    fs::write(src.join("Broken.swift"), [0xff, 0x0a]).unwrap();
    fs::write(src.join("Foo.pb.swift"), FOO_SOURCE).unwrap();

    let output = run_in(
        &work,
        &[src.to_string_lossy().as_ref(), "--report", "report.json"],
    );

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout_of(&output).contains("Report written to: report.json"));
    let report: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(work.join("report.json")).unwrap()).unwrap();
    assert_eq!(report["scanned_files"], 1);
    assert_eq!(report["failed_files"], 1);
    assert_eq!(report["extensions"], serde_json::json!({"Baz": ["Foo.Extensions.bar"]}));
    assert_eq!(report["scan_errors"][0]["kind"], "InvalidEncoding");
}
