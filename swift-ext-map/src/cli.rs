use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use clap::error::ErrorKind;
use swift_ext_map::output::{
    DEFAULT_OUTPUT_FILE, to_pretty_json, write_output_file, write_report_json, write_results,
};
use swift_ext_map::{DEFAULT_SOURCE_SUFFIX, ScanConfig, Scanner};

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(
    name = "swift-ext-map",
    version,
    about = "Map SwiftProtobuf message extensions to the message types they extend",
    long_about = None
)]
pub struct Args {
    /// Directory to scan recursively for Swift sources
    pub directory: PathBuf,

    /// Output file, overwritten if it exists
    #[arg(short, long, default_value = DEFAULT_OUTPUT_FILE)]
    pub output: PathBuf,

    /// Exclude paths matching this glob (repeatable)
    #[arg(long, value_name = "GLOB")]
    pub exclude: Vec<String>,

    /// Descend into symlinked directories
    #[arg(long)]
    pub follow_links: bool,

    /// Maximum directory depth to descend (files in DIRECTORY are at depth 1)
    #[arg(long, value_name = "N")]
    pub max_depth: Option<usize>,

    /// Also write the full scan report (counts, map, scan errors) as JSON
    #[arg(long, value_name = "FILE")]
    pub report: Option<PathBuf>,

    /// Only scan files whose name ends with this suffix
    #[arg(long, default_value = DEFAULT_SOURCE_SUFFIX)]
    pub suffix: String,

    /// Log more (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Parse the command line.
///
/// Any usage mistake (missing directory, extra arguments, unknown flag)
/// prints the short usage to stdout and exits with status 1. `--help` and
/// `--version` behave as usual.
pub fn parse_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.exit()
        }
        Err(err) => {
            if let Some(reason) = err.kind().as_str() {
                eprintln!("error: {reason}");
            }
            println!("Usage: swift-ext-map <directory>");
            println!("Example: swift-ext-map /path/to/swift/files");
            std::process::exit(1);
        }
    }
}

/// Scan, print the results and write the output file.
///
/// # Errors
///
/// Returns an error if the directory is not valid or the output file
/// cannot be written. Unreadable source files are only reported.
pub fn run(args: &Args) -> Result<()> {
    let mut config = ScanConfig::new(&args.directory);
    config.suffix.clone_from(&args.suffix);
    config.exclude.clone_from(&args.exclude);
    config.follow_links = args.follow_links;
    if let Some(max_depth) = args.max_depth {
        config.max_depth = max_depth;
    }

    let scanner = Scanner::new(&config)?;
    println!("Scanning Swift files in: {}", args.directory.display());
    let report = scanner.run();

    for scan_err in &report.scan_errors {
        eprintln!("{}", scan_err.format_human_readable());
    }

    let json = to_pretty_json(&report.extensions)?;
    {
        let mut stdout = std::io::stdout().lock();
        write_results(&json, &mut stdout)?;
        stdout.flush()?;
    }

    write_output_file(&args.output, &json)?;
    println!();
    println!("Output written to: {}", args.output.display());

    if let Some(report_path) = &args.report {
        let mut file = std::fs::File::create(report_path)
            .with_context(|| format!("Failed to create report file {}", report_path.display()))?;
        write_report_json(&report, &mut file)?;
        println!("Report written to: {}", report_path.display());
    }

    Ok(())
}
