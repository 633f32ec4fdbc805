use tracing_subscriber::EnvFilter;

/// Install the stderr subscriber.
///
/// `RUST_LOG` wins over `-v`. Without either only errors are logged, so the
/// default output is exactly the progress, results and per-file error lines.
pub fn init(verbose: u8) {
    let default_directive = match verbose {
        0 => "swift_ext_map=error",
        1 => "swift_ext_map=info",
        _ => "swift_ext_map=debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
