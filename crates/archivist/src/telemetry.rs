//! Tracing subscriber setup for the command-line tool.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize console logging on stderr.
///
/// `RUST_LOG` wins when set. Otherwise only warnings are shown, or debug
/// output from the Archivist crates when `verbose` is on.
pub fn init_console_telemetry(verbose: bool) {
    let default_filter = if verbose {
        "info,archivist=debug"
    } else {
        "warn"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(verbose)
                .with_writer(std::io::stderr),
        )
        .init();
}
