//! Diagnostic tracing for the scaffolder.
//!
//! Tracing is for diagnosing a generation run and goes to stderr. The
//! `create <path>` lines, the greeting and installer messages are product output:
//! the CLI prints them to stdout regardless of `RUST_LOG`.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when `RUST_LOG` is unset.
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose { "starterkit=debug" } else { "warn" }
}

/// Initialize the tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise `--verbose` selects debug output for this
/// crate and everything else stays at `warn`.
///
/// # Example
/// ```bash
/// RUST_LOG=starterkit=trace starterkit new --dest my-app
/// ```
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}
