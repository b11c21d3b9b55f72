//! Diagnostic logging for the `qp` binary.
//!
//! Log events go to stderr so they never mix with translated queries on stdout.

use std::io;

use tracing_subscriber::EnvFilter;

/// Installs the global subscriber.
///
/// `RUST_LOG` takes precedence; otherwise each `-v` raises the level from `warn` to `debug`
/// and then `trace`.
pub fn init(verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let result = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();

    if let Err(e) = result {
        eprintln!("warning: could not initialize logging: {e}");
    }
}

/// The filter directive used when `RUST_LOG` is unset.
fn default_directive(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    }
}
