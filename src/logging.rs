//! Tracing subscriber initialization
//!
//! Logs go to stderr so that command output on stdout stays machine readable.

use std::io;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::error::GrinderError;

/// Banner preceding configuration failures
pub const CONFIGURATION_ERROR_BANNER: &str = " ----------------------------\n\
                                              |   Configuration ERROR!!!   |\n \
                                              ----------------------------";

/// Initialize the global subscriber: `info` by default, `debug` with
/// `--verbose`, `RUST_LOG` overriding both.
pub fn init(verbose: bool) {
    let level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    // A subscriber already installed (e.g. by a test harness) is kept.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

/// Banner announcing `err`, for configuration failures only.
pub fn banner_for(err: &GrinderError) -> Option<&'static str> {
    err.is_configuration_error().then_some(CONFIGURATION_ERROR_BANNER)
}

/// Log the banner for `err` when it has one. The error message itself is
/// printed once by the caller.
pub fn report(err: &GrinderError) {
    if let Some(banner) = banner_for(err) {
        tracing::error!("\n{banner}");
    }
}

/// Initialize tracing for tests. Safe to call from every test.
#[cfg(test)]
pub fn init_test_tracing() {
    static INIT: std::sync::Once = std::sync::Once::new();

    INIT.call_once(|| {
        let filter = EnvFilter::builder()
            .with_default_directive(LevelFilter::DEBUG.into())
            .from_env_lossy();

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}
