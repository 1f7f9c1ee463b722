//! Tracing setup for the command-line binary
//!
//! Diagnostics go to stderr so report output on stdout stays clean.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable holding a tracing filter directive
pub const LOG_ENV: &str = "BUDGETDASH_LOG";

/// Default filter for a `-v` count
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

/// Install the global subscriber
///
/// `BUDGETDASH_LOG` wins over the verbosity flag when set. Calling this twice
/// is harmless.
pub fn init_tracing(verbosity: u8) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}
