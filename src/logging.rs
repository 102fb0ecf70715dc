//! Tracing subscriber setup

use std::sync::Once;
use tracing_subscriber::{fmt, EnvFilter};

static TRACING_INIT: Once = Once::new();

/// Environment variable holding the log filter; `RUST_LOG` is the fallback
pub const LOG_ENV: &str = "SPENDWISE_LOG";

fn filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Install the global subscriber, logging to stderr.
///
/// Safe to call more than once; only the first call has an effect.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        fmt()
            .with_env_filter(filter())
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    });
}
