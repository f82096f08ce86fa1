//! Tracing subscriber setup for the command line binary.

use std::sync::Once;
use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

static INIT_ONCE: Once = Once::new();

/// Default filter directive for a `-v` count. `RUST_LOG` takes precedence.
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "cqs_analyzer=warn",
        1 => "cqs_analyzer=debug",
        _ => "cqs_analyzer=trace",
    }
}

/// Install the global subscriber. Logs go to stderr so reports on stdout
/// stay machine readable. Later calls are no-ops.
pub fn init_tracing(verbosity: u8) {
    INIT_ONCE.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .finish()
            .try_init();
    });
}
