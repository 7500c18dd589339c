//! Console logging. Set `DEBUG_LOGGING=1` to enable debug output for holocron crates.

use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

/// Logs go to stderr so they do not interleave with REPL output on stdout.
/// `RUST_LOG` overrides the default directives.
pub fn init() {
    let debug_logging = std::env::var("DEBUG_LOGGING").is_ok();

    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_span_events(FmtSpan::NONE);

    let filter_directive = if debug_logging {
        "info,holocron_core=debug,holocron_cli=debug"
    } else {
        "info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_directive));

    tracing_subscriber::registry().with(layer).with(filter).init();

    tracing::debug!(debug_logging, "logging initialized");
}
