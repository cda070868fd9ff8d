//! Tracing subscriber setup.

use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable holding the log filter, e.g. `SONOPRINT_LOG=debug`.
pub const LOG_ENV: &str = "SONOPRINT_LOG";

/// Install a stderr subscriber filtered by [`LOG_ENV`], defaulting to `warn`.
///
/// Calling this more than once is harmless.
pub fn init() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init();
}
