//! Log subscriber setup

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::{AppError, AppResult};

/// Default directive for a `-v` count.
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install a stderr fmt subscriber.
///
/// `RUST_LOG`, when set, wins over `verbosity`. Records emitted through the
/// `log` facade by the libraries are bridged in.
pub fn init_logging(verbosity: u8) -> AppResult<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .without_time()
                .with_target(verbosity >= 2),
        )
        .with(filter)
        .try_init()
        .map_err(|e| AppError::Logging(e.to_string()))
}
