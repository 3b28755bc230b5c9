use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const LOGS_DIR: &str = "data/logs";
const LOG_FILE: &str = "airdrop.log";
const DEFAULT_LEVEL: &str = "info";

/// Logs to stdout and to a daily rolling file. Keep the guard alive until
/// exit so buffered file lines get flushed.
pub fn init_default_logger() -> WorkerGuard {
    let (file_writer, guard) = tracing_appender::non_blocking(rolling::daily(LOGS_DIR, LOG_FILE));

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .with(
            fmt::layer()
                .with_writer(file_writer)
                .with_ansi(false)
                .with_target(false),
        )
        .init();

    guard
}
