//! Logging initialization.
//!
//! Sets up a tracing subscriber with:
//! - `RUST_LOG`-driven filtering (default `info`)
//! - compact stdout output
//! - an optional non-blocking file layer under the data directory

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Initialize logging with stdout output only.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().compact().with_filter(filter))
        .init();
}

/// Initialize logging with stdout output plus a daily-rotated log file.
/// The returned guard must be kept alive for the lifetime of the process;
/// dropping it flushes and stops the background writer.
pub fn init_with_file(log_dir: &Path) -> std::io::Result<WorkerGuard> {
    std::fs::create_dir_all(log_dir)?;

    let file_appender = tracing_appender::rolling::daily(log_dir, "cardsmith.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let stdout_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let file_filter = EnvFilter::new("debug");

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_filter(stdout_filter),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_filter(file_filter),
        )
        .init();

    Ok(guard)
}
