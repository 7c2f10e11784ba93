use std::path::Path;

use anyhow::{anyhow, Context, Result};
use tracing_appender::{
    non_blocking::{NonBlocking, WorkerGuard},
    rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::EnvFilter;

use crate::constants::LOG_FILE_NAME;

const DEFAULT_FILTER: &str = "medimind=info";

// RUST_LOG wins; otherwise this crate logs at info and everything else is off.
fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Logs to stderr, filtered by `RUST_LOG` (e.g. `RUST_LOG=info,medimind=debug`).
pub fn init_stderr() {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .init();
}

/// Non-blocking writer appending to `<dir>/medimind.log`. Keep the guard
/// alive for as long as logs should be flushed.
pub fn file_writer(dir: &Path) -> Result<(NonBlocking, WorkerGuard)> {
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(LOG_FILE_NAME)
        .build(dir)
        .with_context(|| format!("Failed to open log file in {}", dir.display()))?;
    Ok(tracing_appender::non_blocking(appender))
}

/// Logs to a file so the terminal UI keeps the screen to itself.
pub fn init_file(dir: &Path) -> Result<WorkerGuard> {
    let (writer, guard) = file_writer(dir)?;
    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_ansi(false)
        .with_env_filter(env_filter())
        .try_init()
        .map_err(|e| anyhow!("Failed to install log subscriber: {}", e))?;
    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_without_rust_log() {
        if std::env::var("RUST_LOG").is_err() {
            assert_eq!(env_filter().to_string(), DEFAULT_FILTER);
        }
    }
}
