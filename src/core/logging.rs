//! Logging setup
//!
//! Installs a `tracing` registry with:
//! - a JSON file layer, rolled daily, in the app data directory
//! - an optional human-readable stderr layer
//! - a `LogTracer` bridge so `log` macros reach the same subscriber

use std::fs;
use std::io;
use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

const LOG_FILE_PREFIX: &str = "explainthis.log";

/// Where human-readable output goes in addition to the log file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogOutput {
    /// Server mode: pretty events on stderr
    Stderr,
    /// Terminal front ends own stdout/stderr; file only
    FileOnly,
}

/// `<data dir>/explainthis/logs`, or `./logs` when no data dir exists.
pub fn log_dir() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join("explainthis").join("logs"))
        .unwrap_or_else(|| PathBuf::from("logs"))
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Initialize the logging system.
///
/// Returns a `WorkerGuard` which must be kept alive for the duration of the
/// application so buffered file logs are flushed on shutdown.
pub fn init(output: LogOutput) -> WorkerGuard {
    let log_dir = log_dir();
    if !log_dir.exists() {
        if let Err(e) = fs::create_dir_all(&log_dir) {
            eprintln!("Failed to create logs directory: {}", e);
        }
    }

    let file_appender = tracing_appender::rolling::daily(&log_dir, LOG_FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .json()
        .with_file(true)
        .with_line_number(true)
        .with_thread_ids(true)
        .with_target(true)
        .with_filter(env_filter());

    let stderr_layer = match output {
        LogOutput::Stderr => Some(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(false)
                .with_filter(env_filter()),
        ),
        LogOutput::FileOnly => None,
    };

    // try_init: a second call (tests, embedding) keeps the first subscriber
    let installed = tracing_subscriber::registry()
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .is_ok();

    if let Err(e) = tracing_log::LogTracer::init() {
        tracing::debug!("LogTracer already installed: {}", e);
    }

    if installed {
        log::info!(
            "Logging initialized. Writing to: {:?} (daily rolling)",
            log_dir.join(LOG_FILE_PREFIX)
        );
    }

    guard
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_dir_is_app_scoped() {
        let dir = log_dir();
        assert!(dir.ends_with("logs"));
        assert!(dir.to_string_lossy().contains("explainthis") || dir == PathBuf::from("logs"));
    }

    #[test]
    fn test_init_twice_does_not_panic() {
        let _first = init(LogOutput::FileOnly);
        let _second = init(LogOutput::Stderr);
        tracing::info!("still logging");
    }
}
