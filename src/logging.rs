//! Log setup for hosts embedding the editor core.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;

use crate::constants::LOG_FILE_NAME;

/// Set up stdout + file logging under `logs_dir`.
///
/// The returned guard must be kept alive for the file writer to flush. If a
/// global subscriber is already installed it is kept and only the file
/// separator is written.
pub fn setup_logging(logs_dir: &Path) -> Option<WorkerGuard> {
    if std::fs::create_dir_all(logs_dir).is_err() {
        eprintln!("Failed to create logs directory");
        return None;
    }

    let log_file_path = logs_dir.join(LOG_FILE_NAME);

    // Append session separator to existing log file
    if let Ok(mut file) = OpenOptions::new().append(true).open(&log_file_path) {
        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
        let separator = "=".repeat(80);
        let _ = writeln!(
            file,
            "\n\n{}\n=== New Session Started at {} ===\n{}\n",
            separator, timestamp, separator
        );
    }

    let file_appender = tracing_appender::rolling::never(logs_dir, LOG_FILE_NAME);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // No ANSI colors for file output
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_level(true);

    let stdout_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stdout)
        .with_ansi(true)
        .with_target(true)
        .with_level(true);

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,rustboard=debug"));

    if tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stdout_layer)
        .try_init()
        .is_err()
    {
        eprintln!("A global logger is already installed, keeping it");
    }

    Some(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setup_logging_creates_log_file() {
        let dir = std::env::temp_dir().join(format!("rustboard-logs-{}", std::process::id()));
        let guard = setup_logging(&dir);
        assert!(guard.is_some());
        assert!(dir.join(LOG_FILE_NAME).exists());

        drop(guard);
        let _ = std::fs::remove_dir_all(&dir);
    }
}
