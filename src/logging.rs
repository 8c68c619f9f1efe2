//! Tracing subscriber setup

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter (e.g. `debug`, `gomod=trace`)
pub const LOG_ENV: &str = "GOMOD_LOG";

const DEFAULT_FILTER: &str = "info";

/// Installs the global subscriber.
///
/// Logs go to stderr, or as JSON lines to `log_file` when given. The
/// returned guard must be held until exit so buffered file output is flushed.
pub fn init(log_file: Option<&Path>) -> std::io::Result<Option<WorkerGuard>> {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let Some(path) = log_file else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
        return Ok(None);
    };

    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)?;
    }
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    let (writer, guard) = tracing_appender::non_blocking(file);

    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_writer(writer)
        .init();

    Ok(Some(guard))
}
