//! File-based logging for the viewer
//!
//! The TUI owns the terminal, so tracing output goes to a rolling log file
//! instead of stdout.

use std::ffi::OsString;
use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

const LOG_DIR: &str = ".logs";
const LOG_DIR_ENV: &str = "NEXUS_LOG_DIR";
const LOG_FILE_PREFIX: &str = "nexus-viewer";
const DEFAULT_FILTER: &str = "nexus_viewer=debug,warn";

/// Initialize the logging system.
///
/// Logs are written to `.logs/nexus-viewer.YYYY-MM-DD.log` with daily rotation.
/// `NEXUS_LOG_DIR` moves the directory and `RUST_LOG` overrides the filter.
///
/// Default log levels:
/// - `nexus_viewer` modules: DEBUG
/// - Other crates (lopdf, image, tokio): WARN
pub fn init_logging() -> anyhow::Result<()> {
    // Ensure log directory exists
    let log_dir = resolve_log_dir(std::env::var_os(LOG_DIR_ENV));
    if !log_dir.exists() {
        std::fs::create_dir_all(&log_dir)?;
    }

    // Create a daily rotating file appender
    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, LOG_FILE_PREFIX);

    // Non-blocking writer off the async runtime
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // The guard flushes on drop and must live as long as the process
    Box::leak(Box::new(guard));

    // RUST_LOG wins over the built-in filter
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    // File output only
    let fmt_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false) // No ANSI colors in log files
        .with_target(true) // Module path tells controller and media events apart
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_span_events(FmtSpan::CLOSE);

    // A second subscriber is an error, not a panic
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()?;

    tracing::info!("Logging initialized - logs written to {}/", log_dir.display());

    Ok(())
}

/// Log directory from an optional override, ignoring empty values
fn resolve_log_dir(override_dir: Option<OsString>) -> PathBuf {
    match override_dir {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => PathBuf::from(LOG_DIR),
    }
}
