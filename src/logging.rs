//! Logging setup and timestamp helpers.
//!
//! Actions log through `tracing`; the binary installs a subscriber that writes
//! a daily-rotating file under `<root>/logs/` and optionally mirrors to stdout.

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use std::fs;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Installs the global tracing subscriber.
///
/// The returned guard must be held for the lifetime of the process, otherwise
/// buffered file output is lost.
pub fn setup_logging(
    log_dir: &Path,
    log_prefix: &str,
    debug_mode: bool,
    console_output: bool,
) -> Result<WorkerGuard> {
    fs::create_dir_all(log_dir)
        .with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;

    let file_appender = rolling::daily(log_dir, log_prefix);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = if debug_mode {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    // None disables the stdout mirror
    let console_layer = console_output.then(|| {
        tracing_subscriber::fmt::layer()
            .with_ansi(true)
            .with_target(false)
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(console_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    tracing::info!(
        "Logging initialized: dir={}, prefix={}, debug={}, console={}",
        log_dir.display(),
        log_prefix,
        debug_mode,
        console_output
    );

    Ok(guard)
}

/// Formats a moment as `YYYY.MM.DD-HH.MM.SS.mmm`, used for screenshot names.
pub fn format_timestamp_at(now: DateTime<Local>) -> String {
    now.format("%Y.%m.%d-%H.%M.%S%.3f").to_string()
}

/// Current local time as `YYYY.MM.DD-HH.MM.SS.mmm`.
pub fn format_timestamp() -> String {
    format_timestamp_at(Local::now())
}
