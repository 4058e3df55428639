//! `tracing` setup for the binary.
//!
//! Events always go to stderr. With file logging enabled they are also
//! appended, without ANSI colours, to `<log_dir>/xhsnote.log`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::level_filters::LevelFilter;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub const LOG_FILE_NAME: &str = "xhsnote.log";

pub fn log_file_path(log_dir: &Path) -> PathBuf {
    log_dir.join(LOG_FILE_NAME)
}

/// Open (creating the directory if needed) the log file under `log_dir`.
pub fn file_appender(log_dir: &Path) -> anyhow::Result<RollingFileAppender> {
    fs::create_dir_all(log_dir)
        .with_context(|| format!("failed to create log directory: {}", log_dir.display()))?;
    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(LOG_FILE_NAME)
        .build(log_dir)
        .with_context(|| format!("failed to open log file: {}", log_file_path(log_dir).display()))
}

/// Install the global subscriber.
///
/// `RUST_LOG` directives are applied on top of `level`. Keep the returned
/// guard alive for the life of the process so buffered file output is
/// flushed.
pub fn init(level: LevelFilter, log_dir: &Path, enable_file: bool) -> anyhow::Result<Option<WorkerGuard>> {
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    let (file_layer, guard) = if enable_file {
        let (writer, guard) = tracing_appender::non_blocking(file_appender(log_dir)?);
        let layer = fmt::layer().with_ansi(false).with_writer(writer);
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .try_init()
        .context("failed to install tracing subscriber")?;

    if enable_file {
        tracing::debug!(path = %log_file_path(log_dir).display(), "file logging enabled");
    }
    Ok(guard)
}
