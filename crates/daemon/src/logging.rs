// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Structured logging setup, grounded in `oj-daemon`'s file-appender +
//! env-filter wiring: a non-blocking writer to a rotated log file, an
//! `RUST_LOG`-driven filter defaulting to `info`.

use std::path::Path;

use thiserror::Error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const MAX_LOG_SIZE: u64 = 10 * 1024 * 1024;
const MAX_ROTATED_LOGS: u32 = 3;

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("I/O error setting up logging at {path}: {source}")]
    Io {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Rotate `log_path` to `.1`/`.2`/`.3` if it has grown past [`MAX_LOG_SIZE`].
/// Best-effort: a rotation failure is not fatal to startup.
pub fn rotate_log_if_needed(log_path: &Path) {
    let size = match std::fs::metadata(log_path) {
        Ok(m) => m.len(),
        Err(_) => return,
    };
    if size < MAX_LOG_SIZE {
        return;
    }

    let log_str = log_path.display().to_string();
    for i in (1..MAX_ROTATED_LOGS).rev() {
        let _ = std::fs::rename(format!("{log_str}.{i}"), format!("{log_str}.{}", i + 1));
    }
    let _ = std::fs::rename(log_path, format!("{log_str}.1"));
}

/// Install a `tracing` subscriber writing to `log_path`, returning the
/// worker guard that must be held for the process lifetime to flush on
/// drop.
pub fn setup_logging(log_path: &Path) -> Result<tracing_appender::non_blocking::WorkerGuard, LoggingError> {
    let parent = log_path.parent().ok_or_else(|| LoggingError::Io {
        path: log_path.to_path_buf(),
        source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "log path has no parent directory"),
    })?;
    std::fs::create_dir_all(parent).map_err(|source| LoggingError::Io { path: parent.to_path_buf(), source })?;

    let file_name = log_path.file_name().ok_or_else(|| LoggingError::Io {
        path: log_path.to_path_buf(),
        source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "log path has no file name"),
    })?;
    let file_appender = tracing_appender::rolling::never(parent, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry().with(filter).with(fmt::layer().with_writer(non_blocking)).init();

    Ok(guard)
}

#[cfg(test)]
#[path = "logging_tests.rs"]
mod tests;
