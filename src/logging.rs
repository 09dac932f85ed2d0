//! Tracing setup for the detector.
//!
//! Installs a global subscriber that mirrors every event to stdout and to a
//! log file created per launch under `<app dir>/logs`. Only the newest
//! [`MAX_LOG_FILES`] files are kept.

use std::{
    fs::{self, OpenOptions},
    path::{Path, PathBuf},
    sync::OnceLock,
    time::SystemTime,
};

use time::{OffsetDateTime, UtcOffset, format_description::FormatItem, macros::format_description};
use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{EnvFilter, Registry, fmt, prelude::*};

use crate::app_dirs::{self, AppDirError};

/// Maximum number of log files to retain.
pub const MAX_LOG_FILES: usize = 10;
const LOG_FILE_PREFIX: &str = "deepfake_detect";
const DEFAULT_FILTER: &str = "info";

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Errors that may occur while initializing logging.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    /// The log directory could not be resolved or created.
    #[error("Log directory unavailable: {0}")]
    Directory(#[from] AppDirError),
    /// Failed to enumerate or remove old log files.
    #[error("Failed to prune log files in {path}: {source}")]
    Prune {
        /// Log directory.
        path: PathBuf,
        /// Filesystem error.
        source: std::io::Error,
    },
    /// Failed to create the log file for this launch.
    #[error("Failed to create log file at {path}: {source}")]
    CreateLogFile {
        /// Log file path.
        path: PathBuf,
        /// Filesystem error.
        source: std::io::Error,
    },
    /// Failed to format a timestamp for the log filename.
    #[error("Failed to format log filename time: {0}")]
    FormatTime(#[from] time::error::Format),
    /// Another global subscriber is already installed.
    #[error("Failed to install global tracing subscriber: {0}")]
    SetGlobal(#[from] tracing::subscriber::SetGlobalDefaultError),
}

/// Initialize tracing to write to stdout and a per-launch log file.
///
/// Calling this twice is a no-op. Errors are returned so `main` can keep
/// running without file logging.
pub fn init() -> Result<PathBuf, LoggingError> {
    let log_dir = app_dirs::logs_dir()?;
    let log_file_name = log_file_name(now_local_or_utc())?;
    let log_path = log_dir.join(&log_file_name);
    if LOG_GUARD.get().is_some() {
        return Ok(log_path);
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .map_err(|source| LoggingError::CreateLogFile {
            path: log_path.clone(),
            source,
        })?;
    prune_old_logs(&log_dir, MAX_LOG_FILES)?;

    let (file_writer, guard) =
        tracing_appender::non_blocking(rolling::never(&log_dir, &log_file_name));
    let timer = local_timer();
    let subscriber = Registry::default()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)))
        .with(
            fmt::layer()
                .with_timer(timer.clone())
                .with_writer(std::io::stdout),
        )
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_timer(timer)
                .with_writer(file_writer),
        );
    tracing::subscriber::set_global_default(subscriber)?;
    let _ = LOG_GUARD.set(guard);

    tracing::info!(path = %log_path.display(), "Logging initialized");
    Ok(log_path)
}

fn prune_old_logs(dir: &Path, max_files: usize) -> Result<(), LoggingError> {
    let prune_err = |source| LoggingError::Prune {
        path: dir.to_path_buf(),
        source,
    };
    let mut logs: Vec<(SystemTime, PathBuf)> = fs::read_dir(dir)
        .map_err(prune_err)?
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "log"))
        .map(|path| {
            let modified = fs::metadata(&path)
                .and_then(|meta| meta.modified())
                .unwrap_or(SystemTime::UNIX_EPOCH);
            (modified, path)
        })
        .collect();
    if logs.len() <= max_files {
        return Ok(());
    }
    logs.sort_by_key(|(modified, _)| *modified);
    let excess = logs.len() - max_files;
    for (_, path) in logs.into_iter().take(excess) {
        fs::remove_file(&path).map_err(prune_err)?;
    }
    Ok(())
}

fn log_file_name(now: OffsetDateTime) -> Result<String, LoggingError> {
    const NAME_FORMAT: &[FormatItem<'_>] =
        format_description!("[year]-[month]-[day]_[hour]-[minute]-[second]");
    Ok(format!("{LOG_FILE_PREFIX}_{}.log", now.format(NAME_FORMAT)?))
}

fn local_timer() -> fmt::time::OffsetTime<time::format_description::BorrowedFormatItem<'static>> {
    const DISPLAY_FORMAT: &[FormatItem<'static>] =
        format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
    let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
    fmt::time::OffsetTime::new(offset, DISPLAY_FORMAT.into())
}

fn now_local_or_utc() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{thread, time::Duration};
    use tempfile::tempdir;

    #[test]
    fn log_filename_has_timestamp_and_prefix() {
        let fixed = OffsetDateTime::from_unix_timestamp(1_700_000_000).unwrap();
        assert_eq!(
            log_file_name(fixed).unwrap(),
            "deepfake_detect_2023-11-14_22-13-20.log"
        );
    }

    #[test]
    fn prune_keeps_newest_logs_and_ignores_other_files() {
        let dir = tempdir().unwrap();
        for idx in 0..13 {
            fs::write(dir.path().join(format!("deepfake_detect_{idx}.log")), b"").unwrap();
            thread::sleep(Duration::from_millis(10));
        }
        fs::write(dir.path().join("config.toml"), b"").unwrap();

        prune_old_logs(dir.path(), 10).unwrap();

        let mut names: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        assert_eq!(names.len(), 11);
        assert!(names.contains(&"config.toml".to_string()));
        assert!(!names.contains(&"deepfake_detect_0.log".to_string()));
        assert!(!names.contains(&"deepfake_detect_2.log".to_string()));
        assert!(names.contains(&"deepfake_detect_12.log".to_string()));
    }
}
