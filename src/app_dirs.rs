//! Where the detector keeps its files.
//!
//! Everything lives in one `.deepfake_detect` folder. Its parent is picked from,
//! in order: a test-scoped override, `DEEPFAKE_DETECT_CONFIG_HOME`, then the OS
//! config directory.

use std::path::PathBuf;

use directories::BaseDirs;
use thiserror::Error;

/// Folder name created under the resolved base directory.
pub const APP_DIR_NAME: &str = ".deepfake_detect";
/// Environment variable replacing the OS config directory as the base.
pub const CONFIG_HOME_ENV: &str = "DEEPFAKE_DETECT_CONFIG_HOME";
const LOGS_DIR_NAME: &str = "logs";

/// Failures while locating or creating the app folders.
#[derive(Debug, Error)]
pub enum AppDirError {
    /// Neither the environment nor the OS offered a base directory.
    #[error("No suitable base config directory available for application files")]
    NoBaseDir,
    /// A folder could not be created.
    #[error("Failed to create application directory at {path}: {source}")]
    CreateDir {
        /// Folder that was being created.
        path: PathBuf,
        /// Underlying filesystem error.
        source: std::io::Error,
    },
}

/// Which setting supplied the base directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BaseSource {
    Scoped,
    Env,
    Os,
}

/// `.deepfake_detect` under the resolved base, created on demand.
pub fn app_root_dir() -> Result<PathBuf, AppDirError> {
    let (source, base) = resolve_base().ok_or(AppDirError::NoBaseDir)?;
    tracing::trace!(?source, base = %base.display(), "Resolved app base directory");
    ensure_dir(base.join(APP_DIR_NAME))
}

/// `logs/` inside [`app_root_dir`], created on demand.
pub fn logs_dir() -> Result<PathBuf, AppDirError> {
    subdir(LOGS_DIR_NAME)
}

fn subdir(name: &str) -> Result<PathBuf, AppDirError> {
    ensure_dir(app_root_dir()?.join(name))
}

fn ensure_dir(path: PathBuf) -> Result<PathBuf, AppDirError> {
    match std::fs::create_dir_all(&path) {
        Ok(()) => Ok(path),
        Err(source) => Err(AppDirError::CreateDir { path, source }),
    }
}

fn resolve_base() -> Option<(BaseSource, PathBuf)> {
    if let Some(path) = scoped_base() {
        return Some((BaseSource::Scoped, path));
    }
    std::env::var_os(CONFIG_HOME_ENV)
        .filter(|value| !value.is_empty())
        .map(|value| (BaseSource::Env, PathBuf::from(value)))
        .or_else(|| {
            BaseDirs::new().map(|dirs| (BaseSource::Os, dirs.config_dir().to_path_buf()))
        })
}

#[cfg(test)]
fn scoped_base() -> Option<PathBuf> {
    scoped::current()
}

#[cfg(not(test))]
fn scoped_base() -> Option<PathBuf> {
    None
}
