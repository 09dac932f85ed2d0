//! Detector settings loaded from `config.toml` in the app directory.
//!
//! Every field falls back to the model contract constants, so a missing file or
//! a partial file is valid. The file is only read, never written.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::app_dirs::{self, AppDirError};
use crate::inference::{BackendKind, MIN_INPUT_SIDE, MODEL_FILE_EXTENSION, has_model_extension};

/// Default filename used to store the app configuration.
pub const CONFIG_FILE_NAME: &str = "config.toml";
/// Model artifact path, relative to the working directory.
pub const DEFAULT_MODEL_PATH: &str = "df_model.mpk";
/// Square side length the model expects.
pub const DEFAULT_INPUT_SIZE: u32 = 224;
/// Largest accepted `input_size`; bigger inputs would exhaust memory.
pub const MAX_INPUT_SIZE: u32 = 4096;
/// Divisor mapping 8-bit channel values into `[0, 1]`.
pub const DEFAULT_PIXEL_SCALE: f32 = 255.0;
/// Scores at or above this are labelled "Real".
pub const DEFAULT_THRESHOLD: f32 = 0.5;

/// Errors that may occur while loading the settings file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The app directory could not be resolved.
    #[error("Config directory unavailable: {0}")]
    Directory(#[from] AppDirError),
    /// Failed to read the config file.
    #[error("Failed to read {path}: {source}")]
    Read {
        /// Config file path.
        path: PathBuf,
        /// Filesystem error.
        source: std::io::Error,
    },
    /// Failed to parse TOML config.
    #[error("Invalid config at {path}: {source}")]
    ParseToml {
        /// Config file path.
        path: PathBuf,
        /// TOML error.
        source: toml::de::Error,
    },
    /// A value parsed but falls outside its allowed range.
    #[error("Invalid config at {path}: {reason}")]
    OutOfRange {
        /// Config file path.
        path: PathBuf,
        /// Which value was rejected and why.
        reason: String,
    },
}

/// Model contract and runtime knobs for the detector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectorSettings {
    /// Path of the `.mpk` model weights; relative paths resolve against the working directory.
    #[serde(default = "default_model_path")]
    pub model_path: PathBuf,
    /// Side length images are resized to before inference.
    #[serde(default = "default_input_size")]
    pub input_size: u32,
    /// Divisor applied to each channel value.
    #[serde(default = "default_pixel_scale")]
    pub pixel_scale: f32,
    /// Decision boundary between "Fake" and "Real".
    #[serde(default = "default_threshold")]
    pub threshold: f32,
    /// Device the model runs on.
    #[serde(default)]
    pub backend: BackendKind,
}

impl Default for DetectorSettings {
    fn default() -> Self {
        Self {
            model_path: default_model_path(),
            input_size: default_input_size(),
            pixel_scale: default_pixel_scale(),
            threshold: default_threshold(),
            backend: BackendKind::default(),
        }
    }
}

impl DetectorSettings {
    fn validate(self, path: &Path) -> Result<Self, ConfigError> {
        let out_of_range = |reason: String| ConfigError::OutOfRange {
            path: path.to_path_buf(),
            reason,
        };
        let min_input_size = MIN_INPUT_SIDE as u32;
        if !(min_input_size..=MAX_INPUT_SIZE).contains(&self.input_size) {
            return Err(out_of_range(format!(
                "input_size must be within [{min_input_size}, {MAX_INPUT_SIZE}] (got {})",
                self.input_size
            )));
        }
        if !has_model_extension(&self.model_path) {
            return Err(out_of_range(format!(
                "model_path must name a .{MODEL_FILE_EXTENSION} file (got {})",
                self.model_path.display()
            )));
        }
        if !self.pixel_scale.is_finite() || self.pixel_scale <= 0.0 {
            return Err(out_of_range(format!(
                "pixel_scale must be > 0 (got {})",
                self.pixel_scale
            )));
        }
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(out_of_range(format!(
                "threshold must be within [0, 1] (got {})",
                self.threshold
            )));
        }
        Ok(self)
    }
}

fn default_model_path() -> PathBuf {
    PathBuf::from(DEFAULT_MODEL_PATH)
}

fn default_input_size() -> u32 {
    DEFAULT_INPUT_SIZE
}

fn default_pixel_scale() -> f32 {
    DEFAULT_PIXEL_SCALE
}

fn default_threshold() -> f32 {
    DEFAULT_THRESHOLD
}

/// Resolve the configuration file path inside the app directory.
pub fn config_path() -> Result<PathBuf, ConfigError> {
    Ok(app_dirs::app_root_dir()?.join(CONFIG_FILE_NAME))
}

/// Load settings from the app directory, returning defaults if the file is missing.
pub fn load_or_default() -> Result<DetectorSettings, ConfigError> {
    load_settings_from(&config_path()?)
}

/// Load settings from an explicit path, returning defaults if it does not exist.
pub fn load_settings_from(path: &Path) -> Result<DetectorSettings, ConfigError> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "No config file; using defaults");
        return Ok(DetectorSettings::default());
    }
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let settings: DetectorSettings =
        toml::from_str(&text).map_err(|source| ConfigError::ParseToml {
            path: path.to_path_buf(),
            source,
        })?;
    settings.validate(path)
}
