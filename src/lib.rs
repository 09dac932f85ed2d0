//! Library exports for the detector binary and integration tests.
/// Application directory resolution.
pub mod app_dirs;
/// Detector settings file.
pub mod config;
/// egui window, controller and UI state.
pub mod egui_app;
/// Preprocessing, model loading and inference.
pub mod inference;
/// Tracing subscriber setup.
pub mod logging;
/// Threshold rule and result text.
pub mod prediction;
