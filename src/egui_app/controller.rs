//! Command handlers behind the two buttons.
//!
//! Every user action is a method on [`DetectorController`] that updates
//! [`UiState`]; the renderer only forwards clicks, so the whole flow runs in
//! tests without a window.

use std::path::{Path, PathBuf};

use egui::ColorImage;
use rfd::FileDialog;
use tracing::{debug, info, warn};

use crate::config::DetectorSettings;
use crate::egui_app::state::{PreviewImage, PreviewState, ResultLine, ResultTone, UiState};
use crate::inference::{BurnModelLoader, InferenceError, ModelLoader, ModelSlot, preprocess};
use crate::prediction::{SELECT_IMAGE_FIRST, Verdict, format_failure, format_prediction};

/// Extensions offered by the image picker.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp"];
/// Longest side kept for the preview texture; larger images are downscaled.
pub const PREVIEW_MAX_SIDE: u32 = 1024;
const DIALOG_TITLE: &str = "Select an Image";

/// Owns the selected image, the lazily loaded model and the last result.
pub struct DetectorController {
    /// State read by the renderer.
    pub ui: UiState,
    settings: DetectorSettings,
    loader: Box<dyn ModelLoader>,
    model: ModelSlot,
    selected_image: Option<PathBuf>,
    preview_generation: u64,
}

impl DetectorController {
    /// Controller that loads its model through `loader` on first Predict.
    pub fn new(settings: DetectorSettings, loader: Box<dyn ModelLoader>) -> Self {
        Self {
            ui: UiState::default(),
            settings,
            loader,
            model: ModelSlot::default(),
            selected_image: None,
            preview_generation: 0,
        }
    }

    /// Controller backed by the burn classifier on the configured backend.
    pub fn with_burn_model(settings: DetectorSettings) -> Self {
        let loader = BurnModelLoader::new(settings.backend);
        Self::new(settings, Box::new(loader))
    }

    /// Settings the controller was built with.
    pub fn settings(&self) -> &DetectorSettings {
        &self.settings
    }

    /// Currently selected image, if any.
    pub fn selected_image(&self) -> Option<&Path> {
        self.selected_image.as_deref()
    }

    /// Whether a model load has succeeded.
    pub fn model_loaded(&self) -> bool {
        self.model.is_loaded()
    }

    /// Text of the result line, if one is shown.
    pub fn result_text(&self) -> Option<&str> {
        self.ui.result.as_ref().map(|line| line.text.as_str())
    }

    /// Ask the user for an image; cancelling leaves everything as it was.
    pub fn select_image_via_dialog(&mut self) {
        let Some(path) = FileDialog::new()
            .set_title(DIALOG_TITLE)
            .add_filter("Image Files", IMAGE_EXTENSIONS)
            .pick_file()
        else {
            debug!("Image selection cancelled");
            return;
        };
        self.select_image_path(path);
    }

    /// Make `path` the current image and refresh the preview.
    ///
    /// A file that cannot be decoded is still selected; the preview shows a
    /// placeholder and the failure surfaces on Predict.
    pub fn select_image_path(&mut self, path: PathBuf) {
        self.preview_generation += 1;
        self.ui.preview = match decode_preview(&path) {
            Ok((image, natural_size)) => PreviewState::Loaded(PreviewImage {
                path: path.clone(),
                natural_size,
                image,
                generation: self.preview_generation,
            }),
            Err(err) => {
                warn!(path = %path.display(), "Preview decode failed: {err}");
                PreviewState::Unavailable { path: path.clone() }
            }
        };
        info!(path = %path.display(), "Image selected");
        self.selected_image = Some(path);
    }

    /// Classify the selected image and publish the verdict.
    pub fn predict_image(&mut self) {
        let Some(path) = self.selected_image.clone() else {
            self.ui.result = Some(ResultLine::new(SELECT_IMAGE_FIRST, ResultTone::Hint));
            return;
        };
        self.ui.result = Some(match self.classify(&path) {
            Ok(score) => {
                let verdict = Verdict::from_score(score, self.settings.threshold);
                info!(path = %path.display(), score, %verdict, "Prediction complete");
                let tone = match verdict {
                    Verdict::Real => ResultTone::Real,
                    Verdict::Fake => ResultTone::Fake,
                };
                ResultLine::new(format_prediction(verdict, score), tone)
            }
            Err(err) => {
                warn!(path = %path.display(), "Prediction failed: {err}");
                ResultLine::new(format_failure(&err), ResultTone::Error)
            }
        });
    }

    fn classify(&mut self, path: &Path) -> Result<f32, InferenceError> {
        let input =
            preprocess::load_input(path, self.settings.input_size, self.settings.pixel_scale)?;
        let model = self
            .model
            .ensure_loaded(self.loader.as_ref(), &self.settings.model_path)?;
        let score = model
            .predict(&input)?
            .first()
            .copied()
            .ok_or(InferenceError::EmptyOutput)?;
        if !score.is_finite() {
            return Err(InferenceError::InvalidScore(score));
        }
        Ok(score)
    }
}

fn decode_preview(path: &Path) -> Result<(ColorImage, [u32; 2]), image::ImageError> {
    let mut image = image::open(path)?;
    let natural_size = [image.width(), image.height()];
    if natural_size.iter().any(|side| *side > PREVIEW_MAX_SIDE) {
        image = image.thumbnail(PREVIEW_MAX_SIDE, PREVIEW_MAX_SIDE);
    }
    let rgba = image.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    Ok((
        ColorImage::from_rgba_unmultiplied(size, rgba.as_raw()),
        natural_size,
    ))
}
