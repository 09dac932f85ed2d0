//! State the controller writes and the renderer reads.

use egui::ColorImage;
use std::path::PathBuf;

/// Top-level UI model consumed by the egui renderer.
#[derive(Clone, Debug, Default)]
pub struct UiState {
    /// Contents of the bordered preview region.
    pub preview: PreviewState,
    /// `None` until the first Predict click.
    pub result: Option<ResultLine>,
}

/// What the preview region currently shows.
#[derive(Clone, Debug, Default)]
pub enum PreviewState {
    /// Nothing selected yet.
    #[default]
    Empty,
    /// Decoded image ready for upload.
    Loaded(PreviewImage),
    /// The file was selected but could not be decoded for display.
    Unavailable {
        /// File the user picked.
        path: PathBuf,
    },
}

impl PreviewState {
    /// Path of the image behind the preview, if one was selected.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::Empty => None,
            Self::Loaded(image) => Some(&image.path),
            Self::Unavailable { path } => Some(path),
        }
    }
}

/// Decoded pixels for the preview texture.
#[derive(Clone, Debug)]
pub struct PreviewImage {
    /// File the pixels were decoded from.
    pub path: PathBuf,
    /// Width and height of the file before any downscaling.
    pub natural_size: [u32; 2],
    /// RGBA pixels, at most `PREVIEW_MAX_SIDE` on the long edge.
    pub image: ColorImage,
    /// Bumped on every selection so the renderer knows to re-upload.
    pub generation: u64,
}

/// Text under the buttons plus how to colour it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultLine {
    /// Text exactly as displayed.
    pub text: String,
    /// Colour class for the text.
    pub tone: ResultTone,
}

/// Colour class of the result line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResultTone {
    /// Guidance such as asking for an image.
    Hint,
    /// Image judged real.
    Real,
    /// Image judged fake.
    Fake,
    /// Decode, load or inference failure.
    Error,
}

impl ResultLine {
    /// Result line with `text` shown in `tone`.
    pub fn new(text: impl Into<String>, tone: ResultTone) -> Self {
        Self {
            text: text.into(),
            tone,
        }
    }
}
