//! Image classification: preprocessing, the model seam and the burn classifier.
//!
//! The controller only talks to [`ModelLoader`] and [`Classifier`], so tests can
//! swap the burn model for a deterministic double.

mod backend;
mod model;
pub mod preprocess;
mod slot;

use std::path::{Path, PathBuf};

use thiserror::Error;

pub use backend::BackendKind;
pub use model::{
    BurnClassifier, BurnModelLoader, DeepfakeNet, MIN_INPUT_SIDE, MODEL_FILE_EXTENSION,
    has_model_extension,
};
pub use slot::ModelSlot;

/// Channels per pixel in model input (RGB).
pub const INPUT_CHANNELS: usize = 3;

/// Errors raised while preparing input or running the model.
#[derive(Debug, Error)]
pub enum InferenceError {
    /// The selected image could not be opened or decoded.
    #[error("Could not decode image {path}: {source}")]
    Decode {
        /// Selected image.
        path: PathBuf,
        /// Decoder error.
        source: image::ImageError,
    },
    /// No model artifact exists at the configured path.
    #[error("Model file not found at {path}")]
    ModelMissing {
        /// Configured model path.
        path: PathBuf,
    },
    /// The model artifact exists but could not be loaded.
    #[error("Failed to load model from {path}: {reason}")]
    LoadModel {
        /// Configured model path.
        path: PathBuf,
        /// Why the record was rejected.
        reason: String,
    },
    /// Tensor dimensions do not match what the model expects.
    #[error("Input shape mismatch: expected {expected}, got {actual:?}")]
    Shape {
        /// Description of the accepted shape.
        expected: String,
        /// Shape that was passed in.
        actual: Vec<usize>,
    },
    /// Model output could not be read back.
    #[error("Could not read model output: {0}")]
    Output(String),
    /// The model produced no score.
    #[error("Model returned no score")]
    EmptyOutput,
    /// The model produced a score that is not a finite number.
    #[error("Model returned a non-finite score ({0})")]
    InvalidScore(f32),
}

/// Batched NHWC `f32` image tensor.
#[derive(Debug, Clone, PartialEq)]
pub struct InputTensor {
    shape: [usize; 4],
    data: Vec<f32>,
}

impl InputTensor {
    /// Wrap `data` laid out as `[batch, height, width, channels]`.
    pub fn new(shape: [usize; 4], data: Vec<f32>) -> Result<Self, InferenceError> {
        let expected: usize = shape.iter().product();
        if data.len() != expected {
            return Err(InferenceError::Shape {
                expected: format!("{expected} values for {shape:?}"),
                actual: vec![data.len()],
            });
        }
        Ok(Self { shape, data })
    }

    /// Dimensions as `[batch, height, width, channels]`.
    pub fn shape(&self) -> [usize; 4] {
        self.shape
    }

    /// Number of images in the batch.
    pub fn batch_size(&self) -> usize {
        self.shape[0]
    }

    /// Values in row-major NHWC order.
    pub fn data(&self) -> &[f32] {
        &self.data
    }
}

/// A loaded model that maps an input batch to one score per row.
pub trait Classifier {
    /// Run one forward pass. Scores are probabilities in `[0, 1]`.
    fn predict(&self, input: &InputTensor) -> Result<Vec<f32>, InferenceError>;
}

/// Produces a ready-to-run [`Classifier`] from an on-disk artifact.
pub trait ModelLoader {
    /// Load the artifact at `path`.
    fn load(&self, path: &Path) -> Result<Box<dyn Classifier>, InferenceError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_tensor_rejects_mismatched_length() {
        let err = InputTensor::new([1, 2, 2, 3], vec![0.0; 11]).unwrap_err();
        assert!(matches!(err, InferenceError::Shape { .. }));
        let ok = InputTensor::new([1, 2, 2, 3], vec![0.0; 12]).unwrap();
        assert_eq!(ok.batch_size(), 1);
        assert_eq!(ok.shape(), [1, 2, 2, 3]);
    }
}
