use std::path::Path;

use burn::module::Module;
use burn::nn::conv::{Conv2d, Conv2dConfig};
use burn::nn::pool::{AdaptiveAvgPool2d, AdaptiveAvgPool2dConfig};
use burn::nn::{Linear, LinearConfig, Relu};
use burn::record::{FullPrecisionSettings, NamedMpkFileRecorder, Recorder};
use burn::tensor::{Tensor, TensorData, activation::sigmoid, backend::Backend};
use tracing::info;

use super::backend::{BackendKind, CpuBackend, CpuDevice, GpuBackend, GpuDevice};
use super::{Classifier, INPUT_CHANNELS, InferenceError, InputTensor, ModelLoader};

/// Extension the burn named-msgpack recorder reads and writes.
pub const MODEL_FILE_EXTENSION: &str = "mpk";

/// Channel widths of the stride-2 convolution stack, input first.
const CONV_CHANNELS: [usize; 4] = [INPUT_CHANNELS, 16, 32, 64];
const CONV_KERNEL: usize = 3;
const CONV_STRIDE: usize = 2;

/// Smallest height/width that survives every unpadded stride-2 block with at
/// least one output pixel.
pub const MIN_INPUT_SIDE: usize = min_input_side(CONV_CHANNELS.len() - 1);

const fn min_input_side(blocks: usize) -> usize {
    let mut side = 1;
    let mut remaining = blocks;
    while remaining > 0 {
        side = (side - 1) * CONV_STRIDE + CONV_KERNEL;
        remaining -= 1;
    }
    side
}

type ModelRecorder = NamedMpkFileRecorder<FullPrecisionSettings>;

/// Binary real/fake image classifier.
///
/// Takes NHWC input in `[0, 1]` and returns one sigmoid score per image,
/// shaped `[batch, 1]`.
#[derive(Module, Debug)]
pub struct DeepfakeNet<B: Backend> {
    blocks: Vec<Conv2d<B>>,
    pool: AdaptiveAvgPool2d,
    head: Linear<B>,
    activation: Relu,
}

impl<B: Backend> DeepfakeNet<B> {
    /// Build a freshly initialized network on `device`.
    pub fn new(device: &B::Device) -> Self {
        let blocks = CONV_CHANNELS
            .windows(2)
            .map(|pair| {
                Conv2dConfig::new([pair[0], pair[1]], [CONV_KERNEL, CONV_KERNEL])
                    .with_stride([CONV_STRIDE, CONV_STRIDE])
                    .init(device)
            })
            .collect();
        Self {
            blocks,
            pool: AdaptiveAvgPool2dConfig::new([1, 1]).init(),
            head: LinearConfig::new(CONV_CHANNELS[CONV_CHANNELS.len() - 1], 1).init(device),
            activation: Relu::new(),
        }
    }

    /// Score a `[batch, height, width, 3]` batch.
    pub fn forward(&self, images: Tensor<B, 4>) -> Tensor<B, 2> {
        let mut x = images.permute([0, 3, 1, 2]);
        for conv in &self.blocks {
            x = self.activation.forward(conv.forward(x));
        }
        let features = self.pool.forward(x).flatten::<2>(1, 3);
        sigmoid(self.head.forward(features))
    }
}

/// [`DeepfakeNet`] bound to the device it was loaded on.
pub struct BurnClassifier<B: Backend> {
    model: DeepfakeNet<B>,
    device: B::Device,
}

impl<B: Backend> BurnClassifier<B> {
    /// Read weights recorded at `path` into a new network on `device`.
    pub fn load(path: &Path, device: B::Device) -> Result<Self, InferenceError> {
        let record: DeepfakeNetRecord<B> =
            <ModelRecorder as Recorder<B>>::load(&ModelRecorder::new(), path.to_path_buf(), &device)
                .map_err(|err| InferenceError::LoadModel {
                    path: path.to_path_buf(),
                    reason: format!("{err:?}"),
                })?;
        let model = DeepfakeNet::new(&device).load_record(record);
        Ok(Self { model, device })
    }
}

impl<B: Backend> Classifier for BurnClassifier<B> {
    fn predict(&self, input: &InputTensor) -> Result<Vec<f32>, InferenceError> {
        let shape = input.shape();
        if shape[0] == 0
            || shape[1] < MIN_INPUT_SIDE
            || shape[2] < MIN_INPUT_SIDE
            || shape[3] != INPUT_CHANNELS
        {
            return Err(InferenceError::Shape {
                expected: format!(
                    "[batch >= 1, height >= {MIN_INPUT_SIDE}, width >= {MIN_INPUT_SIDE}, {INPUT_CHANNELS}]"
                ),
                actual: shape.to_vec(),
            });
        }
        let images = Tensor::<B, 4>::from_data(
            TensorData::new(input.data().to_vec(), shape),
            &self.device,
        );
        self.model
            .forward(images)
            .into_data()
            .to_vec::<f32>()
            .map_err(|err| InferenceError::Output(format!("{err:?}")))
    }
}

/// Loads [`DeepfakeNet`] weights onto the configured backend.
#[derive(Clone, Copy, Debug, Default)]
pub struct BurnModelLoader {
    backend: BackendKind,
}

impl BurnModelLoader {
    /// Loader that places weights on `backend`.
    pub fn new(backend: BackendKind) -> Self {
        Self { backend }
    }
}

/// True when `path` ends in the extension the recorder reads.
///
/// The recorder swaps any other extension for `.mpk`, which would load a file
/// other than the one named.
pub fn has_model_extension(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(MODEL_FILE_EXTENSION))
}

impl ModelLoader for BurnModelLoader {
    fn load(&self, path: &Path) -> Result<Box<dyn Classifier>, InferenceError> {
        if !has_model_extension(path) {
            return Err(InferenceError::LoadModel {
                path: path.to_path_buf(),
                reason: format!("expected a .{MODEL_FILE_EXTENSION} weights file"),
            });
        }
        if !path.is_file() {
            return Err(InferenceError::ModelMissing {
                path: path.to_path_buf(),
            });
        }
        info!(path = %path.display(), backend = %self.backend, "Loading classifier weights");
        let classifier: Box<dyn Classifier> = match self.backend {
            BackendKind::Cpu => Box::new(BurnClassifier::<CpuBackend>::load(
                path,
                CpuDevice::default(),
            )?),
            BackendKind::Wgpu => Box::new(BurnClassifier::<GpuBackend>::load(
                path,
                GpuDevice::default(),
            )?),
        };
        Ok(classifier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn blank_input(side: usize, value: f32) -> InputTensor {
        InputTensor::new([1, side, side, 3], vec![value; side * side * 3]).unwrap()
    }

    #[test]
    fn forward_yields_one_probability_per_image() {
        let device = CpuDevice::default();
        let model = DeepfakeNet::<CpuBackend>::new(&device);
        let images = Tensor::<CpuBackend, 4>::zeros([2, 32, 32, 3], &device);
        let scores = model.forward(images);
        assert_eq!(scores.dims(), [2, 1]);
        let values = scores.into_data().to_vec::<f32>().unwrap();
        assert!(values.iter().all(|v| (0.0..=1.0).contains(v)));
    }

    #[test]
    fn saved_weights_load_through_loader_and_predict_deterministically() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("df_model.mpk");
        let device = CpuDevice::default();
        DeepfakeNet::<CpuBackend>::new(&device)
            .save_file(path.clone(), &ModelRecorder::new())
            .unwrap();

        let classifier = BurnModelLoader::new(BackendKind::Cpu).load(&path).unwrap();
        let input = blank_input(224, 0.5);
        let first = classifier.predict(&input).unwrap();
        let second = classifier.predict(&input).unwrap();

        assert_eq!(first.len(), 1);
        assert!((0.0..=1.0).contains(&first[0]));
        assert_eq!(first, second);
    }

    #[test]
    fn missing_weights_are_reported_before_touching_backend() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("df_model.mpk");
        let err = BurnModelLoader::default().load(&path).err().unwrap();
        assert!(matches!(err, InferenceError::ModelMissing { path: p } if p == path));
    }

    #[test]
    fn minimum_side_matches_three_stride_two_blocks() {
        assert_eq!(MIN_INPUT_SIDE, 15);
    }

    #[test]
    fn inputs_below_minimum_side_are_rejected_without_panicking() {
        let device = CpuDevice::default();
        let classifier = BurnClassifier {
            model: DeepfakeNet::<CpuBackend>::new(&device),
            device,
        };
        let tiny = blank_input(8, 0.5);
        let err = classifier.predict(&tiny).unwrap_err();
        assert!(matches!(err, InferenceError::Shape { .. }), "{err}");

        let narrow = InputTensor::new([1, 224, MIN_INPUT_SIDE - 1, 3], vec![0.0; 224 * 14 * 3])
            .unwrap();
        assert!(classifier.predict(&narrow).is_err());

        let smallest = blank_input(MIN_INPUT_SIDE, 0.5);
        let scores = classifier.predict(&smallest).unwrap();
        assert_eq!(scores.len(), 1);
    }

    #[test]
    fn non_mpk_path_is_rejected_instead_of_rewritten() {
        let dir = tempdir().unwrap();
        let keras = dir.path().join("df.keras");
        DeepfakeNet::<CpuBackend>::new(&CpuDevice::default())
            .save_file(dir.path().join("df.mpk"), &ModelRecorder::new())
            .unwrap();
        std::fs::write(&keras, b"keras").unwrap();

        let err = BurnModelLoader::default().load(&keras).err().unwrap();

        assert!(matches!(err, InferenceError::LoadModel { path, .. } if path == keras));
        assert!(has_model_extension(&dir.path().join("df.MPK")));
        assert!(!has_model_extension(&dir.path().join("df")));
    }

    #[test]
    fn wrong_channel_count_is_a_shape_error() {
        let device = CpuDevice::default();
        let classifier = BurnClassifier {
            model: DeepfakeNet::<CpuBackend>::new(&device),
            device,
        };
        let gray = InputTensor::new([1, 16, 16, 1], vec![0.0; 256]).unwrap();
        let err = classifier.predict(&gray).unwrap_err();
        assert!(matches!(err, InferenceError::Shape { .. }));
    }
}
