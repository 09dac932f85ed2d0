//! Turn an image file into the model's input tensor.

use std::path::Path;

use image::{DynamicImage, imageops::FilterType};

use super::{INPUT_CHANNELS, InferenceError, InputTensor};

/// Decode `path` and convert it with [`image_to_input`].
pub fn load_input(path: &Path, side: u32, pixel_scale: f32) -> Result<InputTensor, InferenceError> {
    let image = image::open(path).map_err(|source| InferenceError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(
        path = %path.display(),
        width = image.width(),
        height = image.height(),
        "Decoded image for prediction"
    );
    image_to_input(&image, side, pixel_scale)
}

/// Resize to `side`×`side` RGB, ignoring aspect ratio, and scale each channel by
/// `1 / pixel_scale`. The result carries a leading batch dimension of 1.
///
/// Nearest-neighbour sampling matches how the weights were trained.
pub fn image_to_input(
    image: &DynamicImage,
    side: u32,
    pixel_scale: f32,
) -> Result<InputTensor, InferenceError> {
    let rgb = image::imageops::resize(&image.to_rgb8(), side, side, FilterType::Nearest);
    let data = rgb
        .into_raw()
        .into_iter()
        .map(|value| f32::from(value) / pixel_scale)
        .collect();
    let side = side as usize;
    InputTensor::new([1, side, side, INPUT_CHANNELS], data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage, Rgba, RgbaImage};
    use tempfile::tempdir;

    #[test]
    fn output_is_batched_square_and_unit_scaled() {
        let mut source = RgbImage::from_pixel(300, 120, Rgb([0, 0, 0]));
        for y in 0..10 {
            for x in 0..10 {
                source.put_pixel(x, y, Rgb([255, 255, 255]));
            }
        }
        let input = image_to_input(&DynamicImage::ImageRgb8(source), 224, 255.0).unwrap();

        assert_eq!(input.shape(), [1, 224, 224, 3]);
        assert_eq!(input.data().len(), 224 * 224 * 3);
        assert!(input.data().iter().all(|v| (0.0..=1.0).contains(v)));
        assert_eq!(&input.data()[..3], &[1.0, 1.0, 1.0]);
        assert_eq!(input.data()[input.data().len() - 1], 0.0);
    }

    #[test]
    fn alpha_channel_is_dropped() {
        let source = RgbaImage::from_pixel(8, 8, Rgba([51, 102, 255, 0]));
        let input = image_to_input(&DynamicImage::ImageRgba8(source), 4, 255.0).unwrap();
        assert_eq!(input.shape(), [1, 4, 4, 3]);
        assert_eq!(&input.data()[..3], &[0.2, 0.4, 1.0]);
    }

    #[test]
    fn load_input_reports_undecodable_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"not a png").unwrap();
        let err = load_input(&path, 224, 255.0).unwrap_err();
        assert!(matches!(err, InferenceError::Decode { .. }));
    }

    #[test]
    fn load_input_reads_png_from_disk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("grey.png");
        RgbImage::from_pixel(10, 20, Rgb([128, 128, 128]))
            .save(&path)
            .unwrap();
        let input = load_input(&path, 224, 255.0).unwrap();
        assert_eq!(input.shape(), [1, 224, 224, 3]);
        assert!((input.data()[0] - 128.0 / 255.0).abs() < 1e-6);
    }
}
