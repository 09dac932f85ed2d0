use std::path::{Path, PathBuf};

use image::{Rgb, RgbImage};

/// Write a solid-colour PNG and return its path.
pub fn write_test_png(dir: &Path, name: &str, width: u32, height: u32, color: [u8; 3]) -> PathBuf {
    let path = dir.join(name);
    RgbImage::from_pixel(width, height, Rgb(color))
        .save(&path)
        .expect("write test png");
    path
}
