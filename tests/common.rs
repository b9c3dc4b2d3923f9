#![allow(dead_code)]

use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub fn create_temp_directory() -> TempDir {
    TempDir::new().unwrap()
}

/// Writes a real, decodable image with a simple gradient so the encoder has work to do
pub fn create_test_image(
    dir: &Path,
    name: &str,
    width: u32,
    height: u32,
    format: ImageFormat,
) -> PathBuf {
    let path = dir.join(name);
    let img = RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
    });
    DynamicImage::ImageRgb8(img)
        .save_with_format(&path, format)
        .unwrap();
    path
}

pub fn create_text_file(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, "not an image").unwrap();
    path
}

/// A file whose extension claims an image but whose bytes are not one
pub fn create_fake_image(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, b"fake image data").unwrap();
    path
}
