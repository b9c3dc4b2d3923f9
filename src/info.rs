use crate::config::CompressorConfig;
use crate::download::download_file_name;
use crate::encode::target_dimensions;
use crate::error::{CompressionError, Result};
use crate::input::SelectedFile;
use crate::utils::format_kb;
use image::ImageReader;
use std::path::Path;

/// What compressing a file would do, gathered without decoding its pixels
#[derive(Debug, Clone, PartialEq)]
pub struct ImageInfo {
    pub file_name: String,
    pub mime_type: String,
    pub size: u64,
    pub detected_format: Option<image::ImageFormat>,
    pub dimensions: (u32, u32),
    pub output_dimensions: (u32, u32),
    pub download_name: String,
}

impl ImageInfo {
    pub fn aspect_ratio(&self) -> f64 {
        let (width, height) = self.dimensions;
        if height == 0 {
            return 0.0;
        }
        width as f64 / height as f64
    }

    pub fn will_resize(&self) -> bool {
        self.dimensions != self.output_dimensions
    }
}

pub fn get_image_info(input_path: &Path, config: &CompressorConfig) -> Result<ImageInfo> {
    let file = SelectedFile::from_path(input_path)?;
    if !file.is_image() {
        return Err(CompressionError::InvalidType(file.mime_type));
    }

    let reader = ImageReader::open(input_path)?.with_guessed_format()?;
    let detected_format = reader.format();
    let (width, height) = reader
        .into_dimensions()
        .map_err(|e| CompressionError::DecodeFailure(e.to_string()))?;

    Ok(ImageInfo {
        download_name: download_file_name(&file.base_name(), config.output_format),
        file_name: file.name,
        mime_type: file.mime_type,
        size: file.size,
        detected_format,
        dimensions: (width, height),
        output_dimensions: target_dimensions(width, height, config.max_width),
    })
}

pub fn print_image_info(info: &ImageInfo, config: &CompressorConfig) {
    let (width, height) = info.dimensions;
    let (out_width, out_height) = info.output_dimensions;

    println!("📋 Basic Information:");
    println!("  📁 File: {}", info.file_name);
    println!("  🏷️  Declared type: {}", info.mime_type);
    println!("  🎭 Detected format: {:?}", info.detected_format);
    println!("  📏 Dimensions: {}x{} pixels", width, height);
    println!("  📊 Size: {} KB", format_kb(info.size));
    println!("  📐 Aspect ratio: {:.2}:1", info.aspect_ratio());

    println!("\n💡 Compression Plan:");
    if info.will_resize() {
        println!(
            "  📏 Wider than {} px: resize to {}x{}",
            config.max_width, out_width, out_height
        );
    } else {
        println!("  📏 Within {} px: keep {}x{}", config.max_width, out_width, out_height);
    }
    println!(
        "  🎯 Re-encode as {} at quality {}",
        config.output_format, config.quality
    );
    println!("  💾 Download name: {}", info.download_name);
}
