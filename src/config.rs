//! Compression settings and type-safe output format handling
//!
//! The width cap, quality factor and output format are grouped here instead of being
//! scattered across the pipeline. The defaults reproduce the fixed behaviour: 1200 px,
//! quality 0.7, JPEG output.

use crate::constants::{JPEG_QUALITY, MAX_QUALITY, MAX_WIDTH, MIN_QUALITY};
use crate::error::{CompressionError, Result};
use image::ImageFormat;
use std::fmt;
use std::str::FromStr;

/// Formats the encode stage can serialize the raster surface to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Lossy, honours the quality factor
    #[default]
    Jpeg,
    /// Lossless, the quality factor is ignored
    Png,
}

impl OutputFormat {
    /// Extension used for the downloaded file
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "jpeg",
            OutputFormat::Png => "png",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "image/jpeg",
            OutputFormat::Png => "image/png",
        }
    }

    /// Convert to the image crate's ImageFormat
    pub fn to_image_format(&self) -> ImageFormat {
        match self {
            OutputFormat::Jpeg => ImageFormat::Jpeg,
            OutputFormat::Png => ImageFormat::Png,
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Jpeg => "JPEG",
            OutputFormat::Png => "PNG",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for OutputFormat {
    type Err = CompressionError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "jpeg" | "jpg" | "image/jpeg" => Ok(OutputFormat::Jpeg),
            "png" | "image/png" => Ok(OutputFormat::Png),
            _ => Err(CompressionError::UnsupportedFormat(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompressorConfig {
    pub max_width: u32,
    pub quality: f32,
    pub output_format: OutputFormat,
}

impl Default for CompressorConfig {
    fn default() -> Self {
        Self {
            max_width: MAX_WIDTH,
            quality: JPEG_QUALITY,
            output_format: OutputFormat::Jpeg,
        }
    }
}

impl CompressorConfig {
    pub fn new(
        max_width: Option<u32>,
        quality: Option<f32>,
        output_format: Option<OutputFormat>,
    ) -> Result<Self> {
        let max_width = max_width.unwrap_or(MAX_WIDTH);
        if max_width == 0 {
            return Err(CompressionError::InvalidMaxWidth(max_width));
        }

        let quality = quality.unwrap_or(JPEG_QUALITY);
        if !(MIN_QUALITY..=MAX_QUALITY).contains(&quality) {
            return Err(CompressionError::InvalidQuality(quality));
        }

        Ok(Self {
            max_width,
            quality,
            output_format: output_format.unwrap_or_default(),
        })
    }

    /// Quality factor on the encoder's 1-100 scale
    pub fn encoder_quality(&self) -> u8 {
        (self.quality * 100.0).round().clamp(1.0, 100.0) as u8
    }
}
