use crate::config::{CompressorConfig, OutputFormat};
use crate::decode::{data_url_payload, encode_data_url, DecodedImage};
use crate::error::{CompressionError, Result};
use crate::utils::bytes_to_kb;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
use std::io::Cursor;
use tracing::{debug, info};

/// Output dimensions for a `width` x `height` source under a width cap.
///
/// Only ever shrinks. The height is scaled by `max_width / width` and rounded,
/// and never drops below one pixel.
pub fn target_dimensions(width: u32, height: u32, max_width: u32) -> (u32, u32) {
    if width <= max_width {
        return (width, height);
    }

    let scaled = (height as f64 * (max_width as f64 / width as f64)).round();
    (max_width, (scaled as u32).max(1))
}

/// The encoded artifact of one successful selection
#[derive(Debug, Clone, PartialEq)]
pub struct CompressedResult {
    pub data_url: String,
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub format: OutputFormat,
}

impl CompressedResult {
    /// Encoded size in kilobytes, measured on the decoded base64 payload
    pub fn size_kb(&self) -> f64 {
        bytes_to_kb(self.bytes.len() as u64)
    }
}

/// Off-screen drawing target, reused across selections.
///
/// Each draw clears and resizes it to the requested dimensions first.
#[derive(Debug, Default)]
pub struct RasterSurface {
    canvas: RgbaImage,
}

impl RasterSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.canvas.dimensions()
    }

    pub fn draw(&mut self, source: &DecodedImage, width: u32, height: u32) {
        if self.canvas.dimensions() == (width, height) {
            self.clear();
        } else {
            self.canvas = RgbaImage::new(width, height);
        }

        let src = source.as_image();
        let rendered = if src.width() == width && src.height() == height {
            src.to_rgba8()
        } else {
            debug!(
                "Resampling {}x{} -> {}x{}",
                src.width(),
                src.height(),
                width,
                height
            );
            src.resize_exact(width, height, FilterType::Lanczos3).to_rgba8()
        };

        image::imageops::overlay(&mut self.canvas, &rendered, 0, 0);
    }

    fn clear(&mut self) {
        for pixel in self.canvas.pixels_mut() {
            *pixel = Rgba([0, 0, 0, 0]);
        }
    }

    /// Serializes the surface to a data URL in the configured format
    pub fn to_data_url(&self, config: &CompressorConfig) -> Result<String> {
        let mut buf = Vec::new();

        match config.output_format {
            OutputFormat::Jpeg => {
                let flattened = flatten_onto_black(&self.canvas);
                let mut encoder = JpegEncoder::new_with_quality(&mut buf, config.encoder_quality());
                encoder
                    .encode_image(&flattened)
                    .map_err(CompressionError::EncodeFailure)?;
            }
            OutputFormat::Png => {
                self.canvas
                    .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
                    .map_err(CompressionError::EncodeFailure)?;
            }
        }

        Ok(encode_data_url(config.output_format.mime_type(), &buf))
    }
}

/// JPEG carries no alpha; transparent areas of the surface come out black
fn flatten_onto_black(canvas: &RgbaImage) -> RgbImage {
    RgbImage::from_fn(canvas.width(), canvas.height(), |x, y| {
        let Rgba([r, g, b, a]) = *canvas.get_pixel(x, y);
        let blend = |c: u8| ((c as u16 * a as u16 + 127) / 255) as u8;
        Rgb([blend(r), blend(g), blend(b)])
    })
}

/// Resize-and-re-encode stage: caps the width, renders onto `surface` and serializes it
pub fn compress_decoded(
    decoded: &DecodedImage,
    surface: &mut RasterSurface,
    config: &CompressorConfig,
) -> Result<CompressedResult> {
    let (width, height) = target_dimensions(decoded.width(), decoded.height(), config.max_width);

    surface.draw(decoded, width, height);
    let data_url = surface.to_data_url(config)?;
    let bytes = data_url_payload(&data_url)?;

    let result = CompressedResult {
        data_url,
        bytes,
        width,
        height,
        format: config.output_format,
    };

    info!(
        "Encoded {}x{} {} at quality {} ({:.2} KB)",
        width,
        height,
        config.output_format,
        config.quality,
        result.size_kb()
    );

    Ok(result)
}
