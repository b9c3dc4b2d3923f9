//! Utility functions for size reporting and terminal progress

use crate::constants::PROGRESS_SPINNER_TEMPLATE;
use indicatif::{ProgressBar, ProgressStyle};

/// Convert a byte count to kilobytes (1 KB = 1024 bytes)
pub fn bytes_to_kb(bytes: u64) -> f64 {
    bytes as f64 / 1024.0
}

/// Format a byte count as kilobytes with two decimals, without the unit
///
/// # Arguments
/// * `bytes` - Size in bytes
///
/// # Returns
/// * e.g. `"500.00"` for 512000 bytes
pub fn format_kb(bytes: u64) -> String {
    format!("{:.2}", bytes_to_kb(bytes))
}

/// Calculate compression ratio as a percentage
///
/// # Arguments
/// * `original_size` - Original file size in bytes
/// * `compressed_size` - Compressed file size in bytes
///
/// # Returns
/// * Compression ratio as percentage (positive means reduction, negative means increase)
pub fn calculate_compression_ratio(original_size: u64, compressed_size: u64) -> f64 {
    if original_size == 0 {
        return 0.0;
    }
    ((original_size as f64 - compressed_size as f64) / original_size as f64) * 100.0
}

/// Create a progress spinner with consistent styling
pub fn create_progress_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template(PROGRESS_SPINNER_TEMPLATE) {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb
}
