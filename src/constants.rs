/// Widest output the resize stage will ever produce, in pixels
pub const MAX_WIDTH: u32 = 1200;

/// JPEG quality factor on the 0.0 - 1.0 scale
pub const JPEG_QUALITY: f32 = 0.7;
pub const MIN_QUALITY: f32 = 0.0;
pub const MAX_QUALITY: f32 = 1.0;

/// Base name used when the selected file name has nothing before its last `.`
pub const FALLBACK_FILE_NAME: &str = "compressed-image";
pub const COMPRESSED_SUFFIX: &str = "_compressed";

pub const IMAGE_MIME_PREFIX: &str = "image/";
pub const DEFAULT_MIME_TYPE: &str = "application/octet-stream";
pub const DATA_URL_BASE64_MARKER: &str = ";base64,";

// Size surface text
pub const ORIGINAL_SIZE_LABEL: &str = "Original size:";
pub const COMPRESSED_SIZE_LABEL: &str = "Compressed size:";
pub const SIZE_SEPARATOR: &str = " | ";

// Common output message prefixes
pub const SUCCESS_PREFIX: &str = "✅";
pub const ERROR_PREFIX: &str = "❌";
pub const IMPORT_PREFIX: &str = "📥";
pub const DOWNLOAD_PREFIX: &str = "💾";
pub const INFO_PREFIX: &str = "📋";

pub const PROGRESS_SPINNER_TEMPLATE: &str = "{spinner:.green} {msg}";
