use crate::constants::{DEFAULT_MIME_TYPE, FALLBACK_FILE_NAME, IMAGE_MIME_PREFIX};
use crate::error::{CompressionError, Result};
use image::ImageFormat;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Where the bytes of a selected file come from
#[derive(Debug, Clone, PartialEq)]
pub enum FileSource {
    /// Read lazily by the decode stage
    Path(PathBuf),
    Memory(Vec<u8>),
}

/// A file handed over by the host: name, declared MIME type, size and a way to reach its bytes
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedFile {
    pub name: String,
    pub mime_type: String,
    pub size: u64,
    pub source: FileSource,
}

impl SelectedFile {
    pub fn from_bytes(
        name: impl Into<String>,
        mime_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            size: bytes.len() as u64,
            source: FileSource::Memory(bytes),
        }
    }

    /// Describes a file on disk the way a file picker would, without reading its contents.
    /// The MIME type is declared from the extension, not sniffed.
    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CompressionError::FileNotFound(path.to_path_buf()));
        }

        let size = fs::metadata(path)?.len();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(Self {
            name,
            mime_type: declared_mime_type(path).to_string(),
            size,
            source: FileSource::Path(path.to_path_buf()),
        })
    }

    pub fn is_image(&self) -> bool {
        is_image_mime(&self.mime_type)
    }

    /// File name with the final extension stripped, used to name the download
    pub fn base_name(&self) -> String {
        original_base_name(&self.name)
    }
}

/// MIME type a browser would declare for this path, based on its extension
pub fn declared_mime_type(path: &Path) -> &'static str {
    if let Ok(format) = ImageFormat::from_path(path) {
        return format.to_mime_type();
    }

    match path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
        .as_deref()
    {
        Some("txt") | Some("md") => "text/plain",
        Some("json") => "application/json",
        Some("pdf") => "application/pdf",
        Some("svg") => "image/svg+xml",
        _ => DEFAULT_MIME_TYPE,
    }
}

pub fn is_image_mime(mime_type: &str) -> bool {
    mime_type.starts_with(IMAGE_MIME_PREFIX)
}

/// Everything before the last `.`; falls back to `compressed-image` when that is empty
pub fn original_base_name(file_name: &str) -> String {
    match file_name.rfind('.') {
        Some(idx) if idx > 0 => file_name[..idx].to_string(),
        _ => FALLBACK_FILE_NAME.to_string(),
    }
}

/// Models the file-selection control's value.
///
/// A change only fires when the chosen file differs from the current value, so the host
/// must `click()` (which clears the value) before every choice for a re-selection of the
/// same file to be seen again.
#[derive(Debug, Default)]
pub struct FileInput {
    value: Option<String>,
}

impl FileInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn click(&mut self) {
        self.value = None;
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Returns the file if choosing it fires a change event
    pub fn choose(&mut self, file: SelectedFile) -> Option<SelectedFile> {
        let key = match &file.source {
            FileSource::Path(path) => path.to_string_lossy().into_owned(),
            FileSource::Memory(_) => file.name.clone(),
        };

        if self.value.as_deref() == Some(key.as_str()) {
            debug!("Selection of {:?} unchanged, no change event", key);
            return None;
        }

        self.value = Some(key);
        Some(file)
    }
}
