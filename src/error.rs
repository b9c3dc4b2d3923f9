use crate::session::SelectionId;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CompressionError {
    #[error("Invalid file type: {0}. Only image/* files can be compressed")]
    InvalidType(String),

    #[error("Failed to read file: {0}")]
    ReadFailure(#[source] std::io::Error),

    #[error("Failed to decode image: {0}")]
    DecodeFailure(String),

    #[error("Failed to encode image: {0}")]
    EncodeFailure(#[source] image::ImageError),

    #[error("Malformed data URL")]
    InvalidDataUrl,

    #[error("Selection {0} was superseded by a newer selection")]
    Superseded(SelectionId),

    #[error("Invalid quality value: {0}. Must be between 0.0 and 1.0")]
    InvalidQuality(f32),

    #[error("Invalid maximum width: {0}. Must be greater than zero")]
    InvalidMaxWidth(u32),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to create output directory: {0}")]
    DirectoryCreationFailed(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image processing error: {0}")]
    ImageProcessing(#[from] image::ImageError),
}

/// The failures that end a selection and leave the download disabled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    InvalidType,
    ReadFailure,
    DecodeFailure,
    EncodeFailure,
}

impl CompressionError {
    /// Which selection failure this error ends in, or `None` for errors that never come out
    /// of the read/decode/encode pipeline (configuration and download errors).
    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            CompressionError::InvalidType(_) => Some(FailureKind::InvalidType),
            CompressionError::ReadFailure(_)
            | CompressionError::FileNotFound(_)
            | CompressionError::Io(_) => Some(FailureKind::ReadFailure),
            CompressionError::DecodeFailure(_)
            | CompressionError::InvalidDataUrl
            | CompressionError::Superseded(_)
            | CompressionError::ImageProcessing(_) => Some(FailureKind::DecodeFailure),
            CompressionError::EncodeFailure(_) => Some(FailureKind::EncodeFailure),
            CompressionError::InvalidQuality(_)
            | CompressionError::InvalidMaxWidth(_)
            | CompressionError::UnsupportedFormat(_)
            | CompressionError::DirectoryCreationFailed(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, CompressionError>;
