use crate::constants::{DOWNLOAD_PREFIX, ERROR_PREFIX, IMPORT_PREFIX, SUCCESS_PREFIX};
use crate::error::FailureKind;
use std::fmt;

/// What the status surface currently shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Idle,
    Compressing,
    InvalidType,
    ReadError,
    DecodeError,
    EncodeError,
    Complete,
    DownloadStarted,
}

impl Status {
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            Status::InvalidType | Status::ReadError | Status::DecodeError | Status::EncodeError
        )
    }
}

impl From<FailureKind> for Status {
    fn from(kind: FailureKind) -> Self {
        match kind {
            FailureKind::InvalidType => Status::InvalidType,
            FailureKind::ReadFailure => Status::ReadError,
            FailureKind::DecodeFailure => Status::DecodeError,
            FailureKind::EncodeFailure => Status::EncodeError,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Idle => Ok(()),
            Status::Compressing => write!(f, "{} Image imported, compressing...", IMPORT_PREFIX),
            Status::InvalidType => write!(f, "{} Please select a valid image file.", ERROR_PREFIX),
            Status::ReadError => write!(f, "{} Failed to read the file.", ERROR_PREFIX),
            Status::DecodeError => write!(f, "{} Failed to load the image.", ERROR_PREFIX),
            Status::EncodeError => write!(f, "{} Failed to compress the image.", ERROR_PREFIX),
            Status::Complete => write!(f, "{} Image compression complete!", SUCCESS_PREFIX),
            Status::DownloadStarted => write!(f, "{} Download started.", DOWNLOAD_PREFIX),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_messages_distinct() {
        let all = [
            Status::Compressing,
            Status::InvalidType,
            Status::ReadError,
            Status::DecodeError,
            Status::EncodeError,
            Status::Complete,
            Status::DownloadStarted,
        ];
        let texts: std::collections::HashSet<String> = all.iter().map(|s| s.to_string()).collect();
        assert_eq!(texts.len(), all.len());
        assert_eq!(Status::Idle.to_string(), "");
    }

    #[test]
    fn test_status_from_failure_kind() {
        assert_eq!(Status::from(FailureKind::InvalidType), Status::InvalidType);
        assert_eq!(Status::from(FailureKind::ReadFailure), Status::ReadError);
        assert_eq!(Status::from(FailureKind::DecodeFailure), Status::DecodeError);
        assert!(Status::from(FailureKind::EncodeFailure).is_error());
        assert!(!Status::Complete.is_error());
    }
}
