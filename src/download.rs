use crate::config::OutputFormat;
use crate::constants::COMPRESSED_SUFFIX;
use crate::error::{CompressionError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// `{base}_compressed.{ext}`, e.g. `holiday_compressed.jpeg`
pub fn download_file_name(base_name: &str, format: OutputFormat) -> String {
    format!("{}{}.{}", base_name, COMPRESSED_SUFFIX, format.extension())
}

/// Host side of the download: takes the encoded bytes under a suggested file name
pub trait SaveTarget {
    fn save(&mut self, file_name: &str, bytes: &[u8]) -> Result<PathBuf>;
}

/// Saves downloads into a directory, creating it on first use
#[derive(Debug, Clone)]
pub struct DirectoryTarget {
    dir: PathBuf,
}

impl DirectoryTarget {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl SaveTarget for DirectoryTarget {
    fn save(&mut self, file_name: &str, bytes: &[u8]) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)
            .map_err(|_| CompressionError::DirectoryCreationFailed(self.dir.clone()))?;

        let path = self.dir.join(file_name);
        fs::write(&path, bytes)?;
        info!("Saved {} bytes to {:?}", bytes.len(), path);
        Ok(path)
    }
}
