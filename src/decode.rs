use crate::constants::DATA_URL_BASE64_MARKER;
use crate::error::{CompressionError, Result};
use crate::input::{FileSource, SelectedFile};
use crate::session::SelectionId;
use base64::prelude::*;
use image::{DynamicImage, GenericImageView};
use tokio::sync::watch;
use tracing::{debug, info};

/// Pixel raster produced by the decode stage. Never mutated after creation.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    image: DynamicImage,
}

impl DecodedImage {
    pub fn new(image: DynamicImage) -> Self {
        Self { image }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    pub fn as_image(&self) -> &DynamicImage {
        &self.image
    }
}

/// Work handed out by a selection; resolved by [`decode_selection`]
#[derive(Debug)]
pub struct PendingDecode {
    pub selection: SelectionId,
    pub file: SelectedFile,
    current: watch::Receiver<SelectionId>,
}

impl PendingDecode {
    pub(crate) fn new(
        selection: SelectionId,
        file: SelectedFile,
        current: watch::Receiver<SelectionId>,
    ) -> Self {
        Self {
            selection,
            file,
            current,
        }
    }

    /// True once a newer selection has been published
    pub fn is_superseded(&self) -> bool {
        *self.current.borrow() != self.selection
    }
}

#[derive(Debug)]
pub struct DecodeCompletion {
    pub selection: SelectionId,
    pub outcome: Result<DecodedImage>,
}

pub fn encode_data_url(mime_type: &str, bytes: &[u8]) -> String {
    format!(
        "data:{}{}{}",
        mime_type,
        DATA_URL_BASE64_MARKER,
        BASE64_STANDARD.encode(bytes)
    )
}

/// Decoded payload of a `data:<mime>;base64,<payload>` URL
pub fn data_url_payload(data_url: &str) -> Result<Vec<u8>> {
    let rest = data_url
        .strip_prefix("data:")
        .ok_or(CompressionError::InvalidDataUrl)?;
    let (_, payload) = rest
        .split_once(DATA_URL_BASE64_MARKER)
        .ok_or(CompressionError::InvalidDataUrl)?;

    BASE64_STANDARD
        .decode(payload)
        .map_err(|_| CompressionError::InvalidDataUrl)
}

/// Reads the whole file into a data URL carrying its declared MIME type
pub async fn read_as_data_url(file: &SelectedFile) -> Result<String> {
    let bytes = match &file.source {
        FileSource::Path(path) => tokio::fs::read(path)
            .await
            .map_err(CompressionError::ReadFailure)?,
        FileSource::Memory(bytes) => bytes.clone(),
    };

    debug!("Read {} bytes from {:?}", bytes.len(), file.name);
    Ok(encode_data_url(&file.mime_type, &bytes))
}

/// Interprets a data URL as an image. Any failure here is a decode failure.
pub fn decode_data_url(data_url: &str) -> Result<DecodedImage> {
    let bytes = data_url_payload(data_url)?;
    let image = image::load_from_memory(&bytes)
        .map_err(|e| CompressionError::DecodeFailure(e.to_string()))?;

    Ok(DecodedImage::new(image))
}

/// Reads and decodes a pending selection off the caller's thread.
///
/// Resolves early with `Superseded` as soon as a newer selection is published.
pub async fn decode_selection(mut pending: PendingDecode) -> DecodeCompletion {
    let selection = pending.selection;
    let file = pending.file.clone();

    let work = async move {
        let data_url = read_as_data_url(&file).await?;
        tokio::task::spawn_blocking(move || decode_data_url(&data_url))
            .await
            .map_err(|e| CompressionError::DecodeFailure(e.to_string()))?
    };

    let outcome = tokio::select! {
        outcome = work => outcome,
        _ = wait_until_superseded(&mut pending) => Err(CompressionError::Superseded(selection)),
    };

    match &outcome {
        Ok(image) => info!(
            "Decoded selection {} as {}x{}",
            selection,
            image.width(),
            image.height()
        ),
        Err(e) => debug!("Selection {} did not decode: {}", selection, e),
    }

    DecodeCompletion { selection, outcome }
}

async fn wait_until_superseded(pending: &mut PendingDecode) {
    while !pending.is_superseded() {
        if pending.current.changed().await.is_err() {
            // The session is gone; nobody is waiting for this result.
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, RgbImage};
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = DynamicImage::ImageRgb8(RgbImage::new(width, height));
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, ImageFormat::Png).unwrap();
        buf.into_inner()
    }

    #[test]
    fn test_data_url_round_trip_payload() {
        let url = encode_data_url("image/png", b"abc");
        assert_eq!(url, "data:image/png;base64,YWJj");
        assert_eq!(data_url_payload(&url).unwrap(), b"abc");
    }

    #[test]
    fn test_data_url_payload_malformed() {
        assert!(matches!(
            data_url_payload("image/png;base64,YWJj"),
            Err(CompressionError::InvalidDataUrl)
        ));
        assert!(matches!(
            data_url_payload("data:image/png,raw"),
            Err(CompressionError::InvalidDataUrl)
        ));
    }

    #[test]
    fn test_decode_data_url() {
        let url = encode_data_url("image/png", &png_bytes(40, 30));
        let decoded = decode_data_url(&url).unwrap();
        assert_eq!(decoded.dimensions(), (40, 30));
    }

    #[test]
    fn test_decode_data_url_garbage() {
        let url = encode_data_url("image/png", b"definitely not a png");
        let result = decode_data_url(&url);
        assert!(matches!(result, Err(CompressionError::DecodeFailure(_))));
    }

    #[tokio::test]
    async fn test_read_as_data_url_missing_file() {
        let file = SelectedFile {
            name: "gone.png".to_string(),
            mime_type: "image/png".to_string(),
            size: 0,
            source: FileSource::Path("/nonexistent/gone.png".into()),
        };
        let result = read_as_data_url(&file).await;
        assert!(matches!(result, Err(CompressionError::ReadFailure(_))));
    }

    #[tokio::test]
    async fn test_decode_selection_success() {
        let (_tx, rx) = watch::channel(SelectionId(1));
        let file = SelectedFile::from_bytes("a.png", "image/png", png_bytes(8, 4));
        let completion = decode_selection(PendingDecode::new(SelectionId(1), file, rx)).await;

        assert_eq!(completion.selection, SelectionId(1));
        assert_eq!(completion.outcome.unwrap().dimensions(), (8, 4));
    }

    #[tokio::test]
    async fn test_decode_selection_already_superseded() {
        let (tx, rx) = watch::channel(SelectionId(1));
        tx.send(SelectionId(2)).unwrap();

        let file = SelectedFile::from_bytes("a.png", "image/png", png_bytes(8, 4));
        let pending = PendingDecode::new(SelectionId(1), file, rx);
        assert!(pending.is_superseded());
    }
}
