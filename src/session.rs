//! Selection lifecycle as an explicit state machine.
//!
//! A [`Session`] owns the only mutable state of the pipeline: the current
//! [`SessionState`], the status and size surfaces, and the reused raster surface.
//! Decoding runs outside the session (see [`crate::decode::decode_selection`]); its
//! completion is applied back with [`Session::finish_decode`], which drops anything
//! belonging to a superseded selection.

use crate::config::CompressorConfig;
use crate::constants::{COMPRESSED_SIZE_LABEL, ORIGINAL_SIZE_LABEL, SIZE_SEPARATOR};
use crate::decode::{decode_selection, DecodeCompletion, PendingDecode};
use crate::download::{download_file_name, SaveTarget};
use crate::encode::{compress_decoded, CompressedResult, RasterSurface};
use crate::error::{FailureKind, Result};
use crate::input::SelectedFile;
use crate::status::Status;
use crate::utils::format_kb;
use std::fmt;
use std::path::PathBuf;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Identity of one file selection; strictly increasing within a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct SelectionId(pub u64);

impl SelectionId {
    fn next(self) -> Self {
        SelectionId(self.0 + 1)
    }
}

impl fmt::Display for SelectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    AwaitingDecode {
        selection: SelectionId,
    },
    Ready {
        selection: SelectionId,
        result: CompressedResult,
    },
    Error {
        kind: FailureKind,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// A file passed the type check and its decode was started
    Selected(SelectionId),
    /// A file was turned away before any decode
    Rejected(FailureKind),
    Compressed(SelectionId, CompressedResult),
    Failed(SelectionId, FailureKind),
}

impl SessionState {
    /// Completions only land on the selection currently awaited; anything else is stale.
    pub fn transition(self, event: Event) -> SessionState {
        match (self, event) {
            (_, Event::Selected(selection)) => SessionState::AwaitingDecode { selection },
            (_, Event::Rejected(kind)) => SessionState::Error { kind },
            (SessionState::AwaitingDecode { selection }, Event::Compressed(id, result))
                if selection == id =>
            {
                SessionState::Ready { selection, result }
            }
            (SessionState::AwaitingDecode { selection }, Event::Failed(id, kind))
                if selection == id =>
            {
                SessionState::Error { kind }
            }
            (state, _) => state,
        }
    }

    pub fn awaiting(&self) -> Option<SelectionId> {
        match self {
            SessionState::AwaitingDecode { selection } => Some(*selection),
            _ => None,
        }
    }

    pub fn compressed(&self) -> Option<&CompressedResult> {
        match self {
            SessionState::Ready { result, .. } => Some(result),
            _ => None,
        }
    }

    pub fn download_enabled(&self) -> bool {
        matches!(self, SessionState::Ready { .. })
    }
}

#[derive(Debug)]
pub struct Session {
    config: CompressorConfig,
    state: SessionState,
    status: Status,
    size_info: String,
    original_file_name: String,
    last_selection: SelectionId,
    current: watch::Sender<SelectionId>,
    surface: RasterSurface,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(CompressorConfig::default())
    }
}

impl Session {
    pub fn new(config: CompressorConfig) -> Self {
        let (current, _) = watch::channel(SelectionId::default());
        Self {
            config,
            state: SessionState::Idle,
            status: Status::Idle,
            size_info: String::new(),
            original_file_name: String::new(),
            last_selection: SelectionId::default(),
            current,
            surface: RasterSurface::new(),
        }
    }

    pub fn config(&self) -> &CompressorConfig {
        &self.config
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn size_info(&self) -> &str {
        &self.size_info
    }

    pub fn original_file_name(&self) -> &str {
        &self.original_file_name
    }

    pub fn download_enabled(&self) -> bool {
        self.state.download_enabled()
    }

    pub fn compressed(&self) -> Option<&CompressedResult> {
        self.state.compressed()
    }

    /// Name the next download would be saved under, if one is available
    pub fn download_name(&self) -> Option<String> {
        self.compressed()
            .map(|result| download_file_name(&self.original_file_name, result.format))
    }

    pub fn surface(&self) -> &RasterSurface {
        &self.surface
    }

    fn apply(&mut self, event: Event) {
        let state = std::mem::take(&mut self.state);
        self.state = state.transition(event);
    }

    /// Handles a file-selection change.
    ///
    /// Clears any previous result before anything else, so a stale result can never be
    /// downloaded while the new decode is in flight. Returns the decode to run, or `None`
    /// when the file is rejected by its declared type.
    pub fn select(&mut self, file: SelectedFile) -> Option<PendingDecode> {
        let selection = self.last_selection.next();
        self.last_selection = selection;
        self.current.send_replace(selection);

        self.original_file_name = file.base_name();
        self.status = Status::Compressing;
        self.size_info = format!("{} {} KB", ORIGINAL_SIZE_LABEL, format_kb(file.size));

        if !file.is_image() {
            warn!(
                "Rejected {:?}: declared type {:?} is not an image",
                file.name, file.mime_type
            );
            self.apply(Event::Rejected(FailureKind::InvalidType));
            self.status = Status::InvalidType;
            return None;
        }

        info!(
            "Selection {}: {:?} ({}, {} bytes)",
            selection, file.name, file.mime_type, file.size
        );
        self.apply(Event::Selected(selection));
        Some(PendingDecode::new(selection, file, self.current.subscribe()))
    }

    /// Applies a decode completion; returns false when it belonged to a superseded selection
    pub fn finish_decode(&mut self, completion: DecodeCompletion) -> bool {
        let selection = completion.selection;
        if self.state.awaiting() != Some(selection) {
            debug!("Dropping stale completion for selection {}", selection);
            return false;
        }

        let outcome = completion
            .outcome
            .and_then(|decoded| compress_decoded(&decoded, &mut self.surface, &self.config));

        let event = match outcome {
            Ok(result) => {
                self.size_info.push_str(&format!(
                    "{}{} {:.2} KB",
                    SIZE_SEPARATOR,
                    COMPRESSED_SIZE_LABEL,
                    result.size_kb()
                ));
                self.status = Status::Complete;
                Event::Compressed(selection, result)
            }
            Err(e) => {
                warn!("Selection {} failed: {}", selection, e);
                // Read, decode and encode errors all carry a kind.
                let kind = e.failure_kind().unwrap_or(FailureKind::DecodeFailure);
                self.status = Status::from(kind);
                Event::Failed(selection, kind)
            }
        };

        self.apply(event);
        true
    }

    /// Selects, decodes and compresses one file
    pub async fn run(&mut self, file: SelectedFile) -> &SessionState {
        if let Some(pending) = self.select(file) {
            let completion = decode_selection(pending).await;
            self.finish_decode(completion);
        }
        &self.state
    }

    /// Hands the current result to `target`. A no-op without a result; the result stays
    /// available so the same file can be downloaded again.
    pub fn download<S: SaveTarget>(&mut self, target: &mut S) -> Result<Option<PathBuf>> {
        let Some(result) = self.state.compressed() else {
            debug!("Download requested with nothing to download");
            return Ok(None);
        };

        let file_name = download_file_name(&self.original_file_name, result.format);
        let path = target.save(&file_name, &result.bytes)?;
        self.status = Status::DownloadStarted;
        Ok(Some(path))
    }
}
