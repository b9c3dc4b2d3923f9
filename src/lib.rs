pub mod cli;
pub mod config;
pub mod constants;
pub mod decode;
pub mod download;
pub mod encode;
pub mod error;
pub mod info;
pub mod input;
pub mod logger;
pub mod session;
pub mod status;
pub mod utils;

pub use config::{CompressorConfig, OutputFormat};
pub use decode::{decode_selection, DecodeCompletion, DecodedImage, PendingDecode};
pub use download::{download_file_name, DirectoryTarget, SaveTarget};
pub use encode::{compress_decoded, target_dimensions, CompressedResult, RasterSurface};
pub use error::{CompressionError, FailureKind, Result};
pub use info::{get_image_info, print_image_info, ImageInfo};
pub use input::{original_base_name, FileInput, SelectedFile};
pub use session::{Event, SelectionId, Session, SessionState};
pub use status::Status;
