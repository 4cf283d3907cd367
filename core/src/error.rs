use std::path::PathBuf;
use thiserror::Error;

use crate::format::ImageFormat;

/// Failure inside a single encoder adapter.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("image encoder failed: {0}")]
    Image(#[from] image::ImageError),

    #[error("webp encoder failed: {0}")]
    Webp(String),

    #[error("failed to write encoded bytes: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure of one `Transcoder::execute` call.
#[derive(Debug, Error)]
pub enum TranscodeError {
    #[error("unsupported input format: {}", path.display())]
    UnsupportedFormat { path: PathBuf },

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write {format} output {}: {source}", path.display())]
    Write {
        path: PathBuf,
        format: ImageFormat,
        source: std::io::Error,
    },

    #[error("failed to decode image {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("failed to encode {} as {format}: {source}", path.display())]
    Encode {
        path: PathBuf,
        format: ImageFormat,
        source: EncodeError,
    },

    #[error("no input file set")]
    NoInput,

    #[error("cancelled before processing {}", path.display())]
    Cancelled { path: PathBuf },
}

impl TranscodeError {
    /// Filesystem-boundary failures (open/read/create/write).
    pub fn is_io(&self) -> bool {
        matches!(self, TranscodeError::Read { .. } | TranscodeError::Write { .. })
    }

    /// Target format the failure belongs to, if it happened during fan-out.
    pub fn format(&self) -> Option<ImageFormat> {
        match self {
            TranscodeError::Write { format, .. } | TranscodeError::Encode { format, .. } => Some(*format),
            _ => None,
        }
    }
}
