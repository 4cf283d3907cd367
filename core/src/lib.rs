//! Transcoding pipeline: decode a JPEG/PNG/GIF once, re-encode it into every
//! configured target format (WebP, AVIF).

pub mod adapter;
pub mod cancel;
pub mod config;
pub mod error;
pub mod format;
pub mod transcoder;

pub use cancel::CancelToken;
pub use config::{AdapterHints, TranscodeOptions};
pub use error::{EncodeError, TranscodeError};
pub use format::{is_supported_input_format, ImageFormat};
pub use transcoder::{TranscodeOutcome, Transcoder, WrittenOutput};
