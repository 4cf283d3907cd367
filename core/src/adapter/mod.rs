pub mod avif;
pub mod webp;

use std::io::Write;

use image::DynamicImage;

use crate::config::TranscodeOptions;
use crate::error::EncodeError;
use crate::format::ImageFormat;

pub use self::avif::AvifAdapter;
pub use self::webp::WebpAdapter;

/// Format-specific encoder behind a uniform contract.
///
/// Adapters hold no state; one decoded image is shared read-only across every
/// adapter of a transcoder. Each adapter owns the mapping from the public
/// 0-100 quality (higher is better) onto its encoder's native scale.
pub trait EncoderAdapter: Send + Sync {
    fn format(&self) -> ImageFormat;

    /// Encode `image` and write the complete bitstream into `out`.
    fn write(
        &self,
        image: &DynamicImage,
        out: &mut dyn Write,
        options: &TranscodeOptions,
    ) -> Result<(), EncodeError>;
}
