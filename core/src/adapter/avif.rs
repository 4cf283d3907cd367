use std::io::Write;

use image::codecs::avif::AvifEncoder;
use image::{DynamicImage, ExtendedColorType, GenericImageView, ImageEncoder};

use crate::adapter::EncoderAdapter;
use crate::config::TranscodeOptions;
use crate::error::EncodeError;
use crate::format::ImageFormat;

/// AVIF output through the pure-Rust ravif/rav1e encoder bundled with `image`.
pub struct AvifAdapter;

impl AvifAdapter {
    /// Lowest quality the encoder accepts.
    const MIN_NATIVE_QUALITY: u8 = 1;

    /// Map public quality onto the encoder's scale.
    ///
    /// The public option and ravif both treat 100 as best, so equal settings
    /// give comparable fidelity across WebP and AVIF. ravif has no 0, which is
    /// raised to its floor. An encoder that counts down from 0 = best (such as
    /// libavif's quantizer) would need `100 - quality` here instead.
    pub fn native_quality(options: &TranscodeOptions) -> u8 {
        options.effective_quality().max(Self::MIN_NATIVE_QUALITY)
    }

    pub fn native_speed(options: &TranscodeOptions) -> u8 {
        options.avif_speed.clamp(1, 10)
    }
}

impl EncoderAdapter for AvifAdapter {
    fn format(&self) -> ImageFormat {
        ImageFormat::Avif
    }

    fn write(
        &self,
        image: &DynamicImage,
        out: &mut dyn Write,
        options: &TranscodeOptions,
    ) -> Result<(), EncodeError> {
        let (width, height) = image.dimensions();
        let quality = Self::native_quality(options);
        let speed = Self::native_speed(options);

        if options.include_metadata {
            log::debug!("AVIF adapter does not carry source metadata; writing pixels only");
        }
        if options.lossless {
            log::debug!("AVIF has no lossless mode here; encoding lossy at quality {}", quality);
        }

        let encoder = AvifEncoder::new_with_speed_quality(out, speed, quality);
        if image.color().has_alpha() {
            let rgba = image.to_rgba8();
            encoder.write_image(rgba.as_raw(), width, height, ExtendedColorType::Rgba8)?;
        } else {
            let rgb = image.to_rgb8();
            encoder.write_image(rgb.as_raw(), width, height, ExtendedColorType::Rgb8)?;
        }

        log::debug!("AVIF encoded {}x{} at quality {}, speed {}", width, height, quality, speed);
        Ok(())
    }
}
