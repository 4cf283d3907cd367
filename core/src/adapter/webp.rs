use std::io::Write;

use image::{DynamicImage, GenericImageView};

use crate::adapter::EncoderAdapter;
use crate::config::TranscodeOptions;
use crate::error::EncodeError;
use crate::format::ImageFormat;

/// WebP output through the bundled libwebp.
pub struct WebpAdapter;

impl WebpAdapter {
    /// libwebp quality runs 0-100 in the same direction as the public option.
    pub fn native_quality(options: &TranscodeOptions) -> f32 {
        f32::from(options.effective_quality())
    }
}

impl EncoderAdapter for WebpAdapter {
    fn format(&self) -> ImageFormat {
        ImageFormat::Webp
    }

    fn write(
        &self,
        image: &DynamicImage,
        out: &mut dyn Write,
        options: &TranscodeOptions,
    ) -> Result<(), EncodeError> {
        let (width, height) = image.dimensions();
        let quality = Self::native_quality(options);

        if options.include_metadata {
            log::debug!("WebP adapter does not carry source metadata; writing pixels only");
        }

        // Sources without alpha are encoded as RGB so no alpha plane is emitted.
        let encoded = if image.color().has_alpha() {
            let rgba = image.to_rgba8();
            webp::Encoder::from_rgba(rgba.as_raw(), width, height)
                .encode_simple(options.lossless, quality)
        } else {
            let rgb = image.to_rgb8();
            webp::Encoder::from_rgb(rgb.as_raw(), width, height)
                .encode_simple(options.lossless, quality)
        }
        .map_err(|e| EncodeError::Webp(format!("{:?}", e)))?;

        log::debug!(
            "WebP encoded {}x{} at quality {} (lossless: {}): {} bytes",
            width,
            height,
            quality,
            options.lossless,
            encoded.len()
        );

        out.write_all(&encoded)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::testing::{noisy_rgb, noisy_rgba};

    fn encode(image: &DynamicImage, options: &TranscodeOptions) -> Vec<u8> {
        let mut out = Vec::new();
        WebpAdapter.write(image, &mut out, options).unwrap();
        out
    }

    #[test]
    fn test_output_is_riff_webp() {
        let out = encode(&noisy_rgb(32, 24), &TranscodeOptions::default());
        assert!(out.len() > 12);
        assert_eq!(&out[0..4], b"RIFF");
        assert_eq!(&out[8..12], b"WEBP");

        let decoded = image::load_from_memory_with_format(&out, image::ImageFormat::WebP).unwrap();
        assert_eq!(decoded.dimensions(), (32, 24));
    }

    #[test]
    fn test_higher_quality_gives_larger_output() {
        let img = noisy_rgb(64, 64);
        let high = encode(&img, &TranscodeOptions { quality: Some(90), ..Default::default() });
        let low = encode(&img, &TranscodeOptions { quality: Some(10), ..Default::default() });
        assert!(high.len() > low.len(), "q90 = {} bytes, q10 = {} bytes", high.len(), low.len());
    }

    #[test]
    fn test_lossless_preserves_pixels() {
        let img = noisy_rgba(16, 16);
        let opts = TranscodeOptions { lossless: true, ..Default::default() };
        let out = encode(&img, &opts);

        let decoded = image::load_from_memory_with_format(&out, image::ImageFormat::WebP).unwrap();
        assert_eq!(decoded.to_rgba8().as_raw(), img.to_rgba8().as_raw());
    }

    #[test]
    fn test_native_quality_is_direct() {
        let opts = TranscodeOptions { quality: Some(37), ..Default::default() };
        assert_eq!(WebpAdapter::native_quality(&opts), 37.0);
    }
}
