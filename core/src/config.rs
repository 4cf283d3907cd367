/// Advisory encoder-selection preferences.
///
/// Only the bundled encoders are compiled in, so these are recorded and
/// reported but never change which library encodes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AdapterHints {
    /// Prefer a system-installed libwebp over the bundled one
    pub prefer_system_libwebp: bool,
    /// Prefer a system-installed libavif over the bundled encoder
    pub prefer_system_libavif: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscodeOptions {
    /// Output quality 0-100, higher is better. `None` uses `DEFAULT_QUALITY`.
    pub quality: Option<u8>,
    /// Prepended to every output file name
    pub output_prefix: Option<String>,
    /// Preserve source metadata where the encoder supports it
    pub include_metadata: bool,
    /// Encode WebP losslessly instead of lossy
    pub lossless: bool,
    /// AVIF effort 1-10 (1 = slowest/best, 10 = fastest/worst)
    pub avif_speed: u8,
    pub hints: AdapterHints,
}

impl TranscodeOptions {
    pub const DEFAULT_QUALITY: u8 = 90;
    pub const MAX_QUALITY: u8 = 100;
    pub const DEFAULT_AVIF_SPEED: u8 = 6;

    /// Quality handed to adapters: the configured value clamped to 0-100.
    pub fn effective_quality(&self) -> u8 {
        self.quality
            .unwrap_or(Self::DEFAULT_QUALITY)
            .min(Self::MAX_QUALITY)
    }

    /// Whether `quality` was set above the meaningful range.
    pub fn quality_out_of_range(&self) -> bool {
        self.quality.is_some_and(|q| q > Self::MAX_QUALITY)
    }
}

impl Default for TranscodeOptions {
    fn default() -> Self {
        Self {
            quality: Some(Self::DEFAULT_QUALITY),
            output_prefix: None,
            include_metadata: false,
            lossless: false,
            avif_speed: Self::DEFAULT_AVIF_SPEED,
            hints: AdapterHints::default(),
        }
    }
}
