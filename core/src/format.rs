use std::fmt;
use std::str::FromStr;

use crate::adapter::{AvifAdapter, EncoderAdapter, WebpAdapter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ImageFormat {
    Jpeg,
    Png,
    Gif,
    Webp,
    Avif,
}

impl ImageFormat {
    /// Formats accepted as transcoder input.
    pub const INPUTS: [ImageFormat; 3] = [ImageFormat::Jpeg, ImageFormat::Png, ImageFormat::Gif];

    /// Formats the transcoder can produce.
    pub const OUTPUTS: [ImageFormat; 2] = [ImageFormat::Webp, ImageFormat::Avif];

    /// Look up a format by file extension (without the dot), case-insensitive.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Some(ImageFormat::Jpeg),
            "png" => Some(ImageFormat::Png),
            "gif" => Some(ImageFormat::Gif),
            "webp" => Some(ImageFormat::Webp),
            "avif" => Some(ImageFormat::Avif),
            _ => None,
        }
    }

    /// Look up a format from a bare file name (no directory component).
    pub fn from_file_name(name: &str) -> Option<Self> {
        let (_, ext) = split_file_name(name);
        ext.and_then(Self::from_extension)
    }

    pub fn is_input(&self) -> bool {
        Self::INPUTS.contains(self)
    }

    pub fn is_output(&self) -> bool {
        Self::OUTPUTS.contains(self)
    }

    /// Extension written on output files.
    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "jpeg",
            ImageFormat::Png => "png",
            ImageFormat::Gif => "gif",
            ImageFormat::Webp => "webp",
            ImageFormat::Avif => "avif",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "JPEG",
            ImageFormat::Png => "PNG",
            ImageFormat::Gif => "GIF",
            ImageFormat::Webp => "WebP",
            ImageFormat::Avif => "AVIF",
        }
    }

    /// Instantiate the encoder adapter for an output format.
    ///
    /// This is the only place where a format tag selects an implementation;
    /// input-only formats have no adapter.
    pub fn adapter(self) -> Option<Box<dyn EncoderAdapter>> {
        match self {
            ImageFormat::Webp => Some(Box::new(WebpAdapter)),
            ImageFormat::Avif => Some(Box::new(AvifAdapter)),
            ImageFormat::Jpeg | ImageFormat::Png | ImageFormat::Gif => None,
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImageFormat {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_extension(s.trim()).ok_or_else(|| format!("unknown image format: {s}"))
    }
}

/// Split a file name at its last `.` into `(stem, extension)`.
///
/// A name without any `.` has no extension and keeps the whole name as stem.
pub fn split_file_name(name: &str) -> (&str, Option<&str>) {
    match name.rsplit_once('.') {
        Some((stem, ext)) => (stem, Some(ext)),
        None => (name, None),
    }
}

/// Whether a bare file name carries an extension this tool can decode.
///
/// WebP and AVIF are valid targets but are not accepted as input.
pub fn is_supported_input_format(filename: &str) -> bool {
    ImageFormat::from_file_name(filename).is_some_and(|f| f.is_input())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_extension_is_unsupported() {
        for name in ["", "photo", "README", "jpg", "png"] {
            assert!(!is_supported_input_format(name), "{name}");
        }
    }

    #[test]
    fn test_supported_inputs_any_case() {
        for name in ["a.jpg", "a.JPG", "a.jpeg", "a.JpEg", "b.png", "b.PNG", "c.gif", "c.Gif", "x.y.png"] {
            assert!(is_supported_input_format(name), "{name}");
        }
    }

    #[test]
    fn test_outputs_and_others_rejected_as_input() {
        for name in ["a.webp", "a.avif", "a.bmp", "a.tiff", "a.", "a.png.bak", "a.txt"] {
            assert!(!is_supported_input_format(name), "{name}");
        }
    }

    #[test]
    fn test_split_file_name_uses_last_dot() {
        assert_eq!(split_file_name("a.b.jpg"), ("a.b", Some("jpg")));
        assert_eq!(split_file_name("photo"), ("photo", None));
        assert_eq!(split_file_name("trailing."), ("trailing", Some("")));
    }

    #[test]
    fn test_from_str_aliases() {
        assert_eq!("jpg".parse::<ImageFormat>(), Ok(ImageFormat::Jpeg));
        assert_eq!("WEBP".parse::<ImageFormat>(), Ok(ImageFormat::Webp));
        assert_eq!(" avif ".parse::<ImageFormat>(), Ok(ImageFormat::Avif));
        assert!("bmp".parse::<ImageFormat>().is_err());
    }

    #[test]
    fn test_only_outputs_have_adapters() {
        for format in ImageFormat::OUTPUTS {
            let adapter = format.adapter().expect("output format has an adapter");
            assert_eq!(adapter.format(), format);
        }
        for format in ImageFormat::INPUTS {
            assert!(format.adapter().is_none());
        }
    }
}
