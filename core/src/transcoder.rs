use std::collections::BTreeMap;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use image::{DynamicImage, GenericImageView};

use crate::adapter::EncoderAdapter;
use crate::cancel::CancelToken;
use crate::config::TranscodeOptions;
use crate::error::TranscodeError;
use crate::format::{is_supported_input_format, split_file_name, ImageFormat};

/// One encoded file produced by `Transcoder::execute`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenOutput {
    pub format: ImageFormat,
    pub path: PathBuf,
    pub size: u64,
}

/// Result of transcoding a single input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscodeOutcome {
    pub input: PathBuf,
    pub source_size: u64,
    pub outputs: Vec<WrittenOutput>,
}

impl TranscodeOutcome {
    pub fn output_size(&self) -> u64 {
        self.outputs.iter().map(|o| o.size).sum()
    }
}

/// Decodes one input image and fans it out to every configured target.
///
/// A single instance is reused across a batch: configuration and targets stay
/// fixed while `set_input` changes per file. Targets are kept sorted by format
/// so outputs are always produced in the same order.
pub struct Transcoder {
    options: TranscodeOptions,
    targets: BTreeMap<ImageFormat, Box<dyn EncoderAdapter>>,
    input_file: Option<PathBuf>,
    output_dir: PathBuf,
}

impl Transcoder {
    pub fn new(options: TranscodeOptions) -> Self {
        Self {
            options,
            targets: BTreeMap::new(),
            input_file: None,
            output_dir: PathBuf::from("."),
        }
    }

    /// Replace the options wholesale. `None` keeps the current configuration.
    pub fn setup(&mut self, options: Option<TranscodeOptions>) {
        if let Some(options) = options {
            self.options = options;
        }
    }

    pub fn options(&self) -> &TranscodeOptions {
        &self.options
    }

    /// Add (or replace) the adapter for `format`.
    ///
    /// Formats without an adapter are ignored so a batch never fails on a
    /// target that is not implemented.
    pub fn add_target(&mut self, format: ImageFormat) {
        match format.adapter() {
            Some(adapter) => {
                self.targets.insert(format, adapter);
            }
            None => log::debug!("Ignoring target {}: no encoder available", format),
        }
    }

    pub fn remove_target(&mut self, format: ImageFormat) {
        self.targets.remove(&format);
    }

    pub fn targets(&self) -> Vec<ImageFormat> {
        self.targets.keys().copied().collect()
    }

    pub fn set_input(&mut self, file: impl Into<PathBuf>) {
        self.input_file = Some(file.into());
    }

    pub fn input(&self) -> Option<&Path> {
        self.input_file.as_deref()
    }

    pub fn set_output(&mut self, dir: impl Into<PathBuf>) {
        self.output_dir = dir.into();
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Output path for every target of the current input, without touching the filesystem.
    pub fn destinations(&self) -> Result<Vec<(ImageFormat, PathBuf)>, TranscodeError> {
        let (input, file_name) = self.checked_input()?;
        let (stem, _) = split_file_name(file_name);
        let base = format!("{}{}", self.options.output_prefix.as_deref().unwrap_or(""), stem);

        log::trace!("Destination base for {} is {}", input.display(), base);

        Ok(self
            .targets
            .keys()
            .map(|format| (*format, self.output_dir.join(format!("{}.{}", base, format.extension()))))
            .collect())
    }

    /// Transcode the current input into every target.
    ///
    /// Cancellation and the extension are checked before any I/O and the image is decoded
    /// once. Each output is written to a temporary file and renamed into
    /// place, so a failed target never leaves a truncated file. The first
    /// failing target aborts the call; outputs already written for earlier
    /// targets are kept.
    pub fn execute(&self, cancel: &CancelToken) -> Result<TranscodeOutcome, TranscodeError> {
        if cancel.is_cancelled() {
            return Err(TranscodeError::Cancelled {
                path: self.input_file.clone().unwrap_or_default(),
            });
        }

        let destinations = self.destinations()?;
        let input = self.input_file.as_deref().ok_or(TranscodeError::NoInput)?;

        if self.options.quality_out_of_range() {
            log::warn!(
                "Quality {:?} is outside 0-100; clamping to {}",
                self.options.quality,
                self.options.effective_quality()
            );
        }
        self.log_hints();

        let data = fs::read(input).map_err(|source| TranscodeError::Read {
            path: input.to_path_buf(),
            source,
        })?;
        let source_size = data.len() as u64;

        if destinations.is_empty() {
            log::debug!("No targets configured; nothing to write for {}", input.display());
            return Ok(TranscodeOutcome {
                input: input.to_path_buf(),
                source_size,
                outputs: Vec::new(),
            });
        }

        let image = image::load_from_memory(&data).map_err(|source| TranscodeError::Decode {
            path: input.to_path_buf(),
            source,
        })?;
        drop(data);

        let (width, height) = image.dimensions();
        log::debug!(
            "Decoded {}: {}x{} pixels, {} target(s)",
            input.display(),
            width,
            height,
            destinations.len()
        );

        let mut outputs = Vec::with_capacity(destinations.len());
        for (format, path) in destinations {
            let Some(adapter) = self.targets.get(&format) else {
                continue;
            };
            let size = self.write_target(adapter.as_ref(), &image, input, &path)?;
            log::debug!("Wrote {} ({} bytes)", path.display(), size);
            outputs.push(WrittenOutput { format, path, size });
        }

        Ok(TranscodeOutcome {
            input: input.to_path_buf(),
            source_size,
            outputs,
        })
    }

    /// Input path and its UTF-8 file name, rejecting unsupported extensions.
    fn checked_input(&self) -> Result<(&Path, &str), TranscodeError> {
        let input = self.input_file.as_deref().ok_or(TranscodeError::NoInput)?;
        let unsupported = || TranscodeError::UnsupportedFormat {
            path: input.to_path_buf(),
        };

        let file_name = input
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(unsupported)?;
        if !is_supported_input_format(file_name) {
            return Err(unsupported());
        }
        Ok((input, file_name))
    }

    fn write_target(
        &self,
        adapter: &dyn EncoderAdapter,
        image: &DynamicImage,
        input: &Path,
        dest: &Path,
    ) -> Result<u64, TranscodeError> {
        let format = adapter.format();
        let write_err = |source: std::io::Error| TranscodeError::Write {
            path: dest.to_path_buf(),
            format,
            source,
        };

        let dir = match dest.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let mut tmp = tempfile::Builder::new()
            .prefix(".imanage-")
            .suffix(".part")
            .tempfile_in(dir)
            .map_err(write_err)?;

        {
            let mut writer = BufWriter::new(tmp.as_file_mut());
            adapter
                .write(image, &mut writer, &self.options)
                .map_err(|source| TranscodeError::Encode {
                    path: input.to_path_buf(),
                    format,
                    source,
                })?;
            writer.flush().map_err(write_err)?;
        }

        let size = tmp.as_file().metadata().map_err(write_err)?.len();
        tmp.persist(dest).map_err(|e| write_err(e.error))?;
        Ok(size)
    }

    fn log_hints(&self) {
        let hints = self.options.hints;
        if hints.prefer_system_libwebp && self.targets.contains_key(&ImageFormat::Webp) {
            log::debug!("System libwebp requested; using the bundled WebP encoder");
        }
        if hints.prefer_system_libavif && self.targets.contains_key(&ImageFormat::Avif) {
            log::debug!("System libavif requested; using the bundled AVIF encoder");
        }
    }
}

impl Default for Transcoder {
    fn default() -> Self {
        Self::new(TranscodeOptions::default())
    }
}
