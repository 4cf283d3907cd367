use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use imanage_core::{AdapterHints, ImageFormat, TranscodeOptions};

/// Batch transcoder turning JPEG/PNG/GIF images into WebP and AVIF
#[derive(Debug, Parser)]
#[command(name = "imanage", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Workspace directory containing input/ and output/
    #[arg(short, long, global = true, default_value = "./imanage_data")]
    pub workspace: PathBuf,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Transcode every image in <workspace>/input into <workspace>/output
    Transcode(TranscodeArgs),

    /// Create the workspace input/ and output/ directories
    Init,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TargetFormat {
    Webp,
    Avif,
}

impl From<TargetFormat> for ImageFormat {
    fn from(target: TargetFormat) -> Self {
        match target {
            TargetFormat::Webp => ImageFormat::Webp,
            TargetFormat::Avif => ImageFormat::Avif,
        }
    }
}

#[derive(Debug, Args)]
pub struct TranscodeArgs {
    /// Output quality 0–100 (higher is better)
    #[arg(short, long, default_value_t = TranscodeOptions::DEFAULT_QUALITY, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub quality: u8,

    /// Target formats, repeatable or comma separated
    #[arg(short = 't', long = "to", value_name = "FORMAT", value_enum, value_delimiter = ',', default_value = "webp")]
    pub to: Vec<TargetFormat>,

    /// Prefix prepended to every output file name
    #[arg(long)]
    pub prefix: Option<String>,

    /// Keep source metadata where the encoder supports it
    #[arg(long)]
    pub include_metadata: bool,

    /// Encode WebP losslessly
    #[arg(long)]
    pub lossless: bool,

    /// AVIF speed vs quality: 1 (slowest/best) to 10 (fastest/worst)
    #[arg(short, long, default_value_t = TranscodeOptions::DEFAULT_AVIF_SPEED, value_parser = clap::value_parser!(u8).range(1..=10))]
    pub speed: u8,

    /// Prefer the system libwebp (advisory)
    #[arg(long)]
    pub use_libwebp: bool,

    /// Prefer the system libavif (advisory)
    #[arg(long)]
    pub use_libavif: bool,

    /// Stop at the first failed file instead of continuing the batch
    #[arg(long)]
    pub fail_fast: bool,

    /// Show what would be written without encoding anything
    #[arg(long)]
    pub dry_run: bool,
}

impl TranscodeArgs {
    pub fn to_options(&self) -> TranscodeOptions {
        TranscodeOptions {
            quality: Some(self.quality),
            output_prefix: self.prefix.clone(),
            include_metadata: self.include_metadata,
            lossless: self.lossless,
            avif_speed: self.speed,
            hints: AdapterHints {
                prefer_system_libwebp: self.use_libwebp,
                prefer_system_libavif: self.use_libavif,
            },
        }
    }

    pub fn targets(&self) -> Vec<ImageFormat> {
        self.to.iter().copied().map(ImageFormat::from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transcode_args(args: &[&str]) -> TranscodeArgs {
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Command::Transcode(args) => args,
            Command::Init => panic!("expected transcode"),
        }
    }

    #[test]
    fn test_defaults() {
        let args = transcode_args(&["imanage", "transcode"]);
        assert_eq!(args.targets(), vec![ImageFormat::Webp]);

        let opts = args.to_options();
        assert_eq!(opts.quality, Some(90));
        assert_eq!(opts.avif_speed, 6);
        assert!(!opts.include_metadata);
        assert!(opts.output_prefix.is_none());
    }

    #[test]
    fn test_targets_and_flags() {
        let args = transcode_args(&[
            "imanage",
            "transcode",
            "--to",
            "webp,avif",
            "-q",
            "40",
            "--prefix",
            "web_",
            "--use-libavif",
            "--include-metadata",
        ]);
        assert_eq!(args.targets(), vec![ImageFormat::Webp, ImageFormat::Avif]);

        let opts = args.to_options();
        assert_eq!(opts.quality, Some(40));
        assert_eq!(opts.output_prefix.as_deref(), Some("web_"));
        assert!(opts.hints.prefer_system_libavif);
        assert!(!opts.hints.prefer_system_libwebp);
        assert!(opts.include_metadata);
    }

    #[test]
    fn test_quality_out_of_range_rejected() {
        assert!(Cli::try_parse_from(["imanage", "transcode", "--quality", "101"]).is_err());
        assert!(Cli::try_parse_from(["imanage", "transcode", "--to", "bmp"]).is_err());
    }

    #[test]
    fn test_global_workspace() {
        let cli = Cli::try_parse_from(["imanage", "init", "--workspace", "/tmp/ws"]).unwrap();
        assert_eq!(cli.workspace, PathBuf::from("/tmp/ws"));
        assert!(matches!(cli.command, Command::Init));
    }
}
