use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};

use imanage::batch::run_batch;
use imanage::cli::{Cli, Command, TranscodeArgs};
use imanage::io::{collect_inputs, Workspace};
use imanage_core::{CancelToken, TranscodeError, Transcoder};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Init logging
    let log_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    match &cli.command {
        Command::Transcode(args) => handle_transcode(&cli.workspace, args),
        Command::Init => {
            let ws = Workspace::init(&cli.workspace).context("Failed to initialize workspace")?;
            println!("Input:  {}", ws.input.display());
            println!("Output: {}", ws.output.display());
            Ok(())
        }
    }
}

fn handle_transcode(root: &Path, args: &TranscodeArgs) -> Result<()> {
    let ws = Workspace::init(root).context("Failed to initialize workspace")?;

    let mut transcoder = Transcoder::new(args.to_options());
    transcoder.set_output(&ws.output);
    for target in args.targets() {
        transcoder.add_target(target);
    }

    let files = collect_inputs(&ws.input).context("Failed to read workspace input")?;
    if files.is_empty() {
        println!("No files found in {}.", ws.input.display());
        return Ok(());
    }

    let targets: Vec<&str> = transcoder.targets().iter().map(|t| t.as_str()).collect();
    println!("Transcoding {} file(s) to {}...", files.len(), targets.join(", "));

    if args.dry_run {
        println!("[dry-run] Would write into {}:", transcoder.output_dir().display());
        for f in &files {
            transcoder.set_input(f);
            let Some(input) = transcoder.input() else {
                continue;
            };
            match transcoder.destinations() {
                Ok(dests) => {
                    for (_, out) in dests {
                        println!("  {} → {}", input.display(), out.display());
                    }
                }
                Err(TranscodeError::UnsupportedFormat { .. }) => {
                    println!("  {} → (unsupported, skipped)", input.display());
                }
                Err(e) => return Err(e.into()),
            }
        }
        return Ok(());
    }

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .context("Invalid progress bar template")?
            .progress_chars("█▓░"),
    );

    let report = run_batch(&mut transcoder, &files, &CancelToken::new(), args.fail_fast, &pb);

    pb.finish_with_message("Done!");
    println!("Transcode complete!");
    report.print_summary();

    if report.error_count() > 0 {
        anyhow::bail!("{} of {} file(s) failed", report.error_count(), files.len());
    }
    Ok(())
}
