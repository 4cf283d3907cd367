use std::path::{Path, PathBuf};

use indicatif::ProgressBar;

use imanage_core::{CancelToken, TranscodeError, Transcoder};

use crate::report::{FileResult, Report};

/// Transcode `files` one after another with a single reused transcoder.
///
/// A failed file is logged and recorded, then the batch moves on. With
/// `fail_fast` the first failure cancels `cancel`, and every remaining file is
/// recorded as skipped.
pub fn run_batch(
    transcoder: &mut Transcoder,
    files: &[PathBuf],
    cancel: &CancelToken,
    fail_fast: bool,
    progress: &ProgressBar,
) -> Report {
    let mut report = Report::new();

    for path in files {
        if cancel.is_cancelled() {
            log::debug!("Skipping {}: batch cancelled", path.display());
            report.add(FileResult::skipped(path.clone()));
            progress.inc(1);
            continue;
        }

        transcoder.set_input(path);
        match transcoder.execute(cancel) {
            Ok(outcome) => {
                progress.set_message(format!(
                    "{} → {} file(s)",
                    display_name(path),
                    outcome.outputs.len()
                ));
                report.add(FileResult::converted(&outcome));
            }
            Err(TranscodeError::Cancelled { .. }) => {
                report.add(FileResult::skipped(path.clone()));
            }
            Err(e) => {
                log::error!("Transcode failed: [{}]: {}", path.display(), e);
                report.add(FileResult::failed(path.clone(), &e));
                if fail_fast {
                    cancel.cancel();
                }
            }
        }

        progress.inc(1);
    }

    report
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
