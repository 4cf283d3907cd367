use std::path::PathBuf;

use imanage_core::{TranscodeError, TranscodeOutcome};

/// Result of processing a single file.
#[derive(Debug)]
pub struct FileResult {
    pub path: PathBuf,
    pub original_size: u64,
    pub output_size: u64,
    pub outputs: Vec<PathBuf>,
    pub skipped: bool,
    pub error: Option<String>,
}

impl FileResult {
    pub fn converted(outcome: &TranscodeOutcome) -> Self {
        Self {
            path: outcome.input.clone(),
            original_size: outcome.source_size,
            output_size: outcome.output_size(),
            outputs: outcome.outputs.iter().map(|o| o.path.clone()).collect(),
            skipped: false,
            error: None,
        }
    }

    pub fn failed(path: PathBuf, error: &TranscodeError) -> Self {
        Self {
            path,
            original_size: 0,
            output_size: 0,
            outputs: Vec::new(),
            skipped: false,
            error: Some(error.to_string()),
        }
    }

    pub fn skipped(path: PathBuf) -> Self {
        Self {
            path,
            original_size: 0,
            output_size: 0,
            outputs: Vec::new(),
            skipped: true,
            error: None,
        }
    }
}

/// Aggregate report for all processed files.
#[derive(Debug, Default)]
pub struct Report {
    pub results: Vec<FileResult>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, result: FileResult) {
        self.results.push(result);
    }

    pub fn total_original(&self) -> u64 {
        self.results.iter().map(|r| r.original_size).sum()
    }

    pub fn total_output(&self) -> u64 {
        self.results.iter().map(|r| r.output_size).sum()
    }

    pub fn success_count(&self) -> usize {
        self.results.iter().filter(|r| r.error.is_none() && !r.skipped).count()
    }

    pub fn error_count(&self) -> usize {
        self.results.iter().filter(|r| r.error.is_some()).count()
    }

    pub fn skipped_count(&self) -> usize {
        self.results.iter().filter(|r| r.skipped).count()
    }

    pub fn summary_line(&self) -> String {
        let mut line = format!("{} succeeded, {} failed", self.success_count(), self.error_count());
        if self.skipped_count() > 0 {
            line.push_str(&format!(", {} skipped", self.skipped_count()));
        }
        line
    }

    pub fn print_summary(&self) {
        println!("\n--- Summary ---");
        println!("{}", self.summary_line());

        if self.success_count() > 0 {
            println!(
                "Total: {} → {}",
                format_size(self.total_original()),
                format_size(self.total_output())
            );
        }

        for r in &self.results {
            if let Some(ref err) = r.error {
                println!("  ERROR {}: {}", r.path.display(), err);
            }
        }
    }
}

fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = 1024 * KB;
    if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
