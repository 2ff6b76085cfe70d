//! Progress reporting

use crate::types::RunSummary;
use indicatif::{HumanBytes, ProgressBar, ProgressStyle};
use std::path::Path;

/// Progress reporter for a sanitize run
///
/// Log lines go through `ProgressBar::suspend`, so they are printed whether or
/// not the spinner is drawn (it is hidden when stdout is not a terminal).
/// In JSON mode stdout carries only the summary and log lines move to stderr.
pub struct ProgressReporter {
    bar: ProgressBar,
    bytes: u64,
    json: bool,
}

impl ProgressReporter {
    /// Create a new progress reporter
    pub fn new() -> Self {
        let bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner} {pos} files | {msg}") {
            bar.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ "));
        }

        Self {
            bar,
            bytes: 0,
            json: false,
        }
    }

    /// Reporter that draws nothing; log lines are still printed.
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
            bytes: 0,
            json: false,
        }
    }

    /// Switch to JSON mode.
    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    /// Announce the run.
    pub fn start(&self, input_root: &Path, output_root: &Path) {
        self.log(format!(
            "to sanitize: input_dir: {} output_dir: {}",
            input_root.display(),
            output_root.display()
        ));
        self.bar
            .enable_steady_tick(std::time::Duration::from_millis(120));
    }

    /// Log one file about to be copied.
    pub fn file_start(&self, source: &Path, dest: &Path) {
        self.log(format!(
            "to copy: in: {} out: {}",
            source.display(),
            dest.display()
        ));
    }

    /// Mark one file complete.
    pub fn file_done(&mut self, bytes: u64) {
        self.bytes = self.bytes.saturating_add(bytes);
        self.bar.inc(1);
        self.bar.set_message(HumanBytes(self.bytes).to_string());
    }

    /// Stop the spinner where it is; the caller reports the error.
    pub fn abandon(&self) {
        self.bar.abandon();
    }

    /// Finalize: clear the spinner and print the summary.
    pub fn finish(&self, summary: &RunSummary) {
        self.bar.finish_and_clear();
        if self.json {
            match serde_json::to_string_pretty(summary) {
                Ok(text) => println!("{}", text),
                Err(e) => eprintln!("Warning: Failed to serialize summary: {}", e),
            }
        } else {
            println!("{}", format_summary(summary));
        }
    }

    fn log(&self, line: String) {
        if self.json {
            self.bar.suspend(|| eprintln!("{}", line));
        } else {
            self.bar.suspend(|| println!("{}", line));
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

/// Human summary line for a finished run
pub fn format_summary(summary: &RunSummary) -> String {
    let verb = if summary.dry_run {
        "would copy"
    } else {
        "copied"
    };
    format!(
        "sanitized: {} {} file(s) | {} | {:.2?}",
        verb,
        summary.files_copied,
        HumanBytes(summary.bytes_copied),
        summary.duration
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::Duration;

    #[test]
    fn test_file_done_increments_position_and_bytes() {
        let mut reporter = ProgressReporter::hidden();
        reporter.file_done(128);
        reporter.file_done(256);

        assert_eq!(reporter.bar.position(), 2);
        assert_eq!(reporter.bytes, 384);
    }

    #[test]
    fn test_summary_line() {
        let mut summary = RunSummary::new(PathBuf::from("/in"), PathBuf::from("/out"), false);
        summary.files_copied = 3;
        summary.bytes_copied = 2048;
        summary.duration = Duration::from_millis(5);

        let line = format_summary(&summary);
        assert!(line.contains("copied 3 file(s)"));
        assert!(line.contains("2.00 KiB"));
    }

    #[test]
    fn test_dry_run_summary_line() {
        let summary = RunSummary::new(PathBuf::from("/in"), PathBuf::from("/out"), true);
        assert!(format_summary(&summary).contains("would copy 0 file(s)"));
    }

    #[test]
    fn test_log_methods_execute_without_panicking() {
        let reporter = ProgressReporter::hidden().with_json(true);
        reporter.start(Path::new("/in"), Path::new("/out"));
        reporter.file_start(Path::new("/in/a b.txt"), Path::new("/out/a_b.txt"));
        reporter.finish(&RunSummary::new(
            PathBuf::from("/in"),
            PathBuf::from("/out"),
            false,
        ));
    }
}
