//! Main sanitize command

use crate::executor::{execute, ExecutionEvent};
use crate::scanner::FileWalker;
use crate::types::{RunSummary, SanitizeError};
use crate::ui::ProgressReporter;
use crate::Config;
use std::io::ErrorKind;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use std::time::Instant;

/// Run a sanitize pass that cannot be cancelled
pub fn run(config: Config) -> Result<RunSummary, SanitizeError> {
    run_with_cancel(config, &AtomicBool::new(false))
}

/// Run a sanitize pass, stopping between files once `cancel` is set
///
/// Walks `config.input_root` and copies every regular file to its sanitized
/// path under `config.output_root`. The first failure aborts the run; files
/// copied before it remain.
pub fn run_with_cancel(config: Config, cancel: &AtomicBool) -> Result<RunSummary, SanitizeError> {
    let started = Instant::now();
    let reporter = Arc::new(Mutex::new(ProgressReporter::new().with_json(config.json)));

    if let Ok(progress) = reporter.lock() {
        progress.start(&config.input_root, &config.output_root);
    }

    let progress_cb = {
        let reporter = Arc::clone(&reporter);
        move |event: &ExecutionEvent| match event {
            ExecutionEvent::FileStart { source, dest, .. } => {
                if let Ok(progress) = reporter.lock() {
                    progress.file_start(source, dest.as_std_path());
                }
            }
            ExecutionEvent::FileDone { bytes_copied, .. } => {
                if let Ok(mut progress) = reporter.lock() {
                    progress.file_done(*bytes_copied);
                }
            }
            ExecutionEvent::Complete { .. } => {}
        }
    };

    let result = FileWalker::new(&config.input_root, &config)
        .and_then(|walker| execute(walker, &config, cancel, Some(&progress_cb)));

    let stats = match result {
        Ok(stats) => stats,
        Err(err) => {
            if let Ok(progress) = reporter.lock() {
                progress.abandon();
            }
            return Err(err);
        }
    };

    let summary = RunSummary {
        files_copied: stats.files_copied,
        bytes_copied: stats.bytes_copied,
        duration: started.elapsed(),
        ..RunSummary::new(
            config.input_root.clone(),
            config.output_root.clone(),
            config.dry_run,
        )
    };

    if let Ok(progress) = reporter.lock() {
        progress.finish(&summary);
    }

    Ok(summary)
}

/// Error message plus a hint on what to do about it
pub fn format_error(error: &SanitizeError) -> String {
    match suggestion(error) {
        Some(hint) => format!("{}\n  Suggestion: {}", error, hint),
        None => error.to_string(),
    }
}

fn suggestion(error: &SanitizeError) -> Option<&'static str> {
    if error.is_permission_error() {
        return Some("Check permissions on the input and output directories.");
    }
    match error {
        SanitizeError::Walk { .. } => {
            Some("Check that the input tree is readable and not changing, then re-run.")
        }
        SanitizeError::Copy { source, .. } if source.kind() == ErrorKind::IsADirectory => {
            Some("A directory already occupies the sanitized file name in the output.")
        }
        SanitizeError::CreateDir { source, .. }
            if matches!(
                source.kind(),
                ErrorKind::NotADirectory | ErrorKind::AlreadyExists
            ) =>
        {
            Some("A file already occupies a sanitized directory name in the output.")
        }
        SanitizeError::Copy { .. } | SanitizeError::CreateDir { .. } => {
            Some("Check free space on the output volume.")
        }
        SanitizeError::ChecksumMismatch { .. } => {
            Some("Re-run; if it persists, check the health of the output volume.")
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_run_returns_summary() {
        let src = TempDir::new().expect("create src tempdir");
        let dst = TempDir::new().expect("create dst tempdir");
        fs::write(src.path().join("a b.txt"), b"hello").expect("write source file");

        let summary = run(Config::new(src.path(), dst.path())).expect("run should succeed");

        assert_eq!(summary.files_copied, 1);
        assert_eq!(summary.bytes_copied, 5);
        assert_eq!(summary.input_root, src.path());
        assert!(!summary.dry_run);
    }

    #[test]
    fn test_suggestion_for_walk_error() {
        let err = SanitizeError::Walk {
            path: PathBuf::from("/in"),
            message: "gone".to_string(),
        };
        assert!(format_error(&err).contains("Suggestion"));
    }

    #[test]
    fn test_permission_hint_takes_precedence() {
        let err = SanitizeError::CreateDir {
            path: PathBuf::from("/out"),
            source: std::io::Error::new(ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(
            suggestion(&err),
            Some("Check permissions on the input and output directories.")
        );
    }

    #[test]
    fn test_no_hint_for_interrupted() {
        assert_eq!(suggestion(&SanitizeError::Interrupted), None);
    }
}
