//! Executor module: the per-file copy loop

pub mod copy;

use crate::hash::verify_copy;
use crate::sanitize::sanitized_output_path;
use crate::types::{FileEntry, SanitizeError};
use crate::Config;
use camino::Utf8PathBuf;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

pub use copy::copy_file;

/// Execution statistics for a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionStats {
    /// Files copied (or planned, in dry-run mode).
    pub files_copied: usize,
    /// Aggregate copied bytes (source sizes in dry-run mode).
    pub bytes_copied: u64,
}

/// Events emitted while executing.
#[derive(Debug)]
pub enum ExecutionEvent {
    /// About to copy `source` to its sanitized destination.
    FileStart {
        index: usize,
        source: PathBuf,
        dest: Utf8PathBuf,
    },
    /// Copy finished.
    FileDone {
        index: usize,
        dest: Utf8PathBuf,
        bytes_copied: u64,
    },
    /// Every entry was processed.
    Complete { stats: ExecutionStats },
}

/// Optional callback used to receive execution events.
pub type ExecutionCallback = dyn Fn(&ExecutionEvent) + Send + Sync;

/// Copy every entry to its sanitized destination under `config.output_root`
///
/// Runs sequentially and stops at the first error, which is returned as is.
/// Files written before the failure stay on disk. When two entries sanitize
/// to the same destination the later one overwrites the earlier one.
///
/// `cancel` is checked before each file; once set the loop stops with
/// `SanitizeError::Interrupted`.
pub fn execute<I>(
    entries: I,
    config: &Config,
    cancel: &AtomicBool,
    on_event: Option<&ExecutionCallback>,
) -> Result<ExecutionStats, SanitizeError>
where
    I: IntoIterator<Item = Result<FileEntry, SanitizeError>>,
{
    let mut stats = ExecutionStats::default();

    for (idx, entry) in entries.into_iter().enumerate() {
        if cancel.load(Ordering::Relaxed) {
            return Err(SanitizeError::Interrupted);
        }

        let entry = entry?;
        let index = idx + 1;
        let dest = sanitized_output_path(&config.output_root, &entry.relative_path);

        emit_event(
            on_event,
            ExecutionEvent::FileStart {
                index,
                source: entry.source_path.clone(),
                dest: dest.clone(),
            },
        );

        let bytes = if config.dry_run {
            entry.size
        } else {
            let bytes = copy_file(&entry.source_path, dest.as_std_path())?;
            if config.verify {
                verify_copy(&entry.source_path, dest.as_std_path())?;
            }
            bytes
        };

        stats.files_copied += 1;
        stats.bytes_copied += bytes;

        emit_event(
            on_event,
            ExecutionEvent::FileDone {
                index,
                dest,
                bytes_copied: bytes,
            },
        );
    }

    emit_event(
        on_event,
        ExecutionEvent::Complete {
            stats: stats.clone(),
        },
    );

    Ok(stats)
}

fn emit_event(on_event: Option<&ExecutionCallback>, event: ExecutionEvent) {
    if let Some(callback) = on_event {
        callback(&event);
    }
}
