//! RunSummary - What a completed run did

use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;

/// Outcome of a successful sanitize run
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RunSummary {
    pub input_root: PathBuf,
    pub output_root: PathBuf,

    /// Files written (or, in dry-run mode, that would have been written)
    pub files_copied: usize,
    pub bytes_copied: u64,

    pub dry_run: bool,

    #[serde(serialize_with = "serialize_millis")]
    pub duration: Duration,
}

impl RunSummary {
    /// Create an empty summary for the given roots
    pub fn new(input_root: PathBuf, output_root: PathBuf, dry_run: bool) -> Self {
        Self {
            input_root,
            output_root,
            files_copied: 0,
            bytes_copied: 0,
            dry_run,
            duration: Duration::ZERO,
        }
    }
}

fn serialize_millis<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_u64(u64::try_from(duration.as_millis()).unwrap_or(u64::MAX))
}
