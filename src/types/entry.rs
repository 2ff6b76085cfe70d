//! FileEntry - A single file discovered while walking the input root

use serde::Serialize;
use std::path::{Path, PathBuf};

/// A regular file found under the input root
///
/// Lives only while that one file is processed.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FileEntry {
    /// Path relative to the input root
    pub relative_path: PathBuf,

    /// Absolute source path (input root joined with `relative_path`)
    pub source_path: PathBuf,

    /// File size in bytes at discovery time
    pub size: u64,
}

impl FileEntry {
    /// Create a new FileEntry under `input_root`
    pub fn new(input_root: &Path, relative_path: PathBuf, size: u64) -> Self {
        let source_path = input_root.join(&relative_path);
        Self {
            relative_path,
            source_path,
            size,
        }
    }
}
