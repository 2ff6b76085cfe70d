//! Error types for sanitree

use std::path::PathBuf;
use thiserror::Error;

/// Error types for sanitree operations
///
/// Every variant is fatal for the run: the batch loop stops at the first one.
#[derive(Debug, Error)]
pub enum SanitizeError {
    /// Standard IO error (automatically converted via #[from])
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Input directory vanished or became unreadable during the walk
    #[error("Traversal failed at {path}: {message}")]
    Walk { path: PathBuf, message: String },

    /// Ancestor directories of a sanitized path could not be created
    #[error("Failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Source unreadable or destination unwritable at copy time
    #[error("Failed to copy {src} -> {dest}: {source}")]
    Copy {
        src: PathBuf,
        dest: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Post-copy verification found different bytes
    #[error("Checksum mismatch: {path}")]
    ChecksumMismatch { path: PathBuf },

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Run stopped by a termination signal
    #[error("Interrupted: run stopped before all files were copied")]
    Interrupted,
}

impl SanitizeError {
    /// Check if this error came from walking the input tree
    pub fn is_traversal_error(&self) -> bool {
        matches!(self, SanitizeError::Walk { .. })
    }

    /// Check if this error happened while writing the output tree
    pub fn is_destination_error(&self) -> bool {
        matches!(
            self,
            SanitizeError::CreateDir { .. }
                | SanitizeError::Copy { .. }
                | SanitizeError::ChecksumMismatch { .. }
        )
    }

    /// Check if this error is a configuration error
    pub fn is_config_error(&self) -> bool {
        matches!(self, SanitizeError::Config(_))
    }

    /// Check if this error is related to permissions
    pub fn is_permission_error(&self) -> bool {
        self.io_kind() == Some(std::io::ErrorKind::PermissionDenied)
    }

    fn io_kind(&self) -> Option<std::io::ErrorKind> {
        match self {
            SanitizeError::Io(e) => Some(e.kind()),
            SanitizeError::CreateDir { source, .. } | SanitizeError::Copy { source, .. } => {
                Some(source.kind())
            }
            _ => None,
        }
    }
}
