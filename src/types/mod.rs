//! Core type definitions for sanitree

mod entry;
mod error;
mod summary;

pub use entry::FileEntry;
pub use error::SanitizeError;
pub use summary::RunSummary;
