//! # sanitree - Filename-sanitizing tree copy
//!
//! Recursively copies a directory tree, rewriting every output path so only
//! `[./0-9A-Za-z_-]` remains. Runs of other characters become a single `_`,
//! and runs of `_` collapse to one.

// Module declarations
pub mod commands;
pub mod config;
pub mod executor;
pub mod hash;
pub mod sanitize;
pub mod scanner;
pub mod types;
pub mod ui;

// Re-export commonly used types
pub use config::Config;
pub use sanitize::{is_sanitized, sanitize, sanitized_output_path};
pub use types::{FileEntry, RunSummary, SanitizeError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
