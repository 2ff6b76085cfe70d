//! Sequential directory walker

use crate::config::Config;
use crate::types::{FileEntry, SanitizeError};
use std::path::{Path, PathBuf};

/// Streaming walk over every regular file under an input root
///
/// Yields one [`FileEntry`] at a time; nothing is collected up front.
/// Within a directory, entries come in file-name order.
///
/// # Policy
/// * Hidden files and `.gitignore`d files are walked like any other file
/// * Symlinks below the root are never followed and are skipped with a warning;
///   a root that is itself a symlink to a directory is walked
/// * Sockets, FIFOs and device files are skipped with a warning
/// * Directories produce no entries of their own
/// * Any traversal error ends the walk: it is yielded as `SanitizeError::Walk`
pub struct FileWalker {
    root: PathBuf,
    inner: ignore::Walk,
}

impl FileWalker {
    /// Build a walker for `root_path`, honoring `config.exclude_patterns`
    ///
    /// # Errors
    /// * Invalid exclude patterns return `SanitizeError::Config`
    pub fn new(root_path: &Path, config: &Config) -> Result<Self, SanitizeError> {
        let mut override_builder = ignore::overrides::OverrideBuilder::new(root_path);

        for pattern in &config.exclude_patterns {
            // OverrideBuilder treats `!` as "ignore this"
            let exclude_pattern = format!("!{}", pattern);
            override_builder.add(&exclude_pattern).map_err(|e| {
                SanitizeError::Config(format!("Invalid exclude pattern '{}': {}", pattern, e))
            })?;
        }

        let overrides = override_builder.build().map_err(|e| {
            SanitizeError::Config(format!("Failed to build exclude overrides: {}", e))
        })?;

        let inner = ignore::WalkBuilder::new(root_path)
            .standard_filters(false)
            .follow_links(false)
            .overrides(overrides)
            .sort_by_file_name(|a, b| a.cmp(b))
            .build();

        Ok(Self {
            root: root_path.to_path_buf(),
            inner,
        })
    }

    fn to_entry(&self, entry: ignore::DirEntry) -> Result<Option<FileEntry>, SanitizeError> {
        let file_type = match entry.file_type() {
            Some(ft) => ft,
            // stdin pseudo-entry, never produced for a directory walk
            None => return Ok(None),
        };

        // The root is validated as a directory up front; a symlinked root is
        // walked through, not reported as a skipped link.
        if entry.depth() == 0 || file_type.is_dir() {
            return Ok(None);
        }

        if file_type.is_symlink() {
            eprintln!(
                "Warning: Skipping symlink {}. Symlinks are not followed or copied.",
                entry.path().display()
            );
            return Ok(None);
        }

        if !file_type.is_file() {
            eprintln!(
                "Warning: Skipping special file {}. Only regular files are copied.",
                entry.path().display()
            );
            return Ok(None);
        }

        let metadata = entry.metadata().map_err(|e| walk_error(&self.root, &e))?;

        let relative_path = entry
            .path()
            .strip_prefix(&self.root)
            .map_err(|_| SanitizeError::Walk {
                path: entry.path().to_path_buf(),
                message: format!("not under input root {}", self.root.display()),
            })?
            .to_path_buf();

        Ok(Some(FileEntry::new(&self.root, relative_path, metadata.len())))
    }
}

impl Iterator for FileWalker {
    type Item = Result<FileEntry, SanitizeError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.inner.next()? {
                Ok(entry) => entry,
                Err(e) => return Some(Err(walk_error(&self.root, &e))),
            };

            match self.to_entry(entry) {
                Ok(Some(file_entry)) => return Some(Ok(file_entry)),
                Ok(None) => continue,
                Err(e) => return Some(Err(e)),
            }
        }
    }
}

fn walk_error(root: &Path, err: &ignore::Error) -> SanitizeError {
    SanitizeError::Walk {
        path: error_path(err).unwrap_or_else(|| root.to_path_buf()),
        message: err.to_string(),
    }
}

fn error_path(err: &ignore::Error) -> Option<PathBuf> {
    match err {
        ignore::Error::WithPath { path, .. } => Some(path.clone()),
        ignore::Error::WithDepth { err, .. } | ignore::Error::WithLineNumber { err, .. } => {
            error_path(err)
        }
        _ => None,
    }
}
