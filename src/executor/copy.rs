//! Byte-for-byte file copy

use crate::types::SanitizeError;
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;

const COPY_BUFFER_SIZE: usize = 128 * 1024;

/// Copy the bytes of `src` to `dest`, creating `dest`'s ancestors first
///
/// Steps:
/// 1. `create_dir_all` on the parent (succeeds if it already exists)
/// 2. Create or truncate `dest`
/// 3. Stream `src` into it through a 128KB buffer
///
/// Only byte content is copied. Permissions and timestamps of `dest` are
/// whatever file creation gives it.
///
/// # Returns
/// * `Ok(u64)` - Number of bytes copied
/// * `Err(SanitizeError::CreateDir)` - An ancestor directory could not be made
/// * `Err(SanitizeError::Copy)` - Reading `src` or writing `dest` failed
///
/// # Example
/// ```no_run
/// use sanitree::executor::copy_file;
/// use std::path::Path;
///
/// let bytes = copy_file(Path::new("in/a b.txt"), Path::new("out/a_b.txt"))?;
/// # Ok::<(), sanitree::types::SanitizeError>(())
/// ```
pub fn copy_file(src: &Path, dest: &Path) -> Result<u64, SanitizeError> {
    if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| SanitizeError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let copy_error = |source: std::io::Error| SanitizeError::Copy {
        src: src.to_path_buf(),
        dest: dest.to_path_buf(),
        source,
    };

    let mut src_file = File::open(src).map_err(copy_error)?;
    let mut dest_file = File::create(dest).map_err(copy_error)?;

    let mut buffer = vec![0u8; COPY_BUFFER_SIZE];
    let mut total_bytes = 0u64;

    loop {
        let bytes_read = src_file.read(&mut buffer).map_err(copy_error)?;
        if bytes_read == 0 {
            break;
        }
        dest_file
            .write_all(&buffer[..bytes_read])
            .map_err(copy_error)?;
        total_bytes += bytes_read as u64;
    }

    dest_file.flush().map_err(copy_error)?;

    Ok(total_bytes)
}
