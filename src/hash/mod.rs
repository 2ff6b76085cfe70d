//! Hashing utilities for `--verify`

use crate::types::SanitizeError;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Compute the Blake3 hash of a file, streamed in 64KB chunks
///
/// # Example
/// ```no_run
/// use sanitree::hash::compute_hash;
/// use std::path::Path;
///
/// let hash = compute_hash(Path::new("file.txt"))?;
/// # Ok::<(), sanitree::types::SanitizeError>(())
/// ```
pub fn compute_hash(file_path: &Path) -> Result<[u8; 32], SanitizeError> {
    let mut file = File::open(file_path)?;
    let mut hasher = blake3::Hasher::new();
    let mut buffer = vec![0u8; 64 * 1024];

    loop {
        let bytes_read = file.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(*hasher.finalize().as_bytes())
}

/// Check that `dest` holds exactly the bytes of `src`
///
/// # Errors
/// * `SanitizeError::ChecksumMismatch` naming `dest` when the hashes differ
pub fn verify_copy(src: &Path, dest: &Path) -> Result<(), SanitizeError> {
    if compute_hash(src)? != compute_hash(dest)? {
        return Err(SanitizeError::ChecksumMismatch {
            path: dest.to_path_buf(),
        });
    }
    Ok(())
}
