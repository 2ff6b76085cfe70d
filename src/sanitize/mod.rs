//! Path sanitization
//!
//! Sanitization works on the string form of the whole output path, separators
//! included. Only `[./0-9A-Za-z_-]` survives: every maximal run of other
//! characters becomes one `_`, then every run of `_` collapses to one.

use camino::Utf8PathBuf;
use regex::Regex;
use std::path::{Path, MAIN_SEPARATOR};
use std::sync::OnceLock;

static DISALLOWED_RUN_RE: OnceLock<Regex> = OnceLock::new();
static UNDERSCORE_RUN_RE: OnceLock<Regex> = OnceLock::new();

/// Apply both substitution passes to `path`
///
/// The result only contains `[./0-9A-Za-z_-]` and never contains `__`.
/// Applying it twice gives the same string as applying it once.
///
/// # Example
/// ```
/// use sanitree::sanitize::sanitize;
///
/// assert_eq!(sanitize("/out/sub dir/c@d.txt"), "/out/sub_dir/c_d.txt");
/// assert_eq!(sanitize("a!!b.txt"), "a_b.txt");
/// assert_eq!(sanitize("a__b.txt"), "a_b.txt");
/// ```
pub fn sanitize(path: &str) -> String {
    let pass_one = DISALLOWED_RUN_RE
        .get_or_init(|| Regex::new(r"[^./0-9A-Za-z_-]+").expect("literal regex"))
        .replace_all(path, "_");
    UNDERSCORE_RUN_RE
        .get_or_init(|| Regex::new(r"_+").expect("literal regex"))
        .replace_all(&pass_one, "_")
        .into_owned()
}

/// Check whether `path` is already in sanitized form
pub fn is_sanitized(path: &str) -> bool {
    path.chars().all(is_allowed_char) && !path.contains("__")
}

fn is_allowed_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '/' | '_' | '-')
}

/// Build the sanitized destination for a file at `relative` under the input root
///
/// The raw destination is `output_root`, the platform separator and `relative`
/// concatenated as strings; the output root prefix is sanitized along with the
/// rest. Non-UTF-8 bytes are replaced lossily first and then substituted like
/// any other disallowed character, so the result is always valid UTF-8.
pub fn sanitized_output_path(output_root: &Path, relative: &Path) -> Utf8PathBuf {
    let raw = format!(
        "{}{}{}",
        output_root.to_string_lossy(),
        MAIN_SEPARATOR,
        relative.to_string_lossy()
    );
    Utf8PathBuf::from(sanitize(&raw))
}
