//! Configuration management

use crate::sanitize::sanitize;
use crate::types::SanitizeError;
use clap::Parser;
use std::path::{Path, PathBuf};

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Copy a directory tree, retaining only `[./0-9A-Za-z_-]` in paths. \
             Other characters are changed to `_`.",
    long_about = None
)]
pub struct Cli {
    /// Directory containing (read-only) input files
    #[arg(value_name = "INPUT_DIR")]
    pub input_dir: PathBuf,

    /// Directory where sanitized copies are written
    #[arg(value_name = "OUTPUT_DIR")]
    pub output_dir: PathBuf,

    /// Skip files matching this glob (relative to INPUT_DIR, repeatable)
    #[arg(short = 'e', long = "exclude", value_name = "GLOB")]
    pub exclude: Vec<String>,

    /// Show what would be copied without writing anything
    #[arg(short = 'n', long = "dry-run")]
    pub dry_run: bool,

    /// Hash source and destination after each copy
    #[arg(long = "verify")]
    pub verify: bool,

    /// Print the run summary as JSON
    #[arg(long = "json")]
    pub json: bool,
}

/// Validated run configuration
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Input root, walked recursively and never written
    pub input_root: PathBuf,

    /// Output root, created on demand and never read
    pub output_root: PathBuf,

    /// Exclude patterns (gitignore-style globs)
    pub exclude_patterns: Vec<String>,

    /// Dry run (log, don't write)
    pub dry_run: bool,

    /// Blake3-compare each copy with its source
    pub verify: bool,

    /// Emit the summary as JSON instead of a human line
    pub json: bool,
}

impl Config {
    /// Config for a plain run from `input_root` to `output_root`
    pub fn new(input_root: impl Into<PathBuf>, output_root: impl Into<PathBuf>) -> Self {
        Self {
            input_root: input_root.into(),
            output_root: output_root.into(),
            ..Default::default()
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), SanitizeError> {
        if !self.input_root.exists() {
            return Err(SanitizeError::Config(format!(
                "Input path does not exist: {:?}",
                self.input_root
            )));
        }

        if !self.input_root.is_dir() {
            return Err(SanitizeError::Config(format!(
                "Input path is not a directory: {:?}",
                self.input_root
            )));
        }

        // Files land under the sanitized form of the output root, so that is
        // the path that must stay clear of the input tree.
        let sanitized_output = PathBuf::from(sanitize(&self.output_root.to_string_lossy()));
        let input = normalize(&self.input_root);
        let output = normalize(&sanitized_output);

        if input == output {
            return Err(SanitizeError::Config(
                "Input and output directories cannot be the same".to_string(),
            ));
        }

        if output.starts_with(&input) {
            return Err(SanitizeError::Config(format!(
                "Output directory {:?} lies inside input directory {:?}",
                self.output_root, self.input_root
            )));
        }

        Ok(())
    }
}

impl TryFrom<Cli> for Config {
    type Error = SanitizeError;

    fn try_from(cli: Cli) -> Result<Self, Self::Error> {
        let config = Config {
            input_root: cli.input_dir,
            output_root: cli.output_dir,
            exclude_patterns: cli.exclude,
            dry_run: cli.dry_run,
            verify: cli.verify,
            json: cli.json,
        };
        config.validate()?;
        Ok(config)
    }
}

/// Absolute, symlink-resolved form where possible
///
/// The output root may not exist yet, so fall back to canonicalizing its
/// nearest existing ancestor and re-appending the rest.
fn normalize(path: &Path) -> PathBuf {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    canonicalize_existing(&absolute)
}

fn canonicalize_existing(path: &Path) -> PathBuf {
    if let Ok(canonical) = path.canonicalize() {
        return canonical;
    }
    match (path.parent(), path.file_name()) {
        (Some(parent), Some(name)) => canonicalize_existing(parent).join(name),
        _ => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn cli(input: &Path, output: &Path) -> Cli {
        Cli {
            input_dir: input.to_path_buf(),
            output_dir: output.to_path_buf(),
            exclude: vec![],
            dry_run: false,
            verify: false,
            json: false,
        }
    }

    #[test]
    fn test_valid_config() {
        let input = TempDir::new().expect("Failed to create temp dir");
        let output = TempDir::new().expect("Failed to create temp dir");

        let config = Config::try_from(cli(input.path(), &output.path().join("fresh")))
            .expect("config should validate");
        assert_eq!(config.input_root, input.path());
        assert!(!config.dry_run);
    }

    #[test]
    fn test_missing_input_rejected() {
        let output = TempDir::new().expect("Failed to create temp dir");
        let err = Config::try_from(cli(Path::new("/nonexistent/input"), output.path()))
            .unwrap_err();
        assert!(err.is_config_error());
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn test_file_as_input_rejected() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let file = dir.path().join("file.txt");
        std::fs::write(&file, b"x").expect("Failed to write");

        let err = Config::try_from(cli(&file, &dir.path().join("out"))).unwrap_err();
        assert!(err.to_string().contains("not a directory"));
    }

    #[test]
    fn test_same_input_and_output_rejected() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let err = Config::try_from(cli(dir.path(), dir.path())).unwrap_err();
        assert!(err.to_string().contains("cannot be the same"));
    }

    #[test]
    fn test_output_inside_input_rejected() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let nested = dir.path().join("not").join("yet").join("there");

        let err = Config::try_from(cli(dir.path(), &nested)).unwrap_err();
        assert!(err.to_string().contains("inside input"));
    }

    #[test]
    fn test_output_sanitizing_onto_input_rejected() {
        let base = TempDir::new().expect("Failed to create temp dir");
        let input = base.path().join("a_b");
        std::fs::create_dir(&input).expect("Failed to create input dir");
        std::fs::write(input.join("keep.txt"), b"precious").expect("Failed to write");

        let err = Config::try_from(cli(&input, &base.path().join("a b"))).unwrap_err();

        assert!(err.to_string().contains("cannot be the same"));
        assert_eq!(std::fs::read(input.join("keep.txt")).unwrap(), b"precious");
    }

    #[test]
    fn test_output_sanitizing_into_input_rejected() {
        let base = TempDir::new().expect("Failed to create temp dir");
        let input = base.path().join("a_b");
        std::fs::create_dir(&input).expect("Failed to create input dir");

        let err = Config::try_from(cli(&input, &base.path().join("a b").join("out"))).unwrap_err();

        assert!(err.to_string().contains("inside input"));
    }

    #[test]
    fn test_output_sanitizing_elsewhere_accepted() {
        let base = TempDir::new().expect("Failed to create temp dir");
        let input = base.path().join("a_b");
        std::fs::create_dir(&input).expect("Failed to create input dir");

        assert!(Config::try_from(cli(&input, &base.path().join("a c"))).is_ok());
    }

    #[test]
    fn test_cli_parses_flags() {
        let parsed = Cli::try_parse_from([
            "sanitree",
            "/in",
            "/out",
            "--exclude",
            "*.log",
            "-e",
            "tmp/",
            "--dry-run",
            "--verify",
            "--json",
        ])
        .expect("arguments should parse");

        assert_eq!(parsed.input_dir, PathBuf::from("/in"));
        assert_eq!(parsed.output_dir, PathBuf::from("/out"));
        assert_eq!(parsed.exclude, vec!["*.log".to_string(), "tmp/".to_string()]);
        assert!(parsed.dry_run && parsed.verify && parsed.json);
    }

    #[test]
    fn test_cli_requires_both_paths() {
        assert!(Cli::try_parse_from(["sanitree", "/in"]).is_err());
    }
}
