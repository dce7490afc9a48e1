//! Configuration management

use crate::fingerprint::FingerprintPolicy;
use crate::hash::HashAlgorithm;
use crate::types::PapercopyError;
use clap::Parser;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Command-line arguments
#[derive(Debug, Parser)]
#[command(name = "papercopy", version, about)]
pub struct Cli {
    /// Path to the JSON config file
    #[arg(value_name = "CONFIG")]
    pub config_path: PathBuf,

    /// Report what would be copied without copying or recording anything
    #[arg(long)]
    pub dry_run: bool,

    /// Log per-file decisions at debug level
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Config path, checked to point at an existing file
    pub fn config_file(&self) -> Result<&Path, PapercopyError> {
        if self.config_path.is_file() {
            Ok(&self.config_path)
        } else {
            Err(PapercopyError::Usage(format!(
                "please provide a valid path to a config file (got {})",
                self.config_path.display()
            )))
        }
    }
}

/// The config file as written on disk
///
/// Unknown keys are a parse error, including keys that earlier copier
/// tools silently ignored; such configs must drop them before upgrading.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub file_extensions: Vec<String>,
    pub scan_paths: Vec<PathBuf>,
    pub output_dir: PathBuf,
    pub history_store_path: PathBuf,
    pub calculate_md5_hash: bool,
    #[serde(default)]
    pub hash_algorithm: HashAlgorithm,
}

/// Normalized configuration, immutable for the duration of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Lowercase extensions without leading dots
    pub file_extensions: BTreeSet<String>,

    /// Roots to walk, in order
    pub scan_paths: Vec<PathBuf>,

    /// Where changed files are copied to
    pub output_dir: PathBuf,

    /// JSON history document
    pub history_store_path: PathBuf,

    /// Hash contents instead of comparing modification times
    pub calculate_md5_hash: bool,

    /// Digest used when hashing
    pub hash_algorithm: HashAlgorithm,
}

impl Config {
    /// Read, parse, normalize and validate a config file
    pub fn load(path: &Path) -> Result<Self, PapercopyError> {
        let parse_error = |reason: String| PapercopyError::ConfigParse {
            path: path.to_path_buf(),
            reason,
        };

        let content = fs::read_to_string(path).map_err(|e| parse_error(e.to_string()))?;
        let file: ConfigFile =
            serde_json::from_str(&content).map_err(|e| parse_error(e.to_string()))?;

        let config = Config::from(file);
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), PapercopyError> {
        if self.output_dir.as_os_str().is_empty() {
            return Err(PapercopyError::Config(
                "output_dir must not be empty".to_string(),
            ));
        }

        if self.history_store_path.as_os_str().is_empty() {
            return Err(PapercopyError::Config(
                "history_store_path must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Which fingerprint drives change detection
    pub fn fingerprint_policy(&self) -> FingerprintPolicy {
        if self.calculate_md5_hash {
            FingerprintPolicy::ContentHash(self.hash_algorithm)
        } else {
            FingerprintPolicy::ModifiedTime
        }
    }

    /// Whether `path` has one of the configured extensions
    pub fn accepts(&self, path: &Path) -> bool {
        extension_of(path).is_some_and(|ext| self.file_extensions.contains(&ext))
    }
}

impl From<ConfigFile> for Config {
    fn from(file: ConfigFile) -> Self {
        Self {
            file_extensions: normalize_extensions(&file.file_extensions),
            scan_paths: file.scan_paths,
            output_dir: file.output_dir,
            history_store_path: file.history_store_path,
            calculate_md5_hash: file.calculate_md5_hash,
            hash_algorithm: file.hash_algorithm,
        }
    }
}

/// Lowercase and strip leading dots: `[".PDF", "txt"]` becomes `{"pdf", "txt"}`
pub fn normalize_extensions<S: AsRef<str>>(extensions: &[S]) -> BTreeSet<String> {
    extensions
        .iter()
        .map(|ext| normalize_extension(ext.as_ref()))
        .collect()
}

fn normalize_extension(extension: &str) -> String {
    extension.trim_start_matches('.').to_lowercase()
}

/// Normalized extension of `path`, `None` when it has none
pub fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .map(|ext| normalize_extension(&ext.to_string_lossy()))
}
