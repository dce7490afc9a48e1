//! Error types for papercopy

use std::path::PathBuf;
use thiserror::Error;

/// Error types for papercopy operations
#[derive(Debug, Error)]
pub enum PapercopyError {
    /// Missing or invalid command-line usage
    #[error("Usage error: {0}")]
    Usage(String),

    /// Config file could not be read or is not valid JSON
    #[error("Failed to load config {path}: {reason}")]
    ConfigParse { path: PathBuf, reason: String },

    /// Config parsed but holds unusable values
    #[error("Configuration error: {0}")]
    Config(String),

    /// History store exists but cannot be read or parsed
    #[error("History store {path} is corrupt: {reason}")]
    CorruptHistory { path: PathBuf, reason: String },

    /// Scanned file could not be opened or read
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Copy into the output directory failed
    #[error("Failed to copy {from} to {to}: {source}")]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// History store could not be rewritten after recording `path`
    ///
    /// `destination` is where the unrecorded copy landed; the store itself
    /// leaves it empty and the copy resolver fills it in.
    #[error("History for {path} could not be written to {store}: {source}")]
    Persist {
        path: PathBuf,
        store: PathBuf,
        destination: Option<PathBuf>,
        #[source]
        source: std::io::Error,
    },

    /// Directory traversal failed for an entry
    #[error("Walk error under {root}: {reason}")]
    Walk { root: PathBuf, reason: String },

    /// Standard IO error (automatically converted via #[from])
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PapercopyError {
    /// Errors that must stop the whole run
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            PapercopyError::Usage(_)
                | PapercopyError::ConfigParse { .. }
                | PapercopyError::Config(_)
                | PapercopyError::CorruptHistory { .. }
        )
    }

    /// Copy went through but bookkeeping did not
    pub fn is_partial_success(&self) -> bool {
        matches!(self, PapercopyError::Persist { .. })
    }

    /// Short label used when grouping errors in the run report
    pub fn kind_label(&self) -> &'static str {
        match self {
            PapercopyError::Usage(_) => "Usage error",
            PapercopyError::ConfigParse { .. } => "Config parse error",
            PapercopyError::Config(_) => "Configuration error",
            PapercopyError::CorruptHistory { .. } => "Corrupt history",
            PapercopyError::Read { .. } => "Read error",
            PapercopyError::Copy { .. } => "Copy error",
            PapercopyError::Persist { .. } => "History not recorded",
            PapercopyError::Walk { .. } => "Walk error",
            PapercopyError::Io(_) => "I/O error",
        }
    }

    /// Attach the copy destination to a [`PapercopyError::Persist`]
    ///
    /// Other variants are returned unchanged.
    pub fn with_destination(self, copied_to: PathBuf) -> Self {
        match self {
            PapercopyError::Persist {
                path,
                store,
                source,
                ..
            } => PapercopyError::Persist {
                path,
                store,
                destination: Some(copied_to),
                source,
            },
            other => other,
        }
    }

    /// Path the error is about, when there is one
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            PapercopyError::ConfigParse { path, .. }
            | PapercopyError::CorruptHistory { path, .. }
            | PapercopyError::Read { path, .. }
            | PapercopyError::Persist { path, .. } => Some(path),
            PapercopyError::Copy { from, .. } => Some(from),
            PapercopyError::Walk { root, .. } => Some(root),
            PapercopyError::Usage(_) | PapercopyError::Config(_) | PapercopyError::Io(_) => None,
        }
    }
}
