//! # papercopy - Copy new and changed files into an intake directory
//!
//! Walks the configured scan paths, fingerprints every file with a wanted
//! extension (content hash or modification time) and copies the ones that
//! changed since the last run into an output directory. A JSON history store
//! remembers the last copied fingerprint per source path, so repeated runs
//! only copy what changed.

// Module declarations
pub mod commands;
pub mod config;
pub mod diff;
pub mod executor;
pub mod fingerprint;
pub mod hash;
pub mod history;
pub mod logging;
pub mod scanner;
pub mod types;
pub mod ui;

// Re-export commonly used types
pub use config::Config;
pub use history::HistoryStore;
pub use types::{HistoryElement, PapercopyError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
