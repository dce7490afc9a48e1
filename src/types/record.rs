//! HistoryElement - last known fingerprint of a scanned file

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Marker stored in place of a hash that was never recorded or not computed
pub const NO_HASH: &str = "-";

/// One history record per source path
///
/// Field names on disk stay compatible with existing history stores:
/// `{"FilePath": ..., "MD5Hash": ..., "ModifiedTime": ...}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HistoryElement {
    /// Absolute source path (unique key)
    #[serde(rename = "FilePath")]
    pub file_path: PathBuf,

    /// Lowercase hex digest, or [`NO_HASH`]
    #[serde(rename = "MD5Hash")]
    pub fingerprint_hash: String,

    /// Modification time in nanoseconds since the Unix epoch
    #[serde(rename = "ModifiedTime")]
    pub modified_time: i64,
}

impl HistoryElement {
    /// Create a record for a path
    pub fn new(file_path: PathBuf, fingerprint_hash: String, modified_time: i64) -> Self {
        Self {
            file_path,
            fingerprint_hash,
            modified_time,
        }
    }

    /// Synthetic record for a path that was never seen
    ///
    /// A stored record can carry the same values (timestamp policy, file
    /// stamped at the epoch), so absence is asked of the store instead.
    pub fn unseen(file_path: &Path) -> Self {
        Self::new(file_path.to_path_buf(), NO_HASH.to_string(), 0)
    }

    /// The recorded hash, if one was computed
    pub fn hash(&self) -> Option<&str> {
        if self.fingerprint_hash == NO_HASH {
            None
        } else {
            Some(&self.fingerprint_hash)
        }
    }
}
