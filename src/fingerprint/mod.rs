//! Fingerprint policy
//!
//! A fingerprint is what the change detector compares against history:
//! the content hash when hashing is enabled, otherwise the modification
//! time. The modification time is captured in both modes because history
//! records store it either way.

use crate::hash::{compute_hash, HashAlgorithm};
use crate::types::{HistoryElement, PapercopyError, NO_HASH};
use filetime::FileTime;
use std::fs::Metadata;
use std::path::{Path, PathBuf};

/// Which field drives the changed/unchanged decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FingerprintPolicy {
    /// Compare content hashes
    ContentHash(HashAlgorithm),

    /// Compare modification times
    ModifiedTime,
}

impl FingerprintPolicy {
    pub fn is_hashing(&self) -> bool {
        matches!(self, FingerprintPolicy::ContentHash(_))
    }
}

/// Current state of a scanned file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fingerprint {
    /// Content hash, present only under [`FingerprintPolicy::ContentHash`]
    pub hash: Option<String>,

    /// Modification time in nanoseconds since the Unix epoch
    pub modified_time: i64,
}

impl Fingerprint {
    /// Build the history record to store for `file_path`
    pub fn to_record(&self, file_path: &Path) -> HistoryElement {
        HistoryElement::new(
            PathBuf::from(file_path),
            self.hash.clone().unwrap_or_else(|| NO_HASH.to_string()),
            self.modified_time,
        )
    }
}

/// Compute the fingerprint of a file under the given policy
///
/// Only the hashing policy touches file contents; a read failure there is
/// reported as [`PapercopyError::Read`].
pub fn compute_fingerprint(
    file_path: &Path,
    metadata: &Metadata,
    policy: FingerprintPolicy,
) -> Result<Fingerprint, PapercopyError> {
    let modified_time = modified_time_nanos(metadata);

    let hash = match policy {
        FingerprintPolicy::ContentHash(algorithm) => Some(compute_hash(file_path, algorithm)?),
        FingerprintPolicy::ModifiedTime => None,
    };

    Ok(Fingerprint {
        hash,
        modified_time,
    })
}

/// Modification time as nanoseconds since the Unix epoch
///
/// Negative for pre-epoch timestamps; saturates at the `i64` range.
pub fn modified_time_nanos(metadata: &Metadata) -> i64 {
    let mtime = FileTime::from_last_modification_time(metadata);
    mtime
        .unix_seconds()
        .saturating_mul(1_000_000_000)
        .saturating_add(i64::from(mtime.nanoseconds()))
}
