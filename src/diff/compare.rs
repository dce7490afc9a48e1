//! Change detection

use crate::fingerprint::{Fingerprint, FingerprintPolicy};
use crate::types::{HistoryElement, NO_HASH};

/// Decide whether a file changed since its history record was written
///
/// Pure comparison, no I/O:
///
/// 1. **Never seen**: no record in the store always counts as changed
/// 2. **Hashing**: compare `fingerprint_hash` for inequality
/// 3. **Timestamps**: compare `modified_time` for inequality
///
/// Absence is decided by the store, not by the record's values: a file
/// stamped at the epoch under the timestamp policy is stored as `"-"`/`0`
/// and must still compare as unchanged afterwards.
///
/// Content edits that keep the timestamp are not seen under
/// [`FingerprintPolicy::ModifiedTime`].
pub fn has_changed(
    current: &Fingerprint,
    historic: Option<&HistoryElement>,
    policy: FingerprintPolicy,
) -> bool {
    let Some(historic) = historic else {
        return true;
    };

    match policy {
        FingerprintPolicy::ContentHash(_) => {
            let current_hash = current.hash.as_deref().unwrap_or(NO_HASH);
            historic.fingerprint_hash != current_hash
        }
        FingerprintPolicy::ModifiedTime => historic.modified_time != current.modified_time,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::HashAlgorithm;
    use std::path::{Path, PathBuf};

    const HASHING: FingerprintPolicy = FingerprintPolicy::ContentHash(HashAlgorithm::Md5);

    fn record(hash: &str, mtime: i64) -> HistoryElement {
        HistoryElement::new(PathBuf::from("/in/a.txt"), hash.to_string(), mtime)
    }

    fn fingerprint(hash: Option<&str>, mtime: i64) -> Fingerprint {
        Fingerprint {
            hash: hash.map(str::to_string),
            modified_time: mtime,
        }
    }

    #[test]
    fn test_missing_record_is_changed_under_both_policies() {
        assert!(has_changed(&fingerprint(Some("abc"), 5), None, HASHING));
        assert!(has_changed(
            &fingerprint(None, 5),
            None,
            FingerprintPolicy::ModifiedTime
        ));
        assert!(has_changed(
            &fingerprint(None, 0),
            None,
            FingerprintPolicy::ModifiedTime
        ));
    }

    #[test]
    fn test_stored_epoch_timestamp_is_unchanged() {
        // Same values as the synthetic record, but actually stored
        let stored = HistoryElement::unseen(Path::new("/in/a.txt"));

        assert!(!has_changed(
            &fingerprint(None, 0),
            Some(&stored),
            FingerprintPolicy::ModifiedTime
        ));
        assert!(has_changed(
            &fingerprint(None, 1),
            Some(&stored),
            FingerprintPolicy::ModifiedTime
        ));
    }

    #[test]
    fn test_same_hash_is_unchanged() {
        assert!(!has_changed(
            &fingerprint(Some("abc"), 10),
            Some(&record("abc", 5)),
            HASHING
        ));
    }

    #[test]
    fn test_different_hash_is_changed() {
        assert!(has_changed(
            &fingerprint(Some("def"), 5),
            Some(&record("abc", 5)),
            HASHING
        ));
    }

    #[test]
    fn test_timestamp_policy_ignores_hash() {
        // Content changed but the timestamp did not
        assert!(!has_changed(
            &fingerprint(None, 5),
            Some(&record("abc", 5)),
            FingerprintPolicy::ModifiedTime
        ));
    }

    #[test]
    fn test_timestamp_policy_detects_any_difference() {
        let policy = FingerprintPolicy::ModifiedTime;

        assert!(has_changed(&fingerprint(None, 6), Some(&record("-", 5)), policy));
        // Older timestamps count too (e.g. a restored backup)
        assert!(has_changed(&fingerprint(None, 4), Some(&record("-", 5)), policy));
    }

    #[test]
    fn test_hash_policy_against_timestamp_only_record() {
        // Record written while hashing was disabled
        assert!(has_changed(
            &fingerprint(Some("abc"), 5),
            Some(&record("-", 5)),
            HASHING
        ));
    }
}
