//! Copy resolver - places changed files in the output directory

pub mod copy;
pub mod resolve;

use crate::fingerprint::Fingerprint;
use crate::history::HistoryStore;
use crate::types::PapercopyError;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub use copy::copy_file;
pub use resolve::{decorated_name, resolve_destination, resolve_unclaimed};

/// A completed copy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyOutcome {
    /// Where the file landed (possibly a decorated name)
    pub destination: PathBuf,

    /// Bytes written
    pub bytes_copied: u64,
}

/// Copy `source` into `output_dir` and record its fingerprint
///
/// The history key is the source path, never the (possibly renamed)
/// destination. A [`PapercopyError::Persist`] here means the copy itself
/// succeeded; the file will be copied again on the next run.
pub fn copy_and_record(
    source: &Path,
    fingerprint: &Fingerprint,
    output_dir: &Path,
    history: &mut HistoryStore,
) -> Result<CopyOutcome, PapercopyError> {
    let base_name = base_name_of(source)?;
    let destination = resolve_destination(output_dir, &base_name)?;

    info!(
        source = %source.display(),
        destination = %destination.display(),
        "copying file"
    );
    let bytes_copied = copy_file(source, &destination)?;

    if let Err(err) = history.set(fingerprint.to_record(source)) {
        warn!(
            source = %source.display(),
            destination = %destination.display(),
            "file copied but history was not recorded"
        );
        return Err(err.with_destination(destination));
    }

    Ok(CopyOutcome {
        destination,
        bytes_copied,
    })
}

/// Final path component of `source` as a string
pub fn base_name_of(source: &Path) -> Result<String, PapercopyError> {
    source
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| PapercopyError::Copy {
            from: source.to_path_buf(),
            to: PathBuf::new(),
            source: std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "source path has no file name",
            ),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn fingerprint(hash: &str) -> Fingerprint {
        Fingerprint {
            hash: Some(hash.to_string()),
            modified_time: 99,
        }
    }

    #[test]
    fn test_copy_and_record_keys_history_by_source() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("in/a.txt");
        let output_dir = temp_dir.path().join("out");
        fs::create_dir_all(source.parent().unwrap()).unwrap();
        fs::create_dir_all(&output_dir).unwrap();
        fs::write(&source, b"hello").unwrap();
        fs::write(output_dir.join("a.txt"), b"older").unwrap();

        let mut history = HistoryStore::new(temp_dir.path().join("history.json"));
        let outcome = copy_and_record(&source, &fingerprint("abc"), &output_dir, &mut history)
            .unwrap();

        assert_eq!(outcome.destination, output_dir.join("(Copy 0)a.txt"));
        assert_eq!(outcome.bytes_copied, 5);
        assert_eq!(fs::read(output_dir.join("a.txt")).unwrap(), b"older");

        let record = history.get(&source);
        assert_eq!(record.fingerprint_hash, "abc");
        assert_eq!(record.modified_time, 99);
        assert!(!history.contains(&outcome.destination));
    }

    #[test]
    fn test_copy_failure_leaves_history_untouched() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("missing.txt");
        let mut history = HistoryStore::new(temp_dir.path().join("history.json"));

        let result = copy_and_record(
            &source,
            &fingerprint("abc"),
            &temp_dir.path().join("out"),
            &mut history,
        );

        assert!(matches!(result, Err(PapercopyError::Copy { .. })));
        assert!(history.is_empty());
        assert!(!temp_dir.path().join("history.json").exists());
    }

    #[test]
    fn test_persist_failure_after_copy() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("a.txt");
        let output_dir = temp_dir.path().join("out");
        fs::write(&source, b"hello").unwrap();
        let mut history = HistoryStore::new(temp_dir.path().join("no-such-dir/history.json"));

        let result = copy_and_record(&source, &fingerprint("abc"), &output_dir, &mut history);

        match result {
            Err(PapercopyError::Persist { destination, .. }) => {
                assert_eq!(destination, Some(output_dir.join("a.txt")));
            }
            other => panic!("expected persist failure, got {other:?}"),
        }
        assert_eq!(fs::read(output_dir.join("a.txt")).unwrap(), b"hello");
        assert!(!history.contains(&source));
    }

    #[test]
    fn test_base_name_of() {
        assert_eq!(base_name_of(Path::new("/in/sub/a.pdf")).unwrap(), "a.pdf");
        assert!(base_name_of(Path::new("/")).is_err());
    }
}
