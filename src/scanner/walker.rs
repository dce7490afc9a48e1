//! Sequential directory walker

use crate::types::PapercopyError;
use std::fs::Metadata;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A regular file found under a scan path
#[derive(Debug)]
pub struct ScannedFile {
    /// Absolute path (the scan root is canonicalized)
    pub path: PathBuf,

    /// Metadata as read during the walk (symlinks are not followed)
    pub metadata: Metadata,
}

/// Iterator over the regular files below one scan path
///
/// Directories, symlinks and special files are skipped. Traversal errors
/// are yielded as [`PapercopyError::Walk`] items and the walk continues.
pub struct ScanWalk {
    root: PathBuf,
    inner: Option<ignore::Walk>,
    pending_error: Option<PapercopyError>,
}

/// Walk `root` recursively
///
/// Uses the `ignore` crate with every filter disabled: hidden files and
/// files listed in `.gitignore` are visited too. Entries within a directory
/// are visited in file-name order.
pub fn walk_scan_path(root: &Path) -> ScanWalk {
    match root.canonicalize() {
        Ok(canonical) => {
            let inner = ignore::WalkBuilder::new(&canonical)
                .standard_filters(false)
                .follow_links(false)
                .sort_by_file_name(|a, b| a.cmp(b))
                .build();
            ScanWalk {
                root: canonical,
                inner: Some(inner),
                pending_error: None,
            }
        }
        Err(e) => ScanWalk {
            root: root.to_path_buf(),
            inner: None,
            pending_error: Some(PapercopyError::Walk {
                root: root.to_path_buf(),
                reason: format!("cannot resolve scan path: {}", e),
            }),
        },
    }
}

impl ScanWalk {
    /// Root being walked (canonical when resolution succeeded)
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn walk_error(&self, reason: String) -> PapercopyError {
        PapercopyError::Walk {
            root: self.root.clone(),
            reason,
        }
    }
}

impl Iterator for ScanWalk {
    type Item = Result<ScannedFile, PapercopyError>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(err) = self.pending_error.take() {
            return Some(Err(err));
        }

        loop {
            let result = self.inner.as_mut()?.next()?;

            let entry = match result {
                Ok(entry) => entry,
                Err(e) => return Some(Err(self.walk_error(e.to_string()))),
            };

            let file_type = match entry.file_type() {
                Some(ft) => ft,
                None => continue, // stdin, never produced for path roots
            };

            if file_type.is_dir() {
                continue;
            }

            if !file_type.is_file() {
                debug!(path = %entry.path().display(), "skipping non-regular file");
                continue;
            }

            return Some(match entry.metadata() {
                Ok(metadata) => Ok(ScannedFile {
                    path: entry.into_path(),
                    metadata,
                }),
                Err(e) => Err(self.walk_error(format!(
                    "failed to read metadata for {}: {}",
                    entry.path().display(),
                    e
                ))),
            });
        }
    }
}
