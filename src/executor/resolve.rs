//! Collision-free destination naming

use crate::types::PapercopyError;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Name of the `counter`-th alternative for `base_name`
pub fn decorated_name(base_name: &str, counter: u64) -> String {
    format!("(Copy {counter}){base_name}")
}

/// Pick a destination in `output_dir` that does not exist yet
///
/// Tries `base_name`, then `(Copy 0)base_name`, `(Copy 1)base_name`, ...
/// Each candidate gets a fresh existence check. Checking and creating are
/// separate steps, so this is only collision-free for a single writer.
pub fn resolve_destination(output_dir: &Path, base_name: &str) -> Result<PathBuf, PapercopyError> {
    resolve_unclaimed(output_dir, base_name, &HashSet::new())
}

/// Like [`resolve_destination`], also passing over names in `claimed`
///
/// Dry runs create nothing, so the names they would have taken are
/// tracked here instead of on disk.
pub fn resolve_unclaimed(
    output_dir: &Path,
    base_name: &str,
    claimed: &HashSet<PathBuf>,
) -> Result<PathBuf, PapercopyError> {
    let mut candidate = output_dir.join(base_name);
    let mut counter = 0u64;

    while claimed.contains(&candidate) || exists(&candidate, output_dir)? {
        candidate = output_dir.join(decorated_name(base_name, counter));
        counter += 1;
    }

    Ok(candidate)
}

fn exists(candidate: &Path, output_dir: &Path) -> Result<bool, PapercopyError> {
    // symlink_metadata so a dangling link still counts as taken
    match candidate.symlink_metadata() {
        Ok(_) => Ok(true),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(source) => Err(PapercopyError::Copy {
            from: output_dir.to_path_buf(),
            to: candidate.to_path_buf(),
            source,
        }),
    }
}
