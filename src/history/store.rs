//! JSON-backed history store
//!
//! The store maps each source path to its last recorded fingerprint and is
//! mirrored to disk as a single JSON array. Every `set` rewrites the whole
//! document.

use crate::types::{HistoryElement, PapercopyError};
use std::collections::HashMap;
use std::fs;
use std::io::{Error, ErrorKind};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Durable mapping from source path to last known fingerprint
#[derive(Debug)]
pub struct HistoryStore {
    path: PathBuf,
    entries: HashMap<PathBuf, HistoryElement>,
}

impl HistoryStore {
    /// Empty store that will persist to `path`
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            entries: HashMap::new(),
        }
    }

    /// Load the store from `path`
    ///
    /// A missing file yields an empty store. An unreadable or malformed file
    /// is [`PapercopyError::CorruptHistory`]; partial history is never used.
    pub fn load(path: &Path) -> Result<Self, PapercopyError> {
        let corrupt = |reason: String| PapercopyError::CorruptHistory {
            path: path.to_path_buf(),
            reason,
        };

        let content = match fs::read(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "history store does not exist, a new one will be created"
                );
                return Ok(Self::new(path.to_path_buf()));
            }
            Err(e) => return Err(corrupt(e.to_string())),
        };

        // `null` is what older tools wrote for an empty history
        let records: Option<Vec<HistoryElement>> =
            serde_json::from_slice(&content).map_err(|e| corrupt(e.to_string()))?;

        let mut store = Self::new(path.to_path_buf());
        for record in records.unwrap_or_default() {
            store.entries.insert(record.file_path.clone(), record);
        }

        debug!(
            path = %path.display(),
            records = store.entries.len(),
            "loaded history store"
        );
        Ok(store)
    }

    /// Record for `file_path`, or the synthetic "never seen" record
    pub fn get(&self, file_path: &Path) -> HistoryElement {
        self.entries
            .get(file_path)
            .cloned()
            .unwrap_or_else(|| HistoryElement::unseen(file_path))
    }

    /// Stored record for `file_path`, `None` when it was never recorded
    pub fn lookup(&self, file_path: &Path) -> Option<&HistoryElement> {
        self.entries.get(file_path)
    }

    /// Insert or overwrite the record for `element.file_path` and persist
    ///
    /// When the write fails the previous record (or its absence) is
    /// restored, so a later successful save cannot record this file.
    pub fn set(&mut self, element: HistoryElement) -> Result<(), PapercopyError> {
        let file_path = element.file_path.clone();
        let previous = self.entries.insert(file_path.clone(), element);

        if let Err(source) = self.save() {
            match previous {
                Some(previous) => self.entries.insert(file_path.clone(), previous),
                None => self.entries.remove(&file_path),
            };
            return Err(PapercopyError::Persist {
                path: file_path,
                store: self.path.clone(),
                destination: None,
                source,
            });
        }

        Ok(())
    }

    /// Rewrite the whole document
    ///
    /// Written to a sibling `.part` file first and renamed over the store.
    pub fn save(&self) -> Result<(), Error> {
        let mut records: Vec<&HistoryElement> = self.entries.values().collect();
        records.sort_by(|a, b| a.file_path.cmp(&b.file_path));

        let json = serde_json::to_vec(&records).map_err(Error::other)?;

        let part_path = part_path_for(&self.path);
        fs::write(&part_path, json)?;
        fs::rename(&part_path, &self.path)?;
        Ok(())
    }

    /// Whether a record exists for `file_path`
    pub fn contains(&self, file_path: &Path) -> bool {
        self.entries.contains_key(file_path)
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterator over all records, in no particular order
    pub fn iter(&self) -> impl Iterator<Item = &HistoryElement> {
        self.entries.values()
    }

    /// Location of the JSON document
    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn part_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".part");
    path.with_file_name(name)
}
