//! Main copy run

use crate::config::Config;
use crate::diff::has_changed;
use crate::executor::{base_name_of, copy_and_record, resolve_unclaimed, CopyOutcome};
use crate::fingerprint::{compute_fingerprint, Fingerprint, FingerprintPolicy};
use crate::history::HistoryStore;
use crate::scanner::walk_scan_path;
use crate::types::{HistoryElement, PapercopyError};
use crate::ui::ErrorRecord;
use std::collections::HashSet;
use std::fs::Metadata;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

/// Switches that do not come from the config file
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Decide and report, but do not copy or record anything
    pub dry_run: bool,
}

/// What happened to one accepted file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// Copied and recorded in history
    Copied(CopyOutcome),

    /// Fingerprint matches history
    Unchanged,

    /// Dry run: would have been copied to `destination`
    WouldCopy { destination: PathBuf },
}

/// Counters and per-file errors for a finished run
#[derive(Debug, Default)]
pub struct RunReport {
    pub copied: usize,
    pub unchanged: usize,
    /// Files whose extension is not configured
    pub skipped: usize,
    pub errors: usize,
    /// Copied but history not persisted (also counted in `errors`)
    pub unrecorded: usize,
    /// Dry run only
    pub would_copy: usize,
    pub bytes_copied: u64,
    pub error_records: Vec<ErrorRecord>,
}

impl RunReport {
    fn record_outcome(&mut self, outcome: &FileOutcome) {
        match outcome {
            FileOutcome::Copied(copy) => {
                self.copied += 1;
                self.bytes_copied += copy.bytes_copied;
            }
            FileOutcome::Unchanged => self.unchanged += 1,
            FileOutcome::WouldCopy { .. } => self.would_copy += 1,
        }
    }

    fn record_error(&mut self, err: PapercopyError) {
        error!("{}", err);
        self.errors += 1;
        if err.is_partial_success() {
            self.unrecorded += 1;
        }
        self.error_records.push(ErrorRecord::new(&err));
    }

    /// Total files that passed the extension filter
    pub fn processed(&self) -> usize {
        self.copied + self.unchanged + self.would_copy + self.errors
    }
}

/// Run one pass over every scan path
///
/// Only a history store that exists but cannot be loaded stops the run;
/// every per-file failure is counted and the next file is processed.
pub fn run(config: &Config, options: &RunOptions) -> Result<RunReport, PapercopyError> {
    let mut history = HistoryStore::load(&config.history_store_path)?;
    let mut report = RunReport::default();
    let mut planned = HashSet::new();

    info!(
        extensions = ?config.file_extensions,
        records = history.len(),
        dry_run = options.dry_run,
        "starting run"
    );

    for scan_path in &config.scan_paths {
        info!(scan_path = %scan_path.display(), "scanning");

        for item in walk_scan_path(scan_path) {
            let file = match item {
                Ok(file) => file,
                Err(err) => {
                    report.record_error(err);
                    continue;
                }
            };

            if !config.accepts(&file.path) {
                debug!(
                    path = %file.path.display(),
                    "extension not in configured list, skipping"
                );
                report.skipped += 1;
                continue;
            }

            match process_file(
                &file.path,
                &file.metadata,
                config,
                &mut history,
                options,
                &mut planned,
            ) {
                Ok(outcome) => report.record_outcome(&outcome),
                Err(err) => report.record_error(err),
            }
        }
    }

    Ok(report)
}

/// Fingerprint, compare and (if changed) copy a single file
///
/// `planned` collects the destinations a dry run has handed out so far,
/// so two sources with the same name are reported the way a real run
/// would place them. It is left untouched outside dry runs.
pub fn process_file(
    path: &Path,
    metadata: &Metadata,
    config: &Config,
    history: &mut HistoryStore,
    options: &RunOptions,
    planned: &mut HashSet<PathBuf>,
) -> Result<FileOutcome, PapercopyError> {
    let policy = config.fingerprint_policy();
    let fingerprint = compute_fingerprint(path, metadata, policy)?;

    log_comparison(path, &fingerprint, &history.get(path), policy);

    if !has_changed(&fingerprint, history.lookup(path), policy) {
        info!(path = %path.display(), "unchanged since last copy");
        return Ok(FileOutcome::Unchanged);
    }

    if options.dry_run {
        let destination =
            resolve_unclaimed(&config.output_dir, &base_name_of(path)?, planned)?;
        planned.insert(destination.clone());
        info!(
            source = %path.display(),
            destination = %destination.display(),
            "would copy file"
        );
        return Ok(FileOutcome::WouldCopy { destination });
    }

    match copy_and_record(path, &fingerprint, &config.output_dir, history) {
        Ok(outcome) => Ok(FileOutcome::Copied(outcome)),
        Err(err) => {
            if !err.is_partial_success() {
                warn!(path = %path.display(), "copy failed, history left unchanged");
            }
            Err(err)
        }
    }
}

fn log_comparison(
    path: &Path,
    current: &Fingerprint,
    historic: &HistoryElement,
    policy: FingerprintPolicy,
) {
    match policy {
        FingerprintPolicy::ContentHash(_) => info!(
            path = %path.display(),
            old_hash = %historic.fingerprint_hash,
            new_hash = current.hash.as_deref().unwrap_or_default(),
            "file info"
        ),
        FingerprintPolicy::ModifiedTime => info!(
            path = %path.display(),
            old_timestamp = historic.modified_time,
            new_timestamp = current.modified_time,
            "file info"
        ),
    }
}
