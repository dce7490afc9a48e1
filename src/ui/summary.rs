//! End-of-run summary and error report

use crate::commands::RunReport;
use crate::types::PapercopyError;
use indicatif::HumanBytes;
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::PathBuf;

/// One per-file failure, phrased for the person running the tool
#[derive(Debug, Clone)]
pub struct ErrorRecord {
    pub kind: &'static str,
    pub path: Option<PathBuf>,
    pub message: String,
    pub suggestion: Option<String>,
}

impl ErrorRecord {
    pub fn new(error: &PapercopyError) -> Self {
        let (message, suggestion) = humanize_error(error);
        Self {
            kind: error.kind_label(),
            path: error.path().map(PathBuf::from),
            message,
            suggestion,
        }
    }
}

fn humanize_io(io: &std::io::Error) -> (String, Option<String>) {
    match io.kind() {
        ErrorKind::NotFound => (
            "File or directory was not found".to_string(),
            Some("Verify the path still exists and retry.".to_string()),
        ),
        ErrorKind::PermissionDenied => (
            "Permission denied while accessing file".to_string(),
            Some("Check file permissions or run with a user that has access.".to_string()),
        ),
        ErrorKind::WriteZero | ErrorKind::UnexpectedEof => (
            "File transfer was interrupted before completion".to_string(),
            Some("Check disk health and free space, then run again.".to_string()),
        ),
        _ => (format!("I/O operation failed: {}", io), None),
    }
}

fn humanize_error(error: &PapercopyError) -> (String, Option<String>) {
    match error {
        PapercopyError::Read { source, .. } => {
            let (message, suggestion) = humanize_io(source);
            (format!("Could not read file for hashing: {}", message), suggestion)
        }
        PapercopyError::Copy { to, source, .. } => (
            format!("Copy to {} failed: {}", to.display(), humanize_io(source).0),
            Some(
                "Check free space and permissions on output_dir. A partial file may remain."
                    .to_string(),
            ),
        ),
        PapercopyError::Persist {
            store, destination, ..
        } => (
            match destination {
                Some(destination) => format!(
                    "File was copied to {} but its history was not recorded",
                    destination.display()
                ),
                None => "File was copied but its history was not recorded".to_string(),
            },
            Some(format!(
                "Fix write access to {}; the file will be copied again on the next run.",
                store.display()
            )),
        ),
        PapercopyError::Walk { reason, .. } => (
            reason.clone(),
            Some("Verify the scan path exists and is readable.".to_string()),
        ),
        PapercopyError::Io(io) => humanize_io(io),
        PapercopyError::Usage(msg) | PapercopyError::Config(msg) => (msg.clone(), None),
        PapercopyError::ConfigParse { reason, .. }
        | PapercopyError::CorruptHistory { reason, .. } => (reason.clone(), None),
    }
}

/// Group errors by kind, listing at most three per kind
pub fn format_error_summary(records: &[ErrorRecord]) -> String {
    let mut groups: BTreeMap<&'static str, Vec<&ErrorRecord>> = BTreeMap::new();
    for record in records {
        groups.entry(record.kind).or_default().push(record);
    }

    let mut lines = Vec::new();
    lines.push("Error summary:".to_string());
    for (kind, items) in groups {
        lines.push(format!("  {} ({}):", kind, items.len()));
        for record in items.iter().take(3) {
            lines.push(format!("    - {}", record.message));
            if let Some(path) = &record.path {
                lines.push(format!("      Path: {}", path.display()));
            }
            if let Some(suggestion) = &record.suggestion {
                lines.push(format!("      Try: {}", suggestion));
            }
        }
        if items.len() > 3 {
            lines.push(format!("    - ... {} more", items.len() - 3));
        }
    }
    lines.join("\n")
}

/// Final counts printed after every run
pub fn format_summary(report: &RunReport, dry_run: bool) -> String {
    let mut lines = vec![String::new(), "COMPLETE".to_string()];

    if dry_run {
        lines.push(format!("\tFiles To Copy: {}", report.would_copy));
    } else {
        lines.push(format!(
            "\tFiles Copied: {} ({})",
            report.copied,
            HumanBytes(report.bytes_copied)
        ));
    }
    lines.push(format!("\tFiles Unchanged: {}", report.unchanged));
    lines.push(format!("\tFiles Skipped: {}", report.skipped));
    lines.push(format!("\tFiles With Errors: {}", report.errors));
    if report.unrecorded > 0 {
        lines.push(format!(
            "\tCopied But Not Recorded: {}",
            report.unrecorded
        ));
    }
    if dry_run {
        lines.push("Dry-run mode: no changes were made.".to_string());
    }

    lines.join("\n")
}
