//! Directory scanning logic

mod walker;

pub use walker::{walk_scan_path, ScanWalk, ScannedFile};
