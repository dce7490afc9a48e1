//! Terminal output

mod summary;

pub use summary::{format_error_summary, format_summary, ErrorRecord};
