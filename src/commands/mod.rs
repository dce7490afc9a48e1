//! Commands exposed by the binary

pub mod run;

pub use run::{process_file, run, FileOutcome, RunOptions, RunReport};
