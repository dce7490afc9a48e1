//! Change detector - compares current fingerprints with history

mod compare;

pub use compare::has_changed;
