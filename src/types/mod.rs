//! Core type definitions for papercopy

mod error;
mod record;

pub use error::PapercopyError;
pub use record::{HistoryElement, NO_HASH};
