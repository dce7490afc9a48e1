//! History persistence

mod store;

pub use store::HistoryStore;
