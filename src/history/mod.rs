//! Search history persistence.

pub mod store;

pub use store::{HistoryError, SearchHistory, SearchHistoryRecord};
