//! Study and break history.
//!
//! Each finished study block and each finished break is logged, so the user
//! can see how much they studied today or this week.

pub mod entry;
pub mod storage;
pub mod summary;

pub use entry::{EntryKind, HistoryEntry};
pub use storage::HistoryStorage;
pub use summary::{HistorySummary, Period};
