//! Local todo list.
//!
//! Todos live in the local database: add, complete, reopen, archive the
//! finished ones, remove.

pub mod storage;
pub mod todo;

pub use storage::TodoStorage;
pub use todo::Todo;
