//! Storage layer for studydesk.
//!
//! This module provides SQLite-based persistence for:
//! - Todos
//! - Study and break history

mod database;
mod migrations;

pub use database::Database;
