//! studydesk - a study timer for the terminal
//!
//! This crate provides a study/break session cycle with a periodic exercise
//! reminder, a local todo list and a history log, behind a command-line
//! interface and an interactive terminal UI.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod error;
pub mod features;
pub mod output;
pub mod storage;
pub mod tui;

pub use cli::args::{Cli, Commands, OutputFormat};
pub use error::StudyError;
pub use features::cycle::{SessionCycle, SessionState};
