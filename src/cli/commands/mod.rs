//! Command implementations for studydesk.
//!
//! Each handler returns the text to print, formatted for the requested
//! output format.

mod history;
mod run;
mod settings;
mod todo;

pub use history::history;
pub use run::run;
pub use settings::settings;
pub use todo::todo;

use clap::CommandFactory;
use clap_complete::Shell;

use crate::cli::args::{Cli, OutputFormat};
use crate::config::Config;
use crate::error::StudyError;
use crate::features::cycle::{IntervalScheduler, NoticeQueue, SessionCycle};
use crate::output::format_snapshot;

/// Execute status command
///
/// Shows what a cycle built from the current settings looks like.
///
/// # Errors
///
/// Returns an error if output formatting fails.
pub fn status(config: &Config, format: OutputFormat) -> Result<String, StudyError> {
    let cycle = SessionCycle::new(
        config.cycle.to_settings(),
        IntervalScheduler::new(),
        NoticeQueue::new(),
    );
    format_snapshot(&cycle.snapshot(), format)
}

/// Generate the completion script for `shell`.
#[must_use]
pub fn completions(shell: Shell) -> String {
    let mut cmd = Cli::command();
    let mut buf = Vec::new();
    clap_complete::generate(shell, &mut cmd, "studydesk", &mut buf);
    String::from_utf8_lossy(&buf).into_owned()
}
