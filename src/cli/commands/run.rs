//! Headless run command.
//!
//! Drives one study block (and optionally its break) against the wall clock,
//! printing a live countdown line.

use std::io::{self, Write};
use std::time::{Duration, Instant};

use colored::Colorize;
use serde_json::json;

use crate::cli::args::{OutputFormat, RunArgs};
use crate::config::{Config, SettingKey};
use crate::error::StudyError;
use crate::features::cycle::{
    render_progress_bar, CycleSettings, IntervalScheduler, Notifier, Scheduler, SessionCycle,
    SessionState, TerminalNotifier,
};
use crate::features::history::{HistoryEntry, HistoryStorage};
use crate::output::to_json;
use crate::storage::Database;

const POLL: Duration = Duration::from_millis(200);

/// Execute run command
///
/// # Errors
///
/// Returns an error if a duration is not a positive whole number of minutes
/// or history cannot be written.
pub fn run(
    config: &Config,
    db: &Database,
    args: &RunArgs,
    format: OutputFormat,
) -> Result<String, StudyError> {
    let settings = run_settings(config, args)?;
    let out: Box<dyn Write> = match format {
        OutputFormat::Pretty => Box::new(io::stdout()),
        OutputFormat::Json => Box::new(io::sink()),
    };
    let notifier = TerminalNotifier::new(out, !args.quiet);
    let mut cycle = SessionCycle::new(settings, IntervalScheduler::new(), notifier);
    let history = HistoryStorage::new(db);

    cycle.start();
    tracing::debug!(
        "Running a {} minute block",
        cycle.custom_duration_minutes()
    );

    let origin = Instant::now();
    let mut logged: Vec<HistoryEntry> = Vec::new();

    loop {
        cycle.advance_to(origin.elapsed());
        for notice in cycle.notifier_mut().take_delivered() {
            logged.extend(history.record_notice(&notice)?);
        }

        match cycle.state() {
            SessionState::BreakPending if args.auto_break => {
                cycle.accept_break();
            }
            SessionState::BreakPending => {
                cycle.decline_break();
                break;
            }
            SessionState::Idle => break,
            SessionState::Running | SessionState::OnBreak => {
                if format == OutputFormat::Pretty {
                    print_progress(&cycle)?;
                }
            }
        }

        std::thread::sleep(POLL);
    }

    match format {
        OutputFormat::Json => to_json(&json!({
            "logged": logged,
            "snapshot": cycle.snapshot(),
        })),
        OutputFormat::Pretty => {
            let done = if args.auto_break {
                "Break finished."
            } else {
                "Study block finished."
            };
            Ok(format!(
                "\n{} {}",
                "✓".green(),
                format!("{done} Run again to start the next block.").dimmed()
            ))
        }
    }
}

/// Cycle settings from the config, with `--duration`/`--break` applied.
fn run_settings(config: &Config, args: &RunArgs) -> Result<CycleSettings, StudyError> {
    let mut cycle = config.cycle.clone();
    if let Some(duration) = &args.duration {
        cycle.set(SettingKey::StudyMinutes, duration)?;
    }
    if let Some(duration) = &args.break_duration {
        cycle.set(SettingKey::BreakMinutes, duration)?;
    }
    Ok(cycle.to_settings())
}

fn print_progress<S: Scheduler, N: Notifier>(cycle: &SessionCycle<S, N>) -> Result<(), StudyError> {
    let label = match cycle.state() {
        SessionState::OnBreak => cycle.state().display_name().cyan(),
        _ => cycle.state().display_name().green(),
    };
    let mut stdout = io::stdout();
    write!(
        stdout,
        "\r{label} {} {}  ",
        cycle.display_time().bold(),
        render_progress_bar(cycle.progress(), 30)
    )?;
    stdout.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(duration: Option<&str>, break_duration: Option<&str>) -> RunArgs {
        RunArgs {
            duration: duration.map(str::to_string),
            break_duration: break_duration.map(str::to_string),
            auto_break: false,
            quiet: true,
        }
    }

    #[test]
    fn test_run_settings_overrides() {
        let settings = run_settings(&Config::default(), &args(Some("25m"), Some("5"))).unwrap();
        assert_eq!(settings.custom_duration_minutes, 25);
        assert_eq!(settings.break_config.duration_minutes, 5);
    }

    #[test]
    fn test_run_settings_defaults() {
        let settings = run_settings(&Config::default(), &args(None, None)).unwrap();
        assert_eq!(settings.custom_duration_minutes, 50);
        assert_eq!(settings.break_config.duration_minutes, 10);
    }

    #[test]
    fn test_run_rejects_bad_durations() {
        let db = Database::open_in_memory().unwrap();
        for bad in ["0", "90s", "soon"] {
            let result = run(
                &Config::default(),
                &db,
                &args(Some(bad), None),
                OutputFormat::Json,
            );
            assert!(matches!(result, Err(StudyError::InvalidInput(_))), "{bad}");
        }
    }
}
