use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "studydesk")]
#[command(about = "A study timer with breaks, exercise reminders and a todo list")]
#[command(long_about = "studydesk - a study timer for the terminal

Work in fixed study blocks. When a block runs out you are offered a break;
accept it and a break countdown starts, decline it and the timer is ready for
the next block. An exercise reminder fires on its own interval throughout.

QUICK START:
  studydesk                       Open the interactive timer
  studydesk run --duration 25m    Run one block in the terminal
  studydesk settings set break 5  Make breaks five minutes long
  studydesk todo add \"Chapter 4\"  Add a todo

OUTPUT FORMATS:
  --output pretty    Human-readable colored output (default)
  --output json      Machine-readable JSON for scripting

For more information on a specific command, run:
  studydesk <command> --help")]
#[command(version, propagate_version = true)]
pub struct Cli {
    /// Output format for command results
    ///
    /// Defaults to the `general.default_output` setting.
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Directory holding config.yaml and the database
    #[arg(long, global = true, env = "STUDYDESK_HOME", value_name = "DIR")]
    pub home: Option<PathBuf>,

    /// Command to run (opens the interactive timer when omitted)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable colored output.
    #[default]
    Pretty,
    /// Machine-readable JSON output.
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open the interactive timer
    ///
    /// Shows the countdown, a progress gauge and your open todos.
    /// Press ? inside for the key bindings.
    Tui,

    /// Run one study block in this terminal
    ///
    /// Prints a live countdown. When the block runs out the break offer is
    /// printed and the command exits, unless --auto-break is given, in which
    /// case the break countdown runs too.
    ///
    /// # Examples
    ///
    ///   studydesk run
    ///   studydesk run --duration 25m --break 5m
    ///   studydesk run -d 1h --auto-break
    Run(RunArgs),

    /// Show the configured durations and a fresh cycle
    Status,

    /// View and change settings
    ///
    /// # Examples
    ///
    ///   studydesk settings show
    ///   studydesk settings get breakDuration
    ///   studydesk settings set study_minutes 45
    ///   studydesk settings set exerciseMessage "Walk around the room"
    Settings(SettingsArgs),

    /// Manage the todo list
    ///
    /// # Examples
    ///
    ///   studydesk todo add "Revise chapter 2"
    ///   studydesk todo list --all
    ///   studydesk todo done 3
    Todo(TodoArgs),

    /// Study and break history
    ///
    /// # Examples
    ///
    ///   studydesk history list --limit 5
    ///   studydesk history summary --period week
    History(HistoryArgs),

    /// Generate shell completions
    ///
    /// Example: studydesk completions bash > ~/.bash_completion.d/studydesk
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Arguments for a headless run.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Study block length (e.g., 25, 25m, 1h)
    #[arg(long, short = 'd')]
    pub duration: Option<String>,

    /// Break length (e.g., 5, 10m)
    #[arg(long = "break", short = 'b')]
    pub break_duration: Option<String>,

    /// Start the break when it is offered instead of exiting
    #[arg(long, short = 'a')]
    pub auto_break: bool,

    /// Don't ring the terminal bell
    #[arg(long)]
    pub quiet: bool,
}

/// Arguments for settings.
#[derive(Args)]
pub struct SettingsArgs {
    #[command(subcommand)]
    pub command: Option<SettingsCommands>,
}

/// Settings subcommands.
#[derive(Subcommand)]
pub enum SettingsCommands {
    /// Show every setting
    Show,

    /// Print one setting
    Get {
        /// Setting key (e.g., study_minutes, breakDuration)
        key: String,
    },

    /// Change one setting
    Set {
        /// Setting key (e.g., study_minutes, breakDuration)
        key: String,

        /// New value
        value: String,
    },

    /// Restore the default settings
    Reset,

    /// Print the config file location
    Path,
}

/// Arguments for todo management.
#[derive(Args)]
pub struct TodoArgs {
    #[command(subcommand)]
    pub command: TodoCommands,
}

/// Todo subcommands.
#[derive(Subcommand)]
pub enum TodoCommands {
    /// Add a todo
    #[command(alias = "a")]
    Add {
        /// Todo title
        title: String,
    },

    /// List todos
    #[command(alias = "ls")]
    List {
        /// Include finished todos
        #[arg(long, short = 'a')]
        all: bool,

        /// Show archived todos instead
        #[arg(long, conflicts_with = "all")]
        archived: bool,
    },

    /// Mark a todo finished
    #[command(alias = "complete")]
    Done {
        /// Todo ID
        id: i64,
    },

    /// Mark a todo open again
    Reopen {
        /// Todo ID
        id: i64,
    },

    /// Move all finished todos to the archive
    Archive,

    /// Delete a todo
    #[command(alias = "rm")]
    Remove {
        /// Todo ID
        id: i64,
    },
}

/// Arguments for history.
#[derive(Args)]
pub struct HistoryArgs {
    #[command(subcommand)]
    pub command: Option<HistoryCommands>,
}

/// History subcommands.
#[derive(Subcommand)]
pub enum HistoryCommands {
    /// List recent entries
    List {
        /// Number of entries to show
        #[arg(long, short = 'n', default_value = "10")]
        limit: usize,
    },

    /// Total study and break time
    Summary {
        /// Time period (today, week, all)
        #[arg(long, short = 'p', default_value = "today")]
        period: String,
    },
}
