use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;

use studydesk::cli::args::{Cli, Commands, SettingsCommands};
use studydesk::cli::commands;
use studydesk::config::{Config, Paths};
use studydesk::storage::Database;

fn main() {
    init_logging();

    if let Err(e) = run() {
        eprintln!("{}: {e:#}", "error".red().bold());
        std::process::exit(1);
    }
}

fn init_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let paths = Paths::resolve(cli.home.as_deref())?;
    let command = cli.command.unwrap_or(Commands::Tui);
    let config = match &command {
        Commands::Settings(args) => load_for_settings(&paths, args.command.as_ref())?,
        _ => Config::load_from_path(&paths.config_file)?,
    };
    config.general.color.apply();
    let format = cli.output.unwrap_or(config.general.default_output);

    let open_db = || Database::open(&paths).context("could not open the studydesk database");

    let output = match command {
        Commands::Tui => {
            studydesk::tui::run(&paths, config)?;
            String::new()
        }
        Commands::Run(args) => commands::run(&config, &open_db()?, &args, format)?,
        Commands::Status => commands::status(&config, format)?,
        Commands::Settings(args) => commands::settings(&paths, config, args.command, format)?,
        Commands::Todo(args) => commands::todo(&open_db()?, args.command, format)?,
        Commands::History(args) => commands::history(&open_db()?, args.command, format)?,
        Commands::Completions { shell } => commands::completions(shell),
    };

    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}

/// Settings skip validation, and `reset`/`path` fall back to defaults when
/// the file cannot be read at all.
fn load_for_settings(paths: &Paths, cmd: Option<&SettingsCommands>) -> Result<Config> {
    match Config::load_unchecked(&paths.config_file) {
        Ok(config) => Ok(config),
        Err(e) if matches!(cmd, Some(SettingsCommands::Reset | SettingsCommands::Path)) => {
            tracing::warn!("Ignoring unreadable config: {e}");
            Ok(Config::default())
        }
        Err(e) => Err(e.into()),
    }
}
