//! Settings command implementation.

use colored::Colorize;
use serde_json::json;

use crate::cli::args::{OutputFormat, SettingsCommands};
use crate::config::{Config, CycleConfig, Paths, SettingKey};
use crate::error::StudyError;
use crate::output::{format_settings, to_json};

/// Execute settings subcommands.
///
/// # Errors
///
/// Returns an error for unknown keys, invalid values, or if the config file
/// cannot be written.
pub fn settings(
    paths: &Paths,
    mut config: Config,
    cmd: Option<SettingsCommands>,
    format: OutputFormat,
) -> Result<String, StudyError> {
    match cmd.unwrap_or(SettingsCommands::Show) {
        SettingsCommands::Show => format_settings(&config.cycle, format),

        SettingsCommands::Get { key } => {
            let key: SettingKey = key.parse()?;
            let value = config.cycle.get(key);
            match format {
                OutputFormat::Json => to_json(&json!({ key.name(): value })),
                OutputFormat::Pretty => Ok(value),
            }
        }

        SettingsCommands::Set { key, value } => {
            let key: SettingKey = key.parse()?;
            config.cycle.set(key, &value)?;
            config.cycle.validate()?;
            save(paths, &config)?;

            let value = config.cycle.get(key);
            match format {
                OutputFormat::Json => to_json(&json!({ key.name(): value })),
                OutputFormat::Pretty => {
                    Ok(format!("{} {key} = {value}", "✓".green()))
                }
            }
        }

        SettingsCommands::Reset => {
            config.cycle = CycleConfig::default();
            save(paths, &config)?;
            match format {
                OutputFormat::Json => format_settings(&config.cycle, format),
                OutputFormat::Pretty => Ok(format!(
                    "{} Settings restored to defaults\n{}",
                    "✓".green(),
                    format_settings(&config.cycle, format)?
                )),
            }
        }

        SettingsCommands::Path => match format {
            OutputFormat::Json => to_json(&json!({ "path": paths.config_file })),
            OutputFormat::Pretty => Ok(paths.config_file.display().to_string()),
        },
    }
}

fn save(paths: &Paths, config: &Config) -> Result<(), StudyError> {
    paths.ensure_dirs()?;
    config.save_to_path(&paths.config_file)
}
