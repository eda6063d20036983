//! Configuration settings for studydesk.
//!
//! Settings are loaded from `~/.studydesk/config.yaml` at startup and written
//! back when changed.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::cli::args::OutputFormat;
use crate::error::StudyError;
use crate::features::cycle::{BreakConfig, CycleSettings, ExerciseConfig};

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// General settings.
    pub general: GeneralConfig,
    /// Study cycle settings.
    pub cycle: CycleConfig,
    /// Terminal UI settings.
    pub tui: TuiConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GeneralConfig {
    /// Default output format.
    #[serde(default = "default_output_format")]
    pub default_output: OutputFormat,
    /// Color output setting.
    #[serde(default)]
    pub color: ColorSetting,
}

/// Color output setting.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ColorSetting {
    /// Auto-detect based on terminal.
    #[default]
    Auto,
    /// Always use colors.
    Always,
    /// Never use colors.
    Never,
}

impl ColorSetting {
    /// Apply this setting to the `colored` crate.
    pub fn apply(self) {
        match self {
            Self::Auto => colored::control::unset_override(),
            Self::Always => colored::control::set_override(true),
            Self::Never => colored::control::set_override(false),
        }
    }
}

/// Study cycle settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CycleConfig {
    /// Study block length in minutes.
    #[serde(default = "default_study_minutes")]
    pub study_minutes: u32,
    /// Break length in minutes.
    #[serde(default = "default_break_minutes")]
    pub break_minutes: u32,
    /// Message shown with the break offer.
    #[serde(default = "default_break_message")]
    pub break_message: String,
    /// Minutes between exercise reminders.
    #[serde(default = "default_exercise_interval")]
    pub exercise_interval_minutes: u32,
    /// Message shown with each exercise reminder.
    #[serde(default = "default_exercise_message")]
    pub exercise_message: String,
}

/// Terminal UI settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TuiConfig {
    /// Input poll period in milliseconds.
    #[serde(default = "default_tick_millis")]
    pub tick_millis: u64,
    /// Show the todo pane.
    #[serde(default = "default_true")]
    pub show_todos: bool,
}

// Default value functions for serde
const fn default_output_format() -> OutputFormat {
    OutputFormat::Pretty
}

const fn default_study_minutes() -> u32 {
    crate::features::cycle::session::DEFAULT_STUDY_MINUTES
}

fn default_break_minutes() -> u32 {
    BreakConfig::default().duration_minutes
}

fn default_break_message() -> String {
    BreakConfig::default().message
}

fn default_exercise_interval() -> u32 {
    ExerciseConfig::default().interval_minutes
}

fn default_exercise_message() -> String {
    ExerciseConfig::default().message
}

const fn default_tick_millis() -> u64 {
    100
}

const fn default_true() -> bool {
    true
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_output: default_output_format(),
            color: ColorSetting::default(),
        }
    }
}

impl Default for CycleConfig {
    fn default() -> Self {
        Self {
            study_minutes: default_study_minutes(),
            break_minutes: default_break_minutes(),
            break_message: default_break_message(),
            exercise_interval_minutes: default_exercise_interval(),
            exercise_message: default_exercise_message(),
        }
    }
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            tick_millis: default_tick_millis(),
            show_todos: default_true(),
        }
    }
}

/// A cycle setting addressable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingKey {
    /// `study_minutes`
    StudyMinutes,
    /// `break_minutes`
    BreakMinutes,
    /// `break_message`
    BreakMessage,
    /// `exercise_interval_minutes`
    ExerciseInterval,
    /// `exercise_message`
    ExerciseMessage,
}

impl SettingKey {
    /// Every key, in display order.
    pub const ALL: [Self; 5] = [
        Self::StudyMinutes,
        Self::BreakMinutes,
        Self::BreakMessage,
        Self::ExerciseInterval,
        Self::ExerciseMessage,
    ];

    /// Canonical key name as written in `config.yaml`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::StudyMinutes => "study_minutes",
            Self::BreakMinutes => "break_minutes",
            Self::BreakMessage => "break_message",
            Self::ExerciseInterval => "exercise_interval_minutes",
            Self::ExerciseMessage => "exercise_message",
        }
    }
}

impl FromStr for SettingKey {
    type Err = StudyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "study_minutes" | "customDuration" | "study" => Ok(Self::StudyMinutes),
            "break_minutes" | "breakDuration" | "break" => Ok(Self::BreakMinutes),
            "break_message" | "breakMessage" => Ok(Self::BreakMessage),
            "exercise_interval_minutes" | "exerciseInterval" | "exercise" => {
                Ok(Self::ExerciseInterval)
            }
            "exercise_message" | "exerciseMessage" => Ok(Self::ExerciseMessage),
            _ => Err(StudyError::InvalidInput(format!(
                "Unknown setting '{s}'. Valid keys: {}",
                Self::ALL.map(Self::name).join(", ")
            ))),
        }
    }
}

impl std::fmt::Display for SettingKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl CycleConfig {
    /// Check presence and positivity of every value.
    ///
    /// # Errors
    ///
    /// Returns `StudyError::InvalidInput` naming the first bad value.
    pub fn validate(&self) -> Result<(), StudyError> {
        for (key, value) in [
            (SettingKey::StudyMinutes, self.study_minutes),
            (SettingKey::BreakMinutes, self.break_minutes),
            (SettingKey::ExerciseInterval, self.exercise_interval_minutes),
        ] {
            if value == 0 {
                return Err(StudyError::InvalidInput(format!("{key} must be positive")));
            }
        }
        for (key, value) in [
            (SettingKey::BreakMessage, &self.break_message),
            (SettingKey::ExerciseMessage, &self.exercise_message),
        ] {
            if value.trim().is_empty() {
                return Err(StudyError::InvalidInput(format!("{key} must not be empty")));
            }
        }
        Ok(())
    }

    /// Read a value as text.
    #[must_use]
    pub fn get(&self, key: SettingKey) -> String {
        match key {
            SettingKey::StudyMinutes => self.study_minutes.to_string(),
            SettingKey::BreakMinutes => self.break_minutes.to_string(),
            SettingKey::BreakMessage => self.break_message.clone(),
            SettingKey::ExerciseInterval => self.exercise_interval_minutes.to_string(),
            SettingKey::ExerciseMessage => self.exercise_message.clone(),
        }
    }

    /// Set a value from text.
    ///
    /// Minute values accept the duration syntax of the CLI (`25`, `25m`,
    /// `1h`) and must be a positive whole number of minutes.
    ///
    /// # Errors
    ///
    /// Returns `StudyError::InvalidInput` if the value is empty or not a
    /// positive number of minutes. The config is unchanged on error.
    pub fn set(&mut self, key: SettingKey, value: &str) -> Result<(), StudyError> {
        let value = value.trim();
        if value.is_empty() {
            return Err(StudyError::InvalidInput(format!("{key} must not be empty")));
        }

        let minutes = || {
            crate::features::cycle::parse_minutes(value).ok_or_else(|| {
                StudyError::InvalidInput(format!(
                    "{key} must be a positive number of minutes, got '{value}'"
                ))
            })
        };

        match key {
            SettingKey::StudyMinutes => self.study_minutes = minutes()?,
            SettingKey::BreakMinutes => self.break_minutes = minutes()?,
            SettingKey::ExerciseInterval => self.exercise_interval_minutes = minutes()?,
            SettingKey::BreakMessage => self.break_message = value.to_string(),
            SettingKey::ExerciseMessage => self.exercise_message = value.to_string(),
        }
        Ok(())
    }

    /// Settings for a new session cycle.
    #[must_use]
    pub fn to_settings(&self) -> CycleSettings {
        CycleSettings {
            custom_duration_minutes: self.study_minutes,
            break_config: BreakConfig {
                duration_minutes: self.break_minutes,
                message: self.break_message.clone(),
            },
            exercise: ExerciseConfig {
                interval_minutes: self.exercise_interval_minutes,
                message: self.exercise_message.clone(),
            },
        }
    }
}

impl Config {
    /// Load configuration from a specific path.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed, or
    /// holds non-positive durations.
    pub fn load_from_path(path: &std::path::Path) -> Result<Self, StudyError> {
        let config = Self::load_unchecked(path)?;
        config.cycle.validate().map_err(|e| {
            StudyError::Config(format!("Invalid config file {}: {e}", path.display()))
        })?;
        Ok(config)
    }

    /// Load configuration without checking the durations.
    ///
    /// Used by the `settings` command so a bad file can still be repaired.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load_unchecked(path: &std::path::Path) -> Result<Self, StudyError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            StudyError::Config(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;

        let config: Self = serde_yaml::from_str(&contents).map_err(|e| {
            StudyError::Config(format!(
                "Failed to parse config file {}: {e}",
                path.display()
            ))
        })?;

        Ok(config)
    }

    /// Save configuration to a specific path.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be written.
    pub fn save_to_path(&self, path: &std::path::Path) -> Result<(), StudyError> {
        let contents = serde_yaml::to_string(self)
            .map_err(|e| StudyError::Config(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, contents).map_err(|e| {
            StudyError::Config(format!(
                "Failed to write config file {}: {e}",
                path.display()
            ))
        })?;

        tracing::info!("Saved settings to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.general.default_output, OutputFormat::Pretty);
        assert_eq!(config.general.color, ColorSetting::Auto);
        assert_eq!(config.cycle.study_minutes, 50);
        assert_eq!(config.cycle.break_minutes, 10);
        assert_eq!(config.cycle.exercise_interval_minutes, 30);
        assert_eq!(config.tui.tick_millis, 100);
        assert!(config.cycle.validate().is_ok());
    }

    #[test]
    fn test_load_missing_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let config = Config::load_from_path(&config_path).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut config = Config::default();
        config.cycle.study_minutes = 30;
        config.cycle.exercise_message = "Walk around".to_string();

        config.save_to_path(&config_path).unwrap();
        let loaded = Config::load_from_path(&config_path).unwrap();

        assert_eq!(loaded.cycle.study_minutes, 30);
        assert_eq!(loaded.cycle.exercise_message, "Walk around");
    }

    #[test]
    fn test_partial_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let partial_yaml = r"
cycle:
  break_minutes: 7
";
        std::fs::write(&config_path, partial_yaml).unwrap();

        let config = Config::load_from_path(&config_path).unwrap();

        assert_eq!(config.cycle.break_minutes, 7);
        assert_eq!(config.cycle.study_minutes, 50);
        assert_eq!(config.general.default_output, OutputFormat::Pretty);
    }

    #[test]
    fn test_zero_duration_in_file_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");
        std::fs::write(&config_path, "cycle:\n  study_minutes: 0\n").unwrap();

        let err = Config::load_from_path(&config_path).unwrap_err();
        assert!(err.to_string().contains("study_minutes must be positive"));
    }

    #[test]
    fn test_load_unchecked_keeps_zero_duration() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");
        std::fs::write(&config_path, "cycle:\n  break_minutes: 0\n").unwrap();

        let config = Config::load_unchecked(&config_path).unwrap();
        assert_eq!(config.cycle.break_minutes, 0);
        assert_eq!(config.cycle.study_minutes, 50);
    }

    #[test]
    fn test_setting_key_aliases() {
        assert_eq!("breakDuration".parse::<SettingKey>().unwrap(), SettingKey::BreakMinutes);
        assert_eq!(
            "exerciseInterval".parse::<SettingKey>().unwrap(),
            SettingKey::ExerciseInterval
        );
        assert_eq!("customDuration".parse::<SettingKey>().unwrap(), SettingKey::StudyMinutes);
        assert_eq!(
            "break_message".parse::<SettingKey>().unwrap(),
            SettingKey::BreakMessage
        );
        assert!("volume".parse::<SettingKey>().is_err());
    }

    #[test]
    fn test_set_and_get() {
        let mut cycle = CycleConfig::default();

        cycle.set(SettingKey::BreakMinutes, "15m").unwrap();
        assert_eq!(cycle.get(SettingKey::BreakMinutes), "15");

        cycle.set(SettingKey::ExerciseInterval, "1h").unwrap();
        assert_eq!(cycle.exercise_interval_minutes, 60);

        cycle.set(SettingKey::BreakMessage, "  Rest your eyes ").unwrap();
        assert_eq!(cycle.get(SettingKey::BreakMessage), "Rest your eyes");
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut cycle = CycleConfig::default();

        assert!(cycle.set(SettingKey::StudyMinutes, "0").is_err());
        assert!(cycle.set(SettingKey::StudyMinutes, "soon").is_err());
        assert!(cycle.set(SettingKey::StudyMinutes, "90s").is_err());
        assert!(cycle.set(SettingKey::ExerciseMessage, "   ").is_err());
        assert_eq!(cycle, CycleConfig::default());
    }

    #[test]
    fn test_to_settings() {
        let mut cycle = CycleConfig::default();
        cycle.study_minutes = 25;
        cycle.break_minutes = 5;

        let settings = cycle.to_settings();
        assert_eq!(settings.custom_duration_minutes, 25);
        assert_eq!(settings.break_config.duration_minutes, 5);
        assert_eq!(settings.exercise.interval_minutes, 30);
    }
}
