//! Configuration management for studydesk.
//!
//! This module handles loading and saving configuration from `~/.studydesk/`.

mod paths;
mod settings;

pub use paths::Paths;
pub use settings::{ColorSetting, Config, CycleConfig, GeneralConfig, SettingKey, TuiConfig};
