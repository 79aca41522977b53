use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to read settings file: {0}")]
    Read(#[from] std::io::Error),
    #[error("Failed to parse settings file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Startup configuration: listen port and initial device state.
///
/// Keys use the device wire spelling, so a settings file says
/// `colorTemperature`. Every field has a default, so partial files work.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub port: u16,
    pub on: bool,
    pub brightness: i64,
    pub hue: i64,
    pub saturation: i64,
    pub color_temperature: i64,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            port: 8000,
            on: false,
            brightness: 100,
            hue: 0,
            saturation: 100,
            color_temperature: 140,
        }
    }
}

impl Settings {
    /// Load settings from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(&std::fs::read_to_string(path)?)?)
    }
}
