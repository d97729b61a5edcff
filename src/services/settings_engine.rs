//! Settings file for the `bookmark-vault` CLI.
//!
//! One camelCase JSON object (`outputFolderPath`, `checkAccessibility`,
//! `checkDelayMs`) kept under the platform config directory unless the CLI
//! passes `--settings`.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use tracing::{debug, info};

use crate::platform;
use crate::types::errors::SettingsError;
use crate::types::settings::PluginSettings;

pub trait SettingsEngineTrait {
    fn load(&mut self) -> Result<PluginSettings, SettingsError>;
    fn get_settings(&self) -> &PluginSettings;
    fn set_value(&mut self, key: &str, value: serde_json::Value) -> Result<(), SettingsError>;
    fn reset(&mut self) -> Result<(), SettingsError>;
    fn get_config_path(&self) -> &str;
}

/// Holds the bookmark-vault settings and the file they live in.
pub struct SettingsEngine {
    config_path: String,
    settings: PluginSettings,
}

impl SettingsEngine {
    /// `path_override` comes from `--settings`; without it the file is
    /// `settings.json` in the bookmark-vault config directory.
    pub fn new(path_override: Option<String>) -> Self {
        let config_path = path_override.unwrap_or_else(|| {
            platform::get_config_dir()
                .join("settings.json")
                .to_string_lossy()
                .to_string()
        });

        Self {
            config_path,
            settings: PluginSettings::default(),
        }
    }

    fn write_file(&self) -> Result<(), SettingsError> {
        let path = Path::new(&self.config_path);
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|e| {
                SettingsError::IoError(format!("cannot create {}: {}", dir.display(), e))
            })?;
        }
        let json = serde_json::to_string_pretty(&self.settings)
            .map_err(|e| SettingsError::SerializationError(e.to_string()))?;
        fs::write(path, json)
            .map_err(|e| SettingsError::IoError(format!("cannot write {}: {}", self.config_path, e)))
    }
}

impl SettingsEngineTrait for SettingsEngine {
    /// Reads the settings file. Before the first `set` or `reset` there is no
    /// file and the defaults apply; keys the file lacks keep their defaults.
    fn load(&mut self) -> Result<PluginSettings, SettingsError> {
        self.settings = match fs::read_to_string(&self.config_path) {
            Ok(content) => serde_json::from_str(&content).map_err(|e| {
                SettingsError::SerializationError(format!("{}: {}", self.config_path, e))
            })?,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.config_path, "no settings file yet");
                PluginSettings::default()
            }
            Err(e) => {
                return Err(SettingsError::IoError(format!(
                    "cannot read {}: {}",
                    self.config_path, e
                )))
            }
        };
        Ok(self.settings.clone())
    }

    fn get_settings(&self) -> &PluginSettings {
        &self.settings
    }

    /// `settings set <key> <value>`: replaces one camelCase key and writes
    /// the file. The key must already exist and the value must deserialize
    /// into the field's type; otherwise nothing changes.
    fn set_value(&mut self, key: &str, value: serde_json::Value) -> Result<(), SettingsError> {
        if key.trim().is_empty() {
            return Err(SettingsError::InvalidKey("Key cannot be empty".to_string()));
        }

        let mut json = serde_json::to_value(&self.settings)
            .map_err(|e| SettingsError::SerializationError(e.to_string()))?;
        match json.as_object_mut() {
            Some(fields) if fields.contains_key(key) => {
                fields.insert(key.to_string(), value);
            }
            _ => {
                return Err(SettingsError::InvalidKey(format!(
                    "Key '{}' not found in settings",
                    key
                )))
            }
        }

        self.settings = serde_json::from_value(json).map_err(|e| {
            SettingsError::InvalidValue(format!("Invalid value for key '{}': {}", key, e))
        })?;
        info!(key, "setting updated");
        self.write_file()
    }

    /// `settings reset`: writes the defaults to the file.
    fn reset(&mut self) -> Result<(), SettingsError> {
        self.settings = PluginSettings::default();
        self.write_file()
    }

    fn get_config_path(&self) -> &str {
        &self.config_path
    }
}
