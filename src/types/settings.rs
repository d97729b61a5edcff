use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Smallest pause between two accessibility checks. Lower configured values
/// are raised to this.
pub const MIN_CHECK_DELAY_MS: u64 = 250;

/// User settings for the bookmark vault.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PluginSettings {
    /// Vault folder holding one `<Category>.md` file per category.
    #[serde(default = "default_output_folder")]
    pub output_folder_path: String,
    #[serde(default = "default_true")]
    pub check_accessibility: bool,
    /// Pause between two accessibility checks, in milliseconds. Read it
    /// through [`PluginSettings::check_delay`].
    #[serde(default = "default_check_delay_ms")]
    pub check_delay_ms: u64,
}

fn default_output_folder() -> String {
    "Browser Favorites".to_string()
}

fn default_true() -> bool {
    true
}

fn default_check_delay_ms() -> u64 {
    1000
}

impl Default for PluginSettings {
    fn default() -> Self {
        Self {
            output_folder_path: default_output_folder(),
            check_accessibility: true,
            check_delay_ms: default_check_delay_ms(),
        }
    }
}

impl PluginSettings {
    /// The pause between two checks, never shorter than [`MIN_CHECK_DELAY_MS`].
    pub fn check_delay(&self) -> Duration {
        Duration::from_millis(self.check_delay_ms.max(MIN_CHECK_DELAY_MS))
    }
}
