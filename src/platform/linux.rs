// Bookmark vault config path for Linux
// Config: ~/.config/bookmark-vault

use std::env;
use std::path::PathBuf;

/// Uses `$XDG_CONFIG_HOME/bookmark-vault` if set, otherwise `~/.config/bookmark-vault`.
pub fn get_config_dir() -> PathBuf {
    if let Ok(xdg) = env::var("XDG_CONFIG_HOME") {
        PathBuf::from(xdg).join("bookmark-vault")
    } else {
        let home = env::var("HOME").unwrap_or_else(|_| String::from("/tmp"));
        PathBuf::from(home).join(".config").join("bookmark-vault")
    }
}
