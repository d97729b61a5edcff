// Bookmark vault platform abstraction
// Provides the platform-specific configuration directory for Windows, macOS, and Linux.
//
// Uses `cfg(target_os)` for conditional compilation to select the correct
// platform-specific implementation at compile time.

use std::path::PathBuf;

#[cfg(target_os = "linux")]
mod linux;

#[cfg(target_os = "macos")]
mod macos;

#[cfg(target_os = "windows")]
mod windows;

/// Returns the platform-specific configuration directory for bookmark-vault.
///
/// - **Linux**: `~/.config/bookmark-vault` (or `$XDG_CONFIG_HOME/bookmark-vault`)
/// - **macOS**: `~/Library/Application Support/bookmark-vault`
/// - **Windows**: `%APPDATA%/bookmark-vault`
/// - elsewhere: `./.bookmark-vault`
pub fn get_config_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        linux::get_config_dir()
    }
    #[cfg(target_os = "macos")]
    {
        macos::get_config_dir()
    }
    #[cfg(target_os = "windows")]
    {
        windows::get_config_dir()
    }
    #[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
    {
        PathBuf::from(".bookmark-vault")
    }
}
