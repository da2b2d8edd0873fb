//! Platform-specific directory utilities

use std::path::PathBuf;

/// Get the platform-specific data directory for stored characters
///
/// Follows platform conventions:
/// - macOS: `~/Library/Application Support/charsheet`
/// - Linux: `~/.local/share/charsheet` (or `$XDG_DATA_HOME/charsheet`)
/// - Windows: `%APPDATA%\charsheet`
/// - Fallback: `./characters`
pub fn data_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "charsheet")
        .map(|dirs| dirs.data_dir().join("characters"))
        .unwrap_or_else(|| PathBuf::from("./characters"))
}
