//! XDG Base Directory utilities for config and log locations.

use std::path::PathBuf;

/// Application directory name under the XDG roots.
pub const APP_DIR: &str = "mapf-bridge";

/// Get XDG config home directory
///
/// Returns `$XDG_CONFIG_HOME` if set, otherwise defaults to `$HOME/.config`
pub fn config_home() -> Option<PathBuf> {
    if let Ok(xdg_config_home) = std::env::var("XDG_CONFIG_HOME") {
        if !xdg_config_home.is_empty() {
            return Some(PathBuf::from(xdg_config_home));
        }
    }

    std::env::var("HOME")
        .ok()
        .map(|home| PathBuf::from(home).join(".config"))
}

/// Global config file path: `$XDG_CONFIG_HOME/mapf-bridge/config.toml`
pub fn global_config_path() -> Option<PathBuf> {
    config_home().map(|home| home.join(APP_DIR).join("config.toml"))
}

/// Platform state directory used for the default log file.
pub fn state_dir() -> Option<PathBuf> {
    let project_dirs = directories::ProjectDirs::from("", APP_DIR, APP_DIR)?;
    project_dirs
        .state_dir()
        .map(|p| p.to_path_buf())
        .or_else(|| Some(project_dirs.data_local_dir().to_path_buf()))
}
