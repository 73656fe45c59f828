use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use mapf_bridge::config::BridgeConfig;
use mapf_bridge::error::ApiError;
use mapf_bridge::tooling::cli::{CliContext, Commands};
use tempfile::TempDir;

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Run `f` with XDG config and state homes pointed into `temp_dir`.
pub fn with_xdg_env<F: FnOnce()>(temp_dir: &TempDir, f: F) {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let config_home = temp_dir.path().join("xdg-config");
    let state_home = temp_dir.path().join("xdg-state");
    fs::create_dir_all(&config_home).unwrap();
    fs::create_dir_all(&state_home).unwrap();

    let saved_config = std::env::var_os("XDG_CONFIG_HOME");
    let saved_state = std::env::var_os("XDG_STATE_HOME");
    std::env::set_var("XDG_CONFIG_HOME", &config_home);
    std::env::set_var("XDG_STATE_HOME", &state_home);

    f();

    match saved_config {
        Some(v) => std::env::set_var("XDG_CONFIG_HOME", v),
        None => std::env::remove_var("XDG_CONFIG_HOME"),
    }
    match saved_state {
        Some(v) => std::env::set_var("XDG_STATE_HOME", v),
        None => std::env::remove_var("XDG_STATE_HOME"),
    }
}

/// Write a MovingAI map from its rows.
pub fn write_map(dir: &Path, name: &str, rows: &[&str]) -> PathBuf {
    let height = rows.len();
    let width = rows.first().map(|r| r.chars().count()).unwrap_or(0);
    let mut text = format!("type octile\nheight {}\nwidth {}\nmap\n", height, width);
    for row in rows {
        text.push_str(row);
        text.push('\n');
    }
    write_file(dir, name, &text)
}

pub fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

/// Context with built-in defaults, isolated from user config files.
pub fn default_context(dir: &Path) -> CliContext {
    CliContext::with_config(dir.to_path_buf(), BridgeConfig::default())
}

/// Execute and capture diagnostics.
pub fn run(ctx: &CliContext, command: &Commands) -> (Result<String, ApiError>, String) {
    let mut diagnostics = Vec::new();
    let result = ctx.execute_with(command, &mut diagnostics);
    (result, String::from_utf8(diagnostics).unwrap())
}
