// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the daemon crate.

use std::path::PathBuf;

use crate::config::ConfigError;

/// Resolve the state directory: `TS_STATE_DIR` > `XDG_STATE_HOME/ts-sync` >
/// `~/.local/state/ts-sync`.
pub fn state_dir() -> Result<PathBuf, ConfigError> {
    if let Ok(dir) = std::env::var("TS_STATE_DIR") {
        return Ok(PathBuf::from(dir));
    }
    if let Ok(xdg) = std::env::var("XDG_STATE_HOME") {
        return Ok(PathBuf::from(xdg).join("ts-sync"));
    }
    let home = dirs::home_dir().ok_or(ConfigError::NoStateDir)?;
    Ok(home.join(".local/state/ts-sync"))
}

/// Resolve the config file path: `TS_CONFIG_PATH` or `<state_dir>/config.json`.
pub fn config_path(state_dir: &std::path::Path) -> PathBuf {
    std::env::var("TS_CONFIG_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| state_dir.join("config.json"))
}
