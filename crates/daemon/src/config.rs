// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon-level configuration: the on-disk JSON file plus the env-resolved
//! paths around it, combined into one [`DaemonConfig`] and handed to
//! `ts-engine` as an [`ts_engine::EngineConfig`] at construction.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_core::SyncMode;
use ts_engine::EngineConfig;

use crate::env;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not determine state directory: $HOME is not set")]
    NoStateDir,
    #[error("no config file at {0}; see ts-syncd --help")]
    Missing(PathBuf),
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    InvalidEngineConfig(#[from] ts_engine::ConfigError),
}

/// One configured provider, tagged by kind so the registry builder (see
/// `providers.rs`) knows which adapter to construct.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProviderSpec {
    Google { tag: String },
    Microsoft { tag: String },
    /// The demo adapter (§1) — a flat JSON file at `path`, useful for
    /// running the engine end-to-end without live OAuth.
    LocalJson { tag: String, path: PathBuf },
}

impl ProviderSpec {
    pub fn tag(&self) -> &str {
        match self {
            ProviderSpec::Google { tag } => tag,
            ProviderSpec::Microsoft { tag } => tag,
            ProviderSpec::LocalJson { tag, .. } => tag,
        }
    }
}

fn default_tombstone_ttl_days() -> u32 {
    30
}

fn default_poll_interval_minutes() -> u32 {
    15
}

fn default_max_retries() -> u32 {
    3
}

/// The on-disk shape of `config.json`. Everything except `providers` has a
/// sensible default so a minimal config only needs to name its providers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub mode: SyncMode,
    #[serde(default = "default_tombstone_ttl_days")]
    pub tombstone_ttl_days: u32,
    #[serde(default)]
    pub dry_run: bool,
    #[serde(default = "default_poll_interval_minutes")]
    pub poll_interval_minutes: u32,
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    pub providers: Vec<ProviderSpec>,
}

/// Fully resolved daemon configuration: env-derived paths plus the parsed
/// config file.
#[derive(Debug, Clone)]
pub struct DaemonConfig {
    pub state_dir: PathBuf,
    pub log_path: PathBuf,
    pub file: ConfigFile,
}

impl DaemonConfig {
    /// Load configuration for the background daemon: resolve the state
    /// directory and config file path from the environment, then parse the
    /// config file. A missing config file is an error here (there is no
    /// sensible default provider list); `ts-cli`'s one-shot commands use the
    /// same loader.
    pub fn load() -> Result<Self, ConfigError> {
        let state_dir = env::state_dir()?;
        let config_path = env::config_path(&state_dir);
        Self::load_from(state_dir, config_path)
    }

    pub fn load_from(state_dir: PathBuf, config_path: PathBuf) -> Result<Self, ConfigError> {
        if !config_path.exists() {
            return Err(ConfigError::Missing(config_path));
        }
        let raw = std::fs::read_to_string(&config_path)
            .map_err(|source| ConfigError::Io { path: config_path.clone(), source })?;
        let file: ConfigFile =
            serde_json::from_str(&raw).map_err(|source| ConfigError::Parse { path: config_path, source })?;

        Ok(Self { log_path: state_dir.join("daemon.log"), state_dir, file })
    }

    pub fn lock_path(&self) -> PathBuf {
        self.state_dir.join("sync.lock")
    }

    pub fn engine_config(&self) -> Result<EngineConfig, ConfigError> {
        let config = EngineConfig {
            state_dir: self.state_dir.clone(),
            mode: self.file.mode,
            tombstone_ttl_days: self.file.tombstone_ttl_days,
            dry_run: self.file.dry_run,
            poll_interval_minutes: self.file.poll_interval_minutes,
            providers: self.file.providers.iter().map(|p| ts_core::ProviderTag::new(p.tag())).collect(),
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
