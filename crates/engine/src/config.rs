// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Explicit engine configuration (§6, Design Note "Mutable shared configuration").
//!
//! Built once by the binary crate and passed into the orchestrator at
//! construction; nothing in `ts-engine`, `ts-storage`, or `ts-core` reads
//! ambient globals.

use std::path::PathBuf;
use thiserror::Error;
use ts_core::{ProviderTag, SyncMode};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("no providers configured")]
    NoProviders,
    #[error("at least two providers are required, got {0}")]
    TooFewProviders(usize),
    #[error("duplicate provider tag: {0}")]
    DuplicateProvider(String),
}

/// Runtime configuration for one `CycleOrchestrator` (§6).
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub state_dir: PathBuf,
    pub mode: SyncMode,
    pub tombstone_ttl_days: u32,
    pub dry_run: bool,
    pub poll_interval_minutes: u32,
    /// Participating providers, in declaration order. `providers[0]` is the
    /// source of truth in `AToBOnly`/`Mirror` mode and the tie-break winner
    /// for simultaneous-`updatedAt` conflicts in every mode.
    pub providers: Vec<ProviderTag>,
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.providers.is_empty() {
            return Err(ConfigError::NoProviders);
        }
        if self.providers.len() < 2 {
            return Err(ConfigError::TooFewProviders(self.providers.len()));
        }
        let mut seen = std::collections::HashSet::new();
        for tag in &self.providers {
            if !seen.insert(tag.as_str()) {
                return Err(ConfigError::DuplicateProvider(tag.as_str().to_string()));
            }
        }
        Ok(())
    }

    pub fn state_json_path(&self) -> PathBuf {
        self.state_dir.join("state.json")
    }

    pub fn lock_path(&self) -> PathBuf {
        self.state_dir.join("sync.lock")
    }

    pub fn conflict_log_path(&self) -> PathBuf {
        self.state_dir.join("conflicts.log")
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
