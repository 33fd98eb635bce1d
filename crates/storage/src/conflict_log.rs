// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Append-only `conflicts.log` writer (§6). Never read back by the engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use ts_core::{CanonicalId, ProviderTag};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConflictLogEntry {
    pub at: DateTime<Utc>,
    pub canonical_id: CanonicalId,
    pub field: String,
    pub providers: Vec<ProviderTag>,
    pub winner: ProviderTag,
    pub overwritten: Vec<ProviderTag>,
}

pub struct ConflictLog {
    path: PathBuf,
}

impl ConflictLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Append one JSON-lines record. Best-effort: a write failure is logged
    /// by the caller and must never abort the cycle (§9 "Conflict log").
    pub fn append(&self, entry: &ConflictLogEntry) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let line = serde_json::to_string(entry)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        writeln!(file, "{line}")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
#[path = "conflict_log_tests.rs"]
mod tests;
