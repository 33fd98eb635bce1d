// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Crash-safe persistence for [`SyncState`] (C1).
//!
//! Writes are crash-atomic: serialize to a sibling temporary file, copy the
//! current file to a `.bak` sibling (best-effort), then atomically rename
//! the temporary file onto the target path. A missing file yields the empty
//! default state; a malformed file is a fatal error — unlike
//! `oj-storage::Snapshot::load`, this store never silently rotates a corrupt
//! document out of the way and starts fresh, per §4.1 "never silently wiped".

use crate::migration::{self, MigrationError};
use crate::state::SyncState;
#[cfg(test)]
use crate::state::CURRENT_VERSION;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum StateError {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed state document at {path}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("migration failed: {0}")]
    Migration(#[from] MigrationError),
}

/// Durable store for the single `state.json` document.
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the document, migrating it to the current schema version if
    /// needed. Returns the empty default state if the file does not exist.
    pub fn load(&self) -> Result<SyncState, StateError> {
        if !self.path.exists() {
            return Ok(SyncState::empty());
        }

        let file = File::open(&self.path).map_err(|source| StateError::Io {
            path: self.path.clone(),
            source,
        })?;
        let reader = BufReader::new(file);
        let raw: serde_json::Value =
            serde_json::from_reader(reader).map_err(|source| StateError::Malformed {
                path: self.path.clone(),
                source,
            })?;

        let migrated = migration::migrate_to_current(raw)?;
        let state: SyncState =
            serde_json::from_value(migrated).map_err(|source| StateError::Malformed {
                path: self.path.clone(),
                source,
            })?;
        Ok(state)
    }

    /// Persist the document atomically: write to `.tmp`, best-effort copy
    /// the existing file to `.bak`, then rename `.tmp` onto the target path.
    pub fn save(&self, state: &SyncState) -> Result<(), StateError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| StateError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let tmp_path = self.path.with_extension("json.tmp");
        {
            let file = File::create(&tmp_path).map_err(|source| StateError::Io {
                path: tmp_path.clone(),
                source,
            })?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, state).map_err(|source| {
                StateError::Malformed {
                    path: tmp_path.clone(),
                    source,
                }
            })?;
            writer.write_all(b"\n").map_err(|source| StateError::Io {
                path: tmp_path.clone(),
                source,
            })?;
            let file = writer.into_inner().map_err(|e| StateError::Io {
                path: tmp_path.clone(),
                source: e.into_error(),
            })?;
            file.sync_all().map_err(|source| StateError::Io {
                path: tmp_path.clone(),
                source,
            })?;
        }

        if self.path.exists() {
            let bak_path = self.path.with_extension("json.bak");
            if let Err(e) = fs::copy(&self.path, &bak_path) {
                warn!(error = %e, path = %bak_path.display(), "failed to write .bak backup, continuing");
            }
        }

        fs::rename(&tmp_path, &self.path).map_err(|source| StateError::Io {
            path: self.path.clone(),
            source,
        })?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
