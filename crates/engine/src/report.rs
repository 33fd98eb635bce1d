// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The per-cycle report (§6/§9): mode, watermark movement, actions taken,
//! conflicts surfaced, and errors recorded — never read back by the engine,
//! but the CLI's `status`/`conflicts` commands print it.

use chrono::{DateTime, Utc};
use serde::Serialize;
use ts_core::{CanonicalId, ProviderTag, SyncMode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Create,
    Recreate,
    Update,
    Delete,
    Noop,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutedAction {
    pub canonical_id: CanonicalId,
    pub provider: ProviderTag,
    pub kind: ActionKind,
}

/// A field where more than one provider diverged from the stored baseline
/// and from each other: not an error, a record for the audit log (§6).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncConflict {
    pub canonical_id: CanonicalId,
    pub field: String,
    pub providers: Vec<ProviderTag>,
    pub winner: ProviderTag,
    pub overwritten: Vec<ProviderTag>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionCounts {
    pub created: usize,
    pub recreated: usize,
    pub updated: usize,
    pub deleted: usize,
    pub noop: usize,
}

impl ActionCounts {
    pub fn record(&mut self, kind: ActionKind) {
        match kind {
            ActionKind::Create => self.created += 1,
            ActionKind::Recreate => self.recreated += 1,
            ActionKind::Update => self.updated += 1,
            ActionKind::Delete => self.deleted += 1,
            ActionKind::Noop => self.noop += 1,
        }
    }
}

/// Result of one `CycleOrchestrator::run_once` call (§4.9/§6).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncReport {
    pub mode: SyncMode,
    pub providers: Vec<ProviderTag>,
    pub old_watermark: Option<DateTime<Utc>>,
    pub new_watermark: DateTime<Utc>,
    pub action_counts: ActionCounts,
    pub actions: Vec<ExecutedAction>,
    pub conflicts: Vec<SyncConflict>,
    pub errors: Vec<String>,
    pub duration_ms: u64,
    pub dry_run: bool,
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
