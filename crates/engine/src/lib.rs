// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! ts-engine: reconciliation pipeline (C4-C9) that turns provider snapshots
//! into a converged [`ts_storage::SyncState`] and a per-cycle [`SyncReport`].

mod collector;
mod config;
mod deletion;
mod error;
mod matcher;
mod merger;
mod orchestrator;
mod report;
mod writer;

pub use collector::{collect_snapshots, ProviderSnapshot};
pub use config::{ConfigError, EngineConfig};
pub use deletion::{resolve_deletions, DeletionOutcome};
pub use error::EngineError;
pub use matcher::{find_cold_start_groups, ColdStartGroup};
pub use merger::{ensure_mappings_for_unmapped_tasks, merge_mappings};
pub use orchestrator::CycleOrchestrator;
pub use report::{ActionCounts, ActionKind, ExecutedAction, SyncConflict, SyncReport};
pub use writer::{fan_out, write_deletes, write_fields, write_targets, WriteOutcome};
