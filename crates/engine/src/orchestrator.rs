// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Cycle Orchestrator (C9): the nine-step sequence that turns one cycle of
//! provider state into a reconciled [`SyncState`] and a [`SyncReport`].

use std::sync::Arc;
use std::time::Instant;

use indexmap::IndexMap;
use tracing::{info, info_span, warn, Instrument};
use ts_core::{Clock, IdGen, Mapping, ProviderTag};
use ts_providers::Provider;
use ts_storage::{ConflictLog, ConflictLogEntry, StateStore};

use crate::collector::collect_snapshots;
use crate::config::EngineConfig;
use crate::deletion::resolve_deletions;
use crate::error::EngineError;
use crate::matcher::find_cold_start_groups;
use crate::merger::{ensure_mappings_for_unmapped_tasks, merge_mappings};
use crate::report::{SyncConflict, SyncReport};
use crate::writer::fan_out;

/// Owns the configuration, provider set, and id/clock sources for one sync
/// pipeline. Constructed once by the binary crate (`ts-daemon`/`ts-cli`) and
/// reused across cycles; nothing here is ambient global state.
pub struct CycleOrchestrator {
    config: EngineConfig,
    providers: IndexMap<ProviderTag, Arc<dyn Provider>>,
    id_gen: Arc<dyn IdGen>,
    clock: Arc<dyn Clock>,
}

impl CycleOrchestrator {
    pub fn new(
        config: EngineConfig,
        providers: IndexMap<ProviderTag, Arc<dyn Provider>>,
        id_gen: Arc<dyn IdGen>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self { config, providers, id_gen, clock })
    }

    /// Run exactly one reconciliation cycle, per §4.9's nine-step sequence.
    pub async fn run_once(&self) -> Result<SyncReport, EngineError> {
        let started = Instant::now();
        let _lock = ts_storage::acquire(&self.config.lock_path())?;

        let store = StateStore::new(self.config.state_json_path());
        let mut state = store.load()?;
        let old_watermark = state.last_sync_at;
        let now = self.clock.now();

        state.prune_expired_tombstones(now, self.config.tombstone_ttl_days);

        let provider_list: Vec<Arc<dyn Provider>> = self
            .config
            .providers
            .iter()
            .filter_map(|tag| self.providers.get(tag).cloned())
            .collect();
        let (snapshots, mut errors) = collect_snapshots(&provider_list, old_watermark).await;

        if old_watermark.is_none() && state.mappings.is_empty() {
            for group in find_cold_start_groups(&state, &snapshots) {
                let canonical_id = self.id_gen.next();
                let (_, seed) = &group.members[0];
                let mut mapping = Mapping::new(canonical_id, seed.task.clone(), now);
                for (tag, remote) in &group.members {
                    mapping.set_provider_id(tag.clone(), remote.id.clone());
                }
                state.mappings.insert(canonical_id, mapping);
            }
        }

        let deletion = resolve_deletions(&mut state, &snapshots, now);
        let skip = deletion.skip_mapping_ids();
        ensure_mappings_for_unmapped_tasks(&mut state, &snapshots, self.id_gen.as_ref(), now);
        let conflicts: Vec<SyncConflict> = merge_mappings(&mut state, &snapshots, &skip);

        let write_outcome = fan_out(
            &mut state,
            &self.providers,
            &snapshots,
            self.config.mode,
            &self.config.providers,
            &deletion,
            now,
        )
        .await;
        errors.extend(write_outcome.errors);

        state.last_sync_at = Some(now);

        if !self.config.dry_run {
            let log = ConflictLog::new(self.config.conflict_log_path());
            for conflict in &conflicts {
                let entry = ConflictLogEntry {
                    at: now,
                    canonical_id: conflict.canonical_id,
                    field: conflict.field.clone(),
                    providers: conflict.providers.clone(),
                    winner: conflict.winner.clone(),
                    overwritten: conflict.overwritten.clone(),
                };
                if let Err(e) = log.append(&entry) {
                    warn!(error = %e, "failed to append conflict log entry");
                }
            }
            store.save(&state)?;
        }

        let action_counts = write_outcome.action_counts.clone();

        info!(
            mode = %self.config.mode,
            created = action_counts.created,
            updated = action_counts.updated,
            deleted = action_counts.deleted,
            duration_ms = started.elapsed().as_millis() as u64,
            "sync cycle complete"
        );

        Ok(SyncReport {
            mode: self.config.mode,
            providers: self.config.providers.clone(),
            old_watermark,
            new_watermark: now,
            action_counts,
            actions: write_outcome.actions,
            conflicts,
            errors,
            duration_ms: started.elapsed().as_millis() as u64,
            dry_run: self.config.dry_run,
        })
    }

    /// Loop `run_once` on the configured poll interval until `shutdown`
    /// reports `true`, racing the sleep against the shutdown signal so a
    /// request to stop is honored without waiting out the current interval
    /// (grounded in `oj-daemon`'s `tokio::select!`-based engine loop).
    pub async fn run_polling(&self, mut shutdown: tokio::sync::watch::Receiver<bool>) {
        let interval = std::time::Duration::from_secs(u64::from(self.config.poll_interval_minutes) * 60);
        loop {
            match self.run_once().instrument(info_span!("sync_cycle")).await {
                Ok(report) => {
                    if !report.errors.is_empty() {
                        warn!(errors = ?report.errors, "cycle completed with errors");
                    }
                }
                Err(e) => warn!(error = %e, "sync cycle failed"),
            }

            tokio::select! {
                _ = tokio::time::sleep(interval) => {}
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        info!("shutdown requested, stopping poll loop");
                        return;
                    }
                }
            }

            if *shutdown.borrow() {
                return;
            }
        }
    }
}

#[cfg(test)]
#[path = "orchestrator_tests.rs"]
mod tests;
