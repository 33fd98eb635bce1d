// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fan-Out Writer (C8): propagate each mapping's merged canonical (or a
//! queued delete) to every writable target provider for the configured
//! sync mode.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use ts_core::{any_field_differs, CanonicalId, ProviderTag, SyncMode, Tombstone};
use ts_providers::Provider;
use ts_storage::SyncState;

use crate::collector::ProviderSnapshot;
use crate::deletion::DeletionOutcome;
use crate::report::{ActionCounts, ActionKind, ExecutedAction};

/// The providers writable under `mode`, in declaration order.
///
/// `bidirectional` writes every provider; `a-to-b-only` and `mirror` both
/// hold to "`provider_order[0]` is never written to by the engine" (§4.8),
/// so excluding it here is the single mechanism implementing that rule for
/// both normal field updates and delete propagation below — a non-source
/// delete in `mirror` mode is simply never propagated back to the source,
/// with no special-case code (distilled spec Open Question 3).
pub fn write_targets(mode: SyncMode, provider_order: &[ProviderTag]) -> Vec<ProviderTag> {
    match mode {
        SyncMode::Bidirectional => provider_order.to_vec(),
        SyncMode::AToBOnly | SyncMode::Mirror => provider_order.iter().skip(1).cloned().collect(),
    }
}

#[derive(Debug, Default)]
pub struct WriteOutcome {
    pub actions: Vec<ExecutedAction>,
    pub action_counts: ActionCounts,
    pub errors: Vec<String>,
}

impl WriteOutcome {
    fn record(&mut self, canonical_id: CanonicalId, provider: ProviderTag, kind: ActionKind) {
        self.action_counts.record(kind);
        if kind != ActionKind::Noop {
            self.actions.push(ExecutedAction { canonical_id, provider, kind });
        }
    }

    fn merge(&mut self, other: WriteOutcome) {
        self.actions.extend(other.actions);
        self.errors.extend(other.errors);
        self.action_counts.created += other.action_counts.created;
        self.action_counts.recreated += other.action_counts.recreated;
        self.action_counts.updated += other.action_counts.updated;
        self.action_counts.deleted += other.action_counts.deleted;
        self.action_counts.noop += other.action_counts.noop;
    }
}

/// Propagate deletes for mappings the deletion resolver flagged as needing
/// it (§4.6 "Propagation"), then sweep any mapping that became a pure
/// orphan as a result.
pub async fn write_deletes(
    state: &mut SyncState,
    providers: &IndexMap<ProviderTag, Arc<dyn Provider>>,
    snapshots: &IndexMap<ProviderTag, ProviderSnapshot>,
    mode: SyncMode,
    provider_order: &[ProviderTag],
    deletion: &DeletionOutcome,
    now: DateTime<Utc>,
) -> WriteOutcome {
    let targets = write_targets(mode, provider_order);
    let mut out = WriteOutcome::default();

    for canonical_id in &deletion.needs_propagation {
        let Some(mapping) = state.mappings.get(canonical_id) else { continue };
        let surviving: Vec<(ProviderTag, String)> = targets
            .iter()
            .filter(|tag| snapshots.contains_key(*tag))
            .filter_map(|tag| mapping.provider_id(tag).map(|id| (tag.clone(), id.to_string())))
            .collect();

        for (tag, provider_id) in surviving {
            let Some(provider) = providers.get(&tag) else { continue };
            match provider.delete_task(&provider_id).await {
                Ok(()) => {
                    out.record(*canonical_id, tag.clone(), ActionKind::Delete);
                    state.add_tombstone(Tombstone::new(tag.clone(), provider_id.clone(), now));
                    if let Some(mapping) = state.mappings.get_mut(canonical_id) {
                        mapping.remove_provider(&tag);
                    }
                }
                Err(e) => out.errors.push(format!("{tag}: delete_task({provider_id}) failed: {e}")),
            }
        }
    }

    state.sweep_empty_mappings();
    out
}

/// Apply create/recreate/update/noop for every mapping not excluded this
/// cycle by delete-wins (§4.8).
pub async fn write_fields(
    state: &mut SyncState,
    providers: &IndexMap<ProviderTag, Arc<dyn Provider>>,
    snapshots: &IndexMap<ProviderTag, ProviderSnapshot>,
    mode: SyncMode,
    provider_order: &[ProviderTag],
    skip: &HashSet<CanonicalId>,
) -> WriteOutcome {
    let targets = write_targets(mode, provider_order);
    let mut out = WriteOutcome::default();

    let mapping_ids: Vec<CanonicalId> = state
        .mappings
        .keys()
        .filter(|id| !skip.contains(id))
        .copied()
        .collect();

    for canonical_id in mapping_ids {
        for tag in &targets {
            let Some(provider) = providers.get(tag) else { continue };
            // A provider whose full index failed this cycle is unhealthy
            // (C4): its mappings are left untouched, not written to.
            if !snapshots.contains_key(tag) {
                continue;
            }
            let canonical = match state.mappings.get(&canonical_id) {
                Some(m) => m.canonical.clone(),
                None => continue,
            };
            let existing_id = state.mappings[&canonical_id].provider_id(tag).map(str::to_string);
            let remote = snapshots
                .get(tag)
                .and_then(|snap| existing_id.as_deref().and_then(|id| snap.all.iter().find(|r| r.id == id)));

            match existing_id {
                None => match provider.upsert_task(None, &canonical).await {
                    Ok(remote) => {
                        if let Some(mapping) = state.mappings.get_mut(&canonical_id) {
                            mapping.set_provider_id(tag.clone(), remote.id);
                        }
                        out.record(canonical_id, tag.clone(), ActionKind::Create);
                    }
                    Err(e) => out.errors.push(format!("{tag}: create failed: {e}")),
                },
                Some(id) => match remote {
                    None => {
                        if state.is_tombstoned(tag, &id) {
                            continue; // delete-wins: do not resurrect a tombstoned id
                        }
                        match provider.upsert_task(None, &canonical).await {
                            Ok(remote) => {
                                if let Some(mapping) = state.mappings.get_mut(&canonical_id) {
                                    mapping.set_provider_id(tag.clone(), remote.id);
                                }
                                out.record(canonical_id, tag.clone(), ActionKind::Recreate);
                            }
                            Err(e) => out.errors.push(format!("{tag}: recreate failed: {e}")),
                        }
                    }
                    Some(remote) => {
                        if any_field_differs(&canonical, &remote.task) {
                            match provider.upsert_task(Some(&id), &canonical).await {
                                Ok(_) => out.record(canonical_id, tag.clone(), ActionKind::Update),
                                Err(e) => out.errors.push(format!("{tag}: update failed: {e}")),
                            }
                        } else {
                            out.record(canonical_id, tag.clone(), ActionKind::Noop);
                        }
                    }
                },
            }
        }
    }

    out
}

/// Run both delete propagation and the field pass for one cycle, in that
/// order (delete-wins, §5 ordering guarantee 1).
pub async fn fan_out(
    state: &mut SyncState,
    providers: &IndexMap<ProviderTag, Arc<dyn Provider>>,
    snapshots: &IndexMap<ProviderTag, ProviderSnapshot>,
    mode: SyncMode,
    provider_order: &[ProviderTag],
    deletion: &DeletionOutcome,
    now: DateTime<Utc>,
) -> WriteOutcome {
    let mut out = write_deletes(state, providers, snapshots, mode, provider_order, deletion, now).await;
    let skip = deletion.skip_mapping_ids();
    let fields = write_fields(state, providers, snapshots, mode, provider_order, &skip).await;
    out.merge(fields);
    out
}

#[cfg(test)]
#[path = "writer_tests.rs"]
mod tests;
