// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Field-Level Merger (C7): per mapping, diff each provider's current view
//! against the stored baseline and resolve per-field conflicts.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use ts_core::{changed_fields, copy_field, CanonicalId, Field, IdGen, Mapping, ProviderTag};
use ts_providers::RemoteTask;
use ts_storage::SyncState;

use crate::collector::ProviderSnapshot;
use crate::report::SyncConflict;

/// Create a mapping for every provider task not yet linked to one, so the
/// field pass below has a mapping to diff against (§4.7 step 1).
pub fn ensure_mappings_for_unmapped_tasks(
    state: &mut SyncState,
    snapshots: &IndexMap<ProviderTag, ProviderSnapshot>,
    id_gen: &dyn IdGen,
    now: DateTime<Utc>,
) {
    for snapshot in snapshots.values() {
        for remote in &snapshot.all {
            if remote.task.status.is_deleted() {
                continue;
            }
            if state.find_mapping(&snapshot.tag, &remote.id).is_some() {
                continue;
            }
            if state.is_tombstoned(&snapshot.tag, &remote.id) {
                continue;
            }
            let canonical_id = id_gen.next();
            let mut mapping = Mapping::new(canonical_id, remote.task.clone(), now);
            mapping.set_provider_id(snapshot.tag.clone(), remote.id.clone());
            state.mappings.insert(canonical_id, mapping);
        }
    }
}

/// Build each healthy provider's current view of a mapping's task, keyed by
/// provider in declaration order (§4.7 step 2, `byProvTask`).
fn by_provider_task<'a>(
    mapping: &Mapping,
    snapshots: &'a IndexMap<ProviderTag, ProviderSnapshot>,
) -> IndexMap<ProviderTag, &'a RemoteTask> {
    let mut out = IndexMap::new();
    for (tag, snapshot) in snapshots {
        let Some(provider_id) = mapping.provider_id(tag) else {
            continue;
        };
        if let Some(remote) = snapshot.all.iter().find(|r| r.id == provider_id) {
            out.insert(tag.clone(), remote);
        }
    }
    out
}

/// Merge one mapping's baseline against every healthy provider's current
/// view, mutating `canonical` in place and returning any true conflicts.
///
/// Mappings are skipped by the caller when tombstoned this cycle
/// (delete-wins has already run); this function assumes that filtering has
/// happened.
fn merge_one(mapping: &mut Mapping, snapshots: &IndexMap<ProviderTag, ProviderSnapshot>) -> Vec<SyncConflict> {
    let by_prov_task = by_provider_task(mapping, snapshots);
    if by_prov_task.is_empty() {
        return Vec::new();
    }

    // §4.7 step 4: seed from baseline; mapping already has one (created with
    // a canonical snapshot), so no "first observed" branch is needed here —
    // `ensure_mappings_for_unmapped_tasks` already seeded brand-new mappings.
    let baseline = mapping.canonical.clone();

    let mut contenders: IndexMap<Field, Vec<(ProviderTag, &RemoteTask)>> = IndexMap::new();
    for (tag, remote) in &by_prov_task {
        for field in changed_fields(&baseline, &remote.task) {
            contenders.entry(field).or_default().push((tag.clone(), *remote));
        }
    }

    let mut conflicts = Vec::new();
    let mut new_canonical = baseline.clone();
    let mut latest_updated_at = baseline.updated_at;

    for (field, mut entries) in contenders {
        match entries.len() {
            0 => unreachable!("changed_fields only yields fields with ≥1 contender"),
            1 => {
                let (_, remote) = entries[0].clone();
                copy_field(field, &remote.task, &mut new_canonical);
                if remote.task.updated_at > latest_updated_at {
                    latest_updated_at = remote.task.updated_at;
                }
            }
            _ => {
                // Sort by updatedAt descending; ties break by provider
                // declaration order (the order `by_prov_task` was built in).
                entries.sort_by(|(tag_a, a), (tag_b, b)| {
                    b.task
                        .updated_at
                        .cmp(&a.task.updated_at)
                        .then_with(|| declaration_index(tag_a, &by_prov_task).cmp(&declaration_index(tag_b, &by_prov_task)))
                });
                let (winner_tag, winner) = entries[0].clone();
                copy_field(field, &winner.task, &mut new_canonical);
                if winner.task.updated_at > latest_updated_at {
                    latest_updated_at = winner.task.updated_at;
                }
                let overwritten: Vec<ProviderTag> = entries[1..].iter().map(|(tag, _)| tag.clone()).collect();
                let mut providers: Vec<ProviderTag> = entries.iter().map(|(tag, _)| tag.clone()).collect();
                providers.sort();
                providers.dedup();
                conflicts.push(SyncConflict {
                    canonical_id: mapping.canonical_id,
                    field: field.name().to_string(),
                    providers,
                    winner: winner_tag,
                    overwritten,
                });
            }
        }
    }

    new_canonical.updated_at = latest_updated_at;
    mapping.canonical = new_canonical;
    mapping.updated_at = latest_updated_at;
    conflicts
}

fn declaration_index(tag: &ProviderTag, by_prov_task: &IndexMap<ProviderTag, &RemoteTask>) -> usize {
    by_prov_task.get_index_of(tag).unwrap_or(usize::MAX)
}

/// Merge every mapping not excluded this cycle (tombstoned mappings are
/// filtered by the caller before invoking this), returning the conflicts
/// raised across all mappings.
pub fn merge_mappings(
    state: &mut SyncState,
    snapshots: &IndexMap<ProviderTag, ProviderSnapshot>,
    skip: &std::collections::HashSet<CanonicalId>,
) -> Vec<SyncConflict> {
    let mut conflicts = Vec::new();
    for (canonical_id, mapping) in state.mappings.iter_mut() {
        if skip.contains(canonical_id) {
            continue;
        }
        conflicts.extend(merge_one(mapping, snapshots));
    }
    conflicts
}

#[cfg(test)]
#[path = "merger_tests.rs"]
mod tests;
