// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Cold-Start Matcher (C5): group not-yet-mapped tasks across providers by
//! `normalize(title) \u{2295} normalize(notes)` so a pre-existing identical
//! task on two providers becomes one mapping instead of a duplicate.

use indexmap::IndexMap;
use ts_core::{cold_start_key, ProviderTag};
use ts_providers::RemoteTask;
use ts_storage::SyncState;

use crate::collector::ProviderSnapshot;

/// A group of tasks across ≥2 distinct providers sharing a cold-start key.
/// Singleton groups (only one provider has the task) are left for the
/// merger's "ensure mappings for unseen provider tasks" step instead.
#[derive(Debug, Clone)]
pub struct ColdStartGroup {
    pub members: Vec<(ProviderTag, RemoteTask)>,
}

/// Find cold-start groups among tasks with no existing mapping and no active
/// tombstone, across every provider's full index.
pub fn find_cold_start_groups(
    state: &SyncState,
    snapshots: &IndexMap<ProviderTag, ProviderSnapshot>,
) -> Vec<ColdStartGroup> {
    let mut groups: IndexMap<String, Vec<(ProviderTag, RemoteTask)>> = IndexMap::new();

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
            let key = cold_start_key(&remote.task.title, remote.task.notes.as_deref());
            groups
                .entry(key)
                .or_default()
                .push((snapshot.tag.clone(), remote.clone()));
        }
    }

    groups
        .into_values()
        .filter(|members| {
            let mut distinct: Vec<&ProviderTag> = members.iter().map(|(p, _)| p).collect();
            distinct.sort();
            distinct.dedup();
            distinct.len() >= 2
        })
        .map(|members| ColdStartGroup { members })
        .collect()
}

#[cfg(test)]
#[path = "matcher_tests.rs"]
mod tests;
