// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Deletion Resolver (C6): tombstone every side of an intentional or
//! external delete, before the field-level merger runs (delete-wins).

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use ts_core::{CanonicalId, ProviderTag, Tombstone};
use ts_storage::SyncState;

use crate::collector::ProviderSnapshot;

/// What the deletion pass did, consumed by the merger (to skip tombstoned
/// mappings this cycle) and the fan-out writer (to propagate the delete to
/// surviving sides and to recognize resurrection-suppression candidates).
#[derive(Debug, Default)]
pub struct DeletionOutcome {
    /// `(canonical_id, provider)` pairs whose side was tombstoned and
    /// removed this cycle. Checked by the writer before a `recreate` so a
    /// just-deleted side is never immediately written back to.
    pub removed_this_cycle: HashSet<(CanonicalId, ProviderTag)>,
    /// Mappings that lost at least one side this cycle and still have
    /// surviving sides — these need the delete propagated by the writer.
    pub needs_propagation: Vec<CanonicalId>,
    /// Mappings that lost every side and were removed outright (pure orphans).
    pub removed_mappings: Vec<CanonicalId>,
}

/// Tombstone every provider side reporting `status = Deleted` or missing
/// entirely from the provider's full index (external delete), for every
/// mapping whose provider is part of a healthy (collected) snapshot this
/// cycle. Mappings left with an empty `by_provider` are removed immediately
/// (Open Question 1).
pub fn resolve_deletions(
    state: &mut SyncState,
    snapshots: &IndexMap<ProviderTag, ProviderSnapshot>,
    now: DateTime<Utc>,
) -> DeletionOutcome {
    let mut outcome = DeletionOutcome::default();
    let mapping_ids: Vec<CanonicalId> = state.mappings.keys().cloned().collect();

    for canonical_id in mapping_ids {
        let providers: Vec<ProviderTag> = state.mappings[&canonical_id].by_provider.keys().cloned().collect();
        let mut lost_a_side = false;

        for provider in providers {
            let Some(snapshot) = snapshots.get(&provider) else {
                continue; // excluded this cycle (list_all failed); leave untouched
            };
            let Some(provider_id) = state.mappings[&canonical_id].provider_id(&provider).map(str::to_string) else {
                continue;
            };

            // (a) Intentional deletion: the provider signaled it directly in
            // its incremental changes.
            let signaled_in_changes = snapshot.changed.iter().any(|r| r.id == provider_id && r.task.status.is_deleted());

            // (b) External deletion inferred from the full index: either the
            // id is gone entirely, or it lingers marked deleted. Covers
            // deletions a provider missed signaling via `changed` (e.g. one
            // that predates a watermark advanced while the provider was
            // unhealthy).
            let remote = snapshot.all.iter().find(|r| r.id == provider_id);
            let inferred_from_index = match remote {
                Some(r) => r.task.status.is_deleted(),
                None => true,
            };

            if !signaled_in_changes && !inferred_from_index {
                continue;
            }

            state.add_tombstone(Tombstone::new(provider.clone(), provider_id, now));
            if let Some(mapping) = state.mappings.get_mut(&canonical_id) {
                mapping.remove_provider(&provider);
            }
            outcome.removed_this_cycle.insert((canonical_id, provider));
            lost_a_side = true;
        }

        if lost_a_side {
            let still_alive = state
                .mappings
                .get(&canonical_id)
                .map(|m| !m.is_orphan())
                .unwrap_or(false);
            if still_alive {
                outcome.needs_propagation.push(canonical_id);
            }
        }
    }

    outcome.removed_mappings = state.sweep_empty_mappings();
    outcome
}

impl DeletionOutcome {
    /// Mappings the field-level merger and fan-out writer must leave alone
    /// this cycle: delete-wins means any mapping that lost a side, whether
    /// it still has survivors (`needs_propagation`) or was removed outright
    /// (`removed_mappings`), is handled exclusively by delete propagation.
    pub fn skip_mapping_ids(&self) -> HashSet<CanonicalId> {
        self.removed_this_cycle
            .iter()
            .map(|(id, _)| *id)
            .chain(self.removed_mappings.iter().copied())
            .collect()
    }
}

#[cfg(test)]
#[path = "deletion_tests.rs"]
mod tests;
