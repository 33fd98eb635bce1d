// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The persisted sync document: mappings, tombstones, and the watermark.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use ts_core::{CanonicalId, Mapping, ProviderTag, Tombstone};

pub const CURRENT_VERSION: u32 = 1;

/// One logical sync document (§3 "SyncState").
///
/// `mappings` is keyed by `canonicalId` (Invariant 1: unique). `tombstones`
/// is a plain multiset — the same `(provider, id)` pair may legitimately
/// appear more than once across the document's lifetime, though in practice
/// `add_tombstone` is idempotent per pair at any instant.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncState {
    #[serde(default)]
    pub version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_sync_at: Option<DateTime<Utc>>,
    #[serde(default, with = "mapping_list")]
    pub mappings: IndexMap<CanonicalId, Mapping>,
    #[serde(default)]
    pub tombstones: Vec<Tombstone>,
}

impl SyncState {
    pub fn empty() -> Self {
        Self {
            version: CURRENT_VERSION,
            last_sync_at: None,
            mappings: IndexMap::new(),
            tombstones: Vec::new(),
        }
    }

    pub fn find_mapping(&self, provider: &ProviderTag, id: &str) -> Option<&Mapping> {
        self.mappings
            .values()
            .find(|m| m.provider_id(provider) == Some(id))
    }

    pub fn find_mapping_mut(&mut self, provider: &ProviderTag, id: &str) -> Option<&mut Mapping> {
        self.mappings
            .values_mut()
            .find(|m| m.provider_id(provider) == Some(id))
    }

    pub fn is_tombstoned(&self, provider: &ProviderTag, id: &str) -> bool {
        self.tombstones.iter().any(|t| t.matches(provider, id))
    }

    pub fn add_tombstone(&mut self, tombstone: Tombstone) {
        if !self.is_tombstoned(&tombstone.provider, &tombstone.id) {
            self.tombstones.push(tombstone);
        }
    }

    /// P8: drop tombstones older than `ttl_days`.
    pub fn prune_expired_tombstones(&mut self, now: DateTime<Utc>, ttl_days: u32) -> usize {
        let before = self.tombstones.len();
        self.tombstones.retain(|t| !t.is_expired(now, ttl_days));
        before - self.tombstones.len()
    }

    pub fn remove_mapping(&mut self, canonical_id: &CanonicalId) -> Option<Mapping> {
        self.mappings.shift_remove(canonical_id)
    }

    /// Invariant 5: a mapping whose `by_provider` becomes empty is removed.
    /// Called after any operation that might have dropped the mapping's last
    /// provider id (see SPEC_FULL.md Open Question 1).
    pub fn sweep_empty_mappings(&mut self) -> Vec<CanonicalId> {
        let empty: Vec<CanonicalId> = self
            .mappings
            .iter()
            .filter(|(_, m)| m.is_orphan())
            .map(|(id, _)| id.clone())
            .collect();
        for id in &empty {
            self.mappings.shift_remove(id);
        }
        empty
    }
}

/// `IndexMap<CanonicalId, Mapping>` serializes as the plain JSON array of
/// mappings described in §6 (`canonicalId` lives inside each element, not as
/// an object key), while still giving the engine O(1) lookup in memory.
mod mapping_list {
    use super::*;
    use serde::{Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        map: &IndexMap<CanonicalId, Mapping>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let values: Vec<&Mapping> = map.values().collect();
        values.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<IndexMap<CanonicalId, Mapping>, D::Error> {
        let values: Vec<Mapping> = Vec::deserialize(deserializer)?;
        Ok(values
            .into_iter()
            .map(|m| (m.canonical_id, m))
            .collect())
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
