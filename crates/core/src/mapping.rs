// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Mapping: the record linking one canonical task to its provider-local ids.

use crate::{CanonicalId, CanonicalTask, ProviderTag};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// The central identity record: one per logical task.
///
/// `by_provider` is an [`IndexMap`] (not a `HashMap`) because the merger's
/// "first observed provider" tie-break (§4.7 step 4: seed canonical from the
/// first key when there is no baseline) must be deterministic.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mapping {
    pub canonical_id: CanonicalId,
    pub by_provider: IndexMap<ProviderTag, String>,
    pub canonical: CanonicalTask,
    pub updated_at: DateTime<Utc>,
}

impl Mapping {
    pub fn new(canonical_id: CanonicalId, canonical: CanonicalTask, at: DateTime<Utc>) -> Self {
        Self {
            canonical_id,
            by_provider: IndexMap::new(),
            canonical,
            updated_at: at,
        }
    }

    pub fn provider_id(&self, provider: &ProviderTag) -> Option<&str> {
        self.by_provider.get(provider).map(String::as_str)
    }

    pub fn set_provider_id(&mut self, provider: ProviderTag, id: impl Into<String>) {
        self.by_provider.insert(provider, id.into());
    }

    pub fn remove_provider(&mut self, provider: &ProviderTag) {
        self.by_provider.shift_remove(provider);
    }

    /// Invariant 5: mappings with an empty `by_provider` are removed.
    pub fn is_orphan(&self) -> bool {
        self.by_provider.is_empty()
    }
}

#[cfg(test)]
#[path = "mapping_tests.rs"]
mod tests;
