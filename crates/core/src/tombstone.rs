// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tombstone: forbids (re)creation of a provider-local id for a TTL window.

use crate::ProviderTag;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tombstone {
    pub provider: ProviderTag,
    pub id: String,
    pub deleted_at: DateTime<Utc>,
}

impl Tombstone {
    pub fn new(provider: ProviderTag, id: impl Into<String>, deleted_at: DateTime<Utc>) -> Self {
        Self {
            provider,
            id: id.into(),
            deleted_at,
        }
    }

    /// P8: a tombstone with `deleted_at` older than `ttl_days` is expired.
    pub fn is_expired(&self, now: DateTime<Utc>, ttl_days: u32) -> bool {
        now.signed_duration_since(self.deleted_at) > chrono::Duration::days(ttl_days as i64)
    }

    pub fn matches(&self, provider: &ProviderTag, id: &str) -> bool {
        &self.provider == provider && self.id == id
    }
}

#[cfg(test)]
#[path = "tombstone_tests.rs"]
mod tests;
