// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The provider port (C3): the trait every remote task backend implements.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use ts_core::{CanonicalTask, ProviderTag};

/// Errors from a single provider call.
///
/// Recorded per-call into `SyncReport.errors`; a single call failure never
/// aborts the cycle, except that a failed `list_tasks(None)` excludes its
/// provider from this cycle's reconciliation (C4).
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("task not found: {0}")]
    NotFound(String),
    #[error("rate limited, retry after {retry_after_ms}ms")]
    RateLimited { retry_after_ms: u64 },
    #[error("transient failure: {0}")]
    Transient(String),
    #[error("authentication failed: {0}")]
    AuthFailed(String),
    #[error("{0} is not implemented")]
    NotImplemented(&'static str),
}

impl ProviderError {
    /// Whether a retry is worth attempting (used by [`crate::retry::with_backoff`]).
    pub fn is_transient(&self) -> bool {
        matches!(self, ProviderError::RateLimited { .. } | ProviderError::Transient(_))
    }
}

/// A task as reported by a provider, paired with the provider's own id for
/// it. The id is opaque outside this crate; the engine stores it in
/// `Mapping::by_provider`.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteTask {
    pub id: String,
    pub task: CanonicalTask,
}

/// Port C3: a remote task backend (Google Tasks, Microsoft To Do, ...).
///
/// Object-safe by construction (`async_trait`, no generic methods), mirroring
/// `oj-adapters::session::SessionAdapter`'s shape: a `Send + Sync + 'static`
/// bound so implementations can be boxed and shared across the polling loop.
#[async_trait]
pub trait Provider: Send + Sync + 'static {
    /// The configured tag this provider participates under (`"google"`, `"microsoft"`, ...).
    fn tag(&self) -> &ProviderTag;

    /// List tasks changed since `since`, or every task when `since` is `None`.
    ///
    /// The collector (C4) calls both forms each cycle: the `since` form to
    /// pick up edits, the `None` form to build the full index deletion
    /// detection needs. A provider that cannot support incremental listing
    /// may ignore `since` and always return the full set.
    async fn list_tasks(&self, since: Option<DateTime<Utc>>) -> Result<Vec<RemoteTask>, ProviderError>;

    /// Create (`id` is `None`) or update (`id` is `Some`) a task, returning
    /// the provider's canonical post-write view (including its id).
    async fn upsert_task(&self, id: Option<&str>, task: &CanonicalTask) -> Result<RemoteTask, ProviderError>;

    /// Delete a task by provider id. Deleting an id the provider no longer
    /// has is not an error — the desired end state is already reached.
    async fn delete_task(&self, id: &str) -> Result<(), ProviderError>;
}

#[cfg(test)]
#[path = "provider_tests.rs"]
mod tests;
