// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! A decorator that adds `tracing` spans to any [`Provider`], mirroring
//! `oj-adapters::traced::TracedSession`.

use crate::provider::{Provider, ProviderError, RemoteTask};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::Instrument;
use ts_core::{CanonicalTask, ProviderTag};

#[derive(Clone)]
pub struct TracedProvider<P> {
    inner: P,
}

impl<P> TracedProvider<P> {
    pub fn new(inner: P) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<P: Provider> Provider for TracedProvider<P> {
    fn tag(&self) -> &ProviderTag {
        self.inner.tag()
    }

    async fn list_tasks(&self, since: Option<DateTime<Utc>>) -> Result<Vec<RemoteTask>, ProviderError> {
        let span = tracing::info_span!("provider.list_tasks", provider = %self.tag(), incremental = since.is_some());
        async {
            let start = std::time::Instant::now();
            let result = self.inner.list_tasks(since).await;
            let elapsed_ms = start.elapsed().as_millis() as u64;
            match &result {
                Ok(tasks) => tracing::info!(count = tasks.len(), elapsed_ms, "listed"),
                Err(e) => tracing::error!(elapsed_ms, error = %e, "list failed"),
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn upsert_task(&self, id: Option<&str>, task: &CanonicalTask) -> Result<RemoteTask, ProviderError> {
        let span = tracing::info_span!("provider.upsert_task", provider = %self.tag(), id, is_create = id.is_none());
        async {
            let start = std::time::Instant::now();
            let result = self.inner.upsert_task(id, task).await;
            let elapsed_ms = start.elapsed().as_millis() as u64;
            match &result {
                Ok(remote) => tracing::info!(remote_id = remote.id.as_str(), elapsed_ms, "upserted"),
                Err(e) => tracing::error!(elapsed_ms, error = %e, "upsert failed"),
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn delete_task(&self, id: &str) -> Result<(), ProviderError> {
        let span = tracing::info_span!("provider.delete_task", provider = %self.tag(), id);
        async {
            let result = self.inner.delete_task(id).await;
            match &result {
                Ok(()) => tracing::info!("deleted"),
                Err(e) => tracing::warn!(error = %e, "delete failed (may already be gone)"),
            }
            result
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
