// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! A decorator that retries transient failures on any [`Provider`] via
//! [`crate::retry::with_backoff`], mirroring the way [`crate::traced`] wraps
//! a provider with cross-cutting behavior instead of baking it into each
//! adapter.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use ts_core::{CanonicalTask, ProviderTag};

use crate::provider::{Provider, ProviderError, RemoteTask};
use crate::retry::with_backoff;

#[derive(Clone)]
pub struct RetryingProvider<P> {
    inner: P,
    max_retries: u32,
}

impl<P> RetryingProvider<P> {
    pub fn new(inner: P, max_retries: u32) -> Self {
        Self { inner, max_retries }
    }
}

#[async_trait]
impl<P: Provider> Provider for RetryingProvider<P> {
    fn tag(&self) -> &ProviderTag {
        self.inner.tag()
    }

    async fn list_tasks(&self, since: Option<DateTime<Utc>>) -> Result<Vec<RemoteTask>, ProviderError> {
        with_backoff(self.max_retries, || self.inner.list_tasks(since)).await
    }

    async fn upsert_task(&self, id: Option<&str>, task: &CanonicalTask) -> Result<RemoteTask, ProviderError> {
        with_backoff(self.max_retries, || self.inner.upsert_task(id, task)).await
    }

    async fn delete_task(&self, id: &str) -> Result<(), ProviderError> {
        with_backoff(self.max_retries, || self.inner.delete_task(id)).await
    }
}

#[cfg(test)]
#[path = "retrying_tests.rs"]
mod tests;
