// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Google Tasks provider skeleton.
//!
//! Translating `CanonicalTask` to/from the Tasks API representation
//! (RFC 3339 `due` dates with no time component, `notes` metadata-block
//! encoding for fields Tasks has no column for, OAuth token refresh) is out
//! of scope for this crate. This type exists so a binary crate's provider
//! registry can name `"google"` and compile against it; every operation
//! fails until [`GoogleTasksProvider::with_transport`] is given a working
//! [`HttpTransport`].

use crate::provider::{Provider, ProviderError, RemoteTask};
use crate::transport::HttpTransport;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use ts_core::{CanonicalTask, ProviderTag};

pub struct GoogleTasksProvider {
    tag: ProviderTag,
    transport: Option<Box<dyn HttpTransport>>,
}

impl GoogleTasksProvider {
    pub fn new() -> Self {
        Self {
            tag: ProviderTag::new("google"),
            transport: None,
        }
    }

    pub fn with_transport(transport: Box<dyn HttpTransport>) -> Self {
        Self {
            tag: ProviderTag::new("google"),
            transport: Some(transport),
        }
    }
}

impl Default for GoogleTasksProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Provider for GoogleTasksProvider {
    fn tag(&self) -> &ProviderTag {
        &self.tag
    }

    async fn list_tasks(&self, _since: Option<DateTime<Utc>>) -> Result<Vec<RemoteTask>, ProviderError> {
        match &self.transport {
            Some(_) => Err(ProviderError::NotImplemented("GoogleTasksProvider::list_tasks")),
            None => Err(ProviderError::NotImplemented("GoogleTasksProvider has no transport configured")),
        }
    }

    async fn upsert_task(&self, _id: Option<&str>, _task: &CanonicalTask) -> Result<RemoteTask, ProviderError> {
        Err(ProviderError::NotImplemented("GoogleTasksProvider::upsert_task"))
    }

    async fn delete_task(&self, _id: &str) -> Result<(), ProviderError> {
        Err(ProviderError::NotImplemented("GoogleTasksProvider::delete_task"))
    }
}

#[cfg(test)]
#[path = "google_tests.rs"]
mod tests;
