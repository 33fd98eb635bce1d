// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Microsoft To Do provider skeleton.
//!
//! Graph API translation (RRULE<->Microsoft recurrence pattern, `importance`
//! mapping, `checklistItems` for `steps`, delta-query tokens for incremental
//! `list_tasks`) is out of scope for this crate; see [`crate::google`] for
//! the same boundary on the other side.

use crate::provider::{Provider, ProviderError, RemoteTask};
use crate::transport::HttpTransport;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use ts_core::{CanonicalTask, ProviderTag};

pub struct MicrosoftTodoProvider {
    tag: ProviderTag,
    transport: Option<Box<dyn HttpTransport>>,
}

impl MicrosoftTodoProvider {
    pub fn new() -> Self {
        Self {
            tag: ProviderTag::new("microsoft"),
            transport: None,
        }
    }

    pub fn with_transport(transport: Box<dyn HttpTransport>) -> Self {
        Self {
            tag: ProviderTag::new("microsoft"),
            transport: Some(transport),
        }
    }
}

impl Default for MicrosoftTodoProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Provider for MicrosoftTodoProvider {
    fn tag(&self) -> &ProviderTag {
        &self.tag
    }

    async fn list_tasks(&self, _since: Option<DateTime<Utc>>) -> Result<Vec<RemoteTask>, ProviderError> {
        match &self.transport {
            Some(_) => Err(ProviderError::NotImplemented("MicrosoftTodoProvider::list_tasks")),
            None => Err(ProviderError::NotImplemented("MicrosoftTodoProvider has no transport configured")),
        }
    }

    async fn upsert_task(&self, _id: Option<&str>, _task: &CanonicalTask) -> Result<RemoteTask, ProviderError> {
        Err(ProviderError::NotImplemented("MicrosoftTodoProvider::upsert_task"))
    }

    async fn delete_task(&self, _id: &str) -> Result<(), ProviderError> {
        Err(ProviderError::NotImplemented("MicrosoftTodoProvider::delete_task"))
    }
}

#[cfg(test)]
#[path = "microsoft_tests.rs"]
mod tests;
