// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory provider for tests, mirroring `oj-adapters::session::FakeSessionAdapter`.

use crate::provider::{Provider, ProviderError, RemoteTask};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use ts_core::{CanonicalTask, ProviderTag, TaskStatus};

/// One recorded call, for assertions in engine tests.
#[derive(Debug, Clone)]
pub enum ProviderCall {
    ListTasks { since: Option<DateTime<Utc>> },
    UpsertTask { id: Option<String>, task: CanonicalTask },
    DeleteTask { id: String },
}

struct FakeProviderState {
    tasks: HashMap<String, CanonicalTask>,
    calls: Vec<ProviderCall>,
    next_id: u64,
    fail_next: Option<ProviderError>,
}

/// In-memory [`Provider`] backed by a shared map, with a call log and a
/// one-shot failure injector for exercising the engine's error paths.
#[derive(Clone)]
pub struct FakeProvider {
    tag: ProviderTag,
    inner: Arc<Mutex<FakeProviderState>>,
}

impl FakeProvider {
    pub fn new(tag: impl Into<ProviderTag>) -> Self {
        Self {
            tag: tag.into(),
            inner: Arc::new(Mutex::new(FakeProviderState {
                tasks: HashMap::new(),
                calls: Vec::new(),
                next_id: 0,
                fail_next: None,
            })),
        }
    }

    /// All calls made so far, in order.
    pub fn calls(&self) -> Vec<ProviderCall> {
        self.inner.lock().calls.clone()
    }

    /// Insert a task directly under a chosen id, bypassing the call log —
    /// for seeding a provider's starting state in a test.
    pub fn seed(&self, id: impl Into<String>, task: CanonicalTask) {
        self.inner.lock().tasks.insert(id.into(), task);
    }

    /// Remove a task entirely, as if deleted by some other client outside
    /// this engine's awareness — simulates an "external delete" (C6) rather
    /// than `delete_task`'s `status = Deleted` soft-delete.
    pub fn purge(&self, id: &str) {
        self.inner.lock().tasks.remove(id);
    }

    /// The next call to any method returns `err` instead of executing.
    pub fn fail_next(&self, err: ProviderError) {
        self.inner.lock().fail_next = Some(err);
    }

    pub fn get(&self, id: &str) -> Option<CanonicalTask> {
        self.inner.lock().tasks.get(id).cloned()
    }

    fn take_failure(&self) -> Option<ProviderError> {
        self.inner.lock().fail_next.take()
    }
}

#[async_trait]
impl Provider for FakeProvider {
    fn tag(&self) -> &ProviderTag {
        &self.tag
    }

    async fn list_tasks(&self, since: Option<DateTime<Utc>>) -> Result<Vec<RemoteTask>, ProviderError> {
        self.inner.lock().calls.push(ProviderCall::ListTasks { since });
        if let Some(err) = self.take_failure() {
            return Err(err);
        }

        let inner = self.inner.lock();
        let mut tasks: Vec<RemoteTask> = inner
            .tasks
            .iter()
            .filter(|(_, task)| match since {
                Some(cutoff) => task.updated_at >= cutoff,
                None => true,
            })
            .map(|(id, task)| RemoteTask { id: id.clone(), task: task.clone() })
            .collect();
        tasks.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(tasks)
    }

    async fn upsert_task(&self, id: Option<&str>, task: &CanonicalTask) -> Result<RemoteTask, ProviderError> {
        self.inner.lock().calls.push(ProviderCall::UpsertTask {
            id: id.map(str::to_string),
            task: task.clone(),
        });
        if let Some(err) = self.take_failure() {
            return Err(err);
        }

        let mut inner = self.inner.lock();
        let resolved_id = match id {
            Some(existing) => existing.to_string(),
            None => {
                inner.next_id += 1;
                format!("{}-{}", self.tag.as_str(), inner.next_id)
            }
        };
        inner.tasks.insert(resolved_id.clone(), task.clone());
        Ok(RemoteTask { id: resolved_id, task: task.clone() })
    }

    async fn delete_task(&self, id: &str) -> Result<(), ProviderError> {
        self.inner.lock().calls.push(ProviderCall::DeleteTask { id: id.to_string() });
        if let Some(err) = self.take_failure() {
            return Err(err);
        }

        let mut inner = self.inner.lock();
        match inner.tasks.get_mut(id) {
            Some(task) => {
                task.status = TaskStatus::Deleted;
                Ok(())
            }
            None => Err(ProviderError::NotFound(id.to_string())),
        }
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
