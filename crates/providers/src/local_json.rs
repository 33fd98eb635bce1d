// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! A demo [`Provider`] backed by a flat JSON file on disk, for running the
//! engine end-to-end without live OAuth.
//!
//! Unlike [`crate::fake::FakeProvider`], which holds its state purely in
//! memory for test isolation, this adapter re-reads the file on every call
//! and writes it back after every mutation — the point is that a human (or
//! a script standing in for "the other app") can edit the file between
//! poll cycles and watch the engine reconcile the change.

use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_core::{CanonicalTask, ProviderTag};

use crate::provider::{Provider, ProviderError, RemoteTask};

#[derive(Debug, Default, Serialize, Deserialize)]
struct JsonDocument {
    #[serde(default)]
    next_id: u64,
    #[serde(default)]
    tasks: HashMap<String, CanonicalTask>,
}

fn io_err(context: &str, e: std::io::Error) -> ProviderError {
    ProviderError::Transient(format!("{context}: {e}"))
}

fn parse_err(e: serde_json::Error) -> ProviderError {
    ProviderError::Transient(format!("malformed local_json file: {e}"))
}

/// A provider backed by a JSON file at `path`, created empty if absent.
pub struct LocalJsonProvider {
    tag: ProviderTag,
    path: PathBuf,
}

impl LocalJsonProvider {
    pub fn new(tag: impl Into<ProviderTag>, path: impl Into<PathBuf>) -> Self {
        Self { tag: tag.into(), path: path.into() }
    }

    fn read(&self) -> Result<JsonDocument, ProviderError> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) if contents.trim().is_empty() => Ok(JsonDocument::default()),
            Ok(contents) => serde_json::from_str(&contents).map_err(parse_err),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(JsonDocument::default()),
            Err(e) => Err(io_err("reading local_json file", e)),
        }
    }

    fn write(&self, doc: &JsonDocument) -> Result<(), ProviderError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| io_err("creating local_json parent dir", e))?;
        }
        let contents = serde_json::to_string_pretty(doc).map_err(parse_err)?;
        std::fs::write(&self.path, contents).map_err(|e| io_err("writing local_json file", e))
    }
}

#[async_trait]
impl Provider for LocalJsonProvider {
    fn tag(&self) -> &ProviderTag {
        &self.tag
    }

    async fn list_tasks(&self, since: Option<DateTime<Utc>>) -> Result<Vec<RemoteTask>, ProviderError> {
        let doc = self.read()?;
        let mut tasks: Vec<RemoteTask> = doc
            .tasks
            .into_iter()
            .filter(|(_, task)| match since {
                Some(cutoff) => task.updated_at >= cutoff,
                None => true,
            })
            .map(|(id, task)| RemoteTask { id, task })
            .collect();
        tasks.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(tasks)
    }

    async fn upsert_task(&self, id: Option<&str>, task: &CanonicalTask) -> Result<RemoteTask, ProviderError> {
        let mut doc = self.read()?;
        let resolved_id = match id {
            Some(existing) => existing.to_string(),
            None => {
                doc.next_id += 1;
                format!("{}-{}", self.tag.as_str(), doc.next_id)
            }
        };
        doc.tasks.insert(resolved_id.clone(), task.clone());
        self.write(&doc)?;
        Ok(RemoteTask { id: resolved_id, task: task.clone() })
    }

    async fn delete_task(&self, id: &str) -> Result<(), ProviderError> {
        let mut doc = self.read()?;
        match doc.tasks.get_mut(id) {
            Some(task) => {
                task.status = ts_core::TaskStatus::Deleted;
                self.write(&doc)
            }
            None => Err(ProviderError::NotFound(id.to_string())),
        }
    }
}

#[cfg(test)]
#[path = "local_json_tests.rs"]
mod tests;
