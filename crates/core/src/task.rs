// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The canonical task shape: the merged logical view of a task across providers.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle state of a task. `Completed` is not terminal for sync purposes —
/// only `Deleted` triggers delete-wins propagation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Active,
    Completed,
    Deleted,
}

impl TaskStatus {
    pub fn is_deleted(&self) -> bool {
        matches!(self, TaskStatus::Deleted)
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskStatus::Active => write!(f, "active"),
            TaskStatus::Completed => write!(f, "completed"),
            TaskStatus::Deleted => write!(f, "deleted"),
        }
    }
}

/// Priority/importance level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Importance {
    Low,
    #[default]
    Normal,
    High,
}

/// One entry in a task's checklist (sub-steps). Order is meaningful.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub text: String,
    pub checked: bool,
}

/// The engine's internal single source of truth for a logical task, against
/// which each provider's current view is diffed (see [`crate::fields`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalTask {
    /// Required, non-empty. Empty titles are never persisted outward.
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Date-only, normalized; compared by `YYYY-MM-DD` prefix (see [`crate::fields`]).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_at: Option<NaiveDate>,
    /// `HH:MM`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_time: Option<String>,
    pub status: TaskStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reminder: Option<DateTime<Utc>>,
    /// Opaque recurrence rule string (e.g. an RRULE); not interpreted by the engine.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrence: Option<String>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub importance: Importance,
    #[serde(default)]
    pub steps: Vec<Step>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

impl CanonicalTask {
    /// A blank task seeded at `at`, used when no provider snapshot exists yet.
    pub fn new(title: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self {
            title: title.into(),
            notes: None,
            due_at: None,
            due_time: None,
            status: TaskStatus::Active,
            reminder: None,
            recurrence: None,
            categories: Vec::new(),
            importance: Importance::default(),
            steps: Vec::new(),
            start_at: None,
            updated_at: at,
        }
    }

    pub fn has_title(&self) -> bool {
        !self.title.trim().is_empty()
    }
}

#[cfg(test)]
#[path = "task_tests.rs"]
mod tests;
