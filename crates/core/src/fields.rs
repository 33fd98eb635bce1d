// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Semantic field equality and field-by-field copying over [`CanonicalTask`].
//!
//! A single `field_equal` dispatch over a compile-time enumerated field list
//! (rather than stringly-typed field names) drives both the field-level
//! merger's change detection and the fan-out writer's "does this field
//! differ" check, so the two can never disagree about what counts as a change.

use crate::task::CanonicalTask;

/// The fixed field set reconciled by the merger (§4.7 step 3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Title,
    Notes,
    DueAt,
    DueTime,
    Status,
    Reminder,
    Recurrence,
    Categories,
    Importance,
    Steps,
    StartAt,
}

pub const ALL_FIELDS: [Field; 11] = [
    Field::Title,
    Field::Notes,
    Field::DueAt,
    Field::DueTime,
    Field::Status,
    Field::Reminder,
    Field::Recurrence,
    Field::Categories,
    Field::Importance,
    Field::Steps,
    Field::StartAt,
];

impl Field {
    pub fn name(&self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Notes => "notes",
            Field::DueAt => "dueAt",
            Field::DueTime => "dueTime",
            Field::Status => "status",
            Field::Reminder => "reminder",
            Field::Recurrence => "recurrence",
            Field::Categories => "categories",
            Field::Importance => "importance",
            Field::Steps => "steps",
            Field::StartAt => "startAt",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// `None`/`Some("")` are one equivalence class for optional string fields.
fn nullish_collapse(s: &Option<String>) -> &str {
    match s {
        Some(s) => s.trim(),
        None => "",
    }
}

fn sorted_categories(categories: &[String]) -> Vec<&str> {
    let mut v: Vec<&str> = categories.iter().map(String::as_str).collect();
    v.sort_unstable();
    v
}

/// Semantic equality for one field between two canonical snapshots, per the
/// per-field equivalence policy in §4.7 "Semantic equality":
///   - `notes` compares trimmed.
///   - `dueAt` / `startAt` compare by `YYYY-MM-DD` prefix only.
///   - `categories` compares as a sorted set (Open Question 2: provider
///     reorderings should not produce spurious updates for a set-like field).
///   - `steps` compares as an ordered sequence (position is meaningful for a
///     checklist).
///   - Optional string fields collapse `None`/`Some("")` into one class.
pub fn field_equal(field: Field, a: &CanonicalTask, b: &CanonicalTask) -> bool {
    match field {
        Field::Title => a.title.trim() == b.title.trim(),
        Field::Notes => nullish_collapse(&a.notes) == nullish_collapse(&b.notes),
        Field::DueAt => a.due_at == b.due_at,
        Field::DueTime => nullish_collapse(&a.due_time) == nullish_collapse(&b.due_time),
        Field::Status => a.status == b.status,
        Field::Reminder => a.reminder == b.reminder,
        Field::Recurrence => nullish_collapse(&a.recurrence) == nullish_collapse(&b.recurrence),
        Field::Categories => sorted_categories(&a.categories) == sorted_categories(&b.categories),
        Field::Importance => a.importance == b.importance,
        Field::Steps => a.steps == b.steps,
        Field::StartAt => a.start_at.map(|d| d.date_naive()) == b.start_at.map(|d| d.date_naive()),
    }
}

/// All fields where `a` and `b` differ semantically.
pub fn changed_fields(a: &CanonicalTask, b: &CanonicalTask) -> Vec<Field> {
    ALL_FIELDS
        .into_iter()
        .filter(|&f| !field_equal(f, a, b))
        .collect()
}

/// Copy a single field's value from `from` into `into`.
pub fn copy_field(field: Field, from: &CanonicalTask, into: &mut CanonicalTask) {
    match field {
        Field::Title => into.title = from.title.clone(),
        Field::Notes => into.notes = from.notes.clone(),
        Field::DueAt => into.due_at = from.due_at,
        Field::DueTime => into.due_time = from.due_time.clone(),
        Field::Status => into.status = from.status,
        Field::Reminder => into.reminder = from.reminder,
        Field::Recurrence => into.recurrence = from.recurrence.clone(),
        Field::Categories => into.categories = from.categories.clone(),
        Field::Importance => into.importance = from.importance,
        Field::Steps => into.steps = from.steps.clone(),
        Field::StartAt => into.start_at = from.start_at,
    }
}

/// True if any reconciled field differs between two snapshots (used by the
/// fan-out writer's update-vs-noop decision).
pub fn any_field_differs(a: &CanonicalTask, b: &CanonicalTask) -> bool {
    ALL_FIELDS.into_iter().any(|f| !field_equal(f, a, b))
}

#[cfg(test)]
#[path = "fields_tests.rs"]
mod tests;
