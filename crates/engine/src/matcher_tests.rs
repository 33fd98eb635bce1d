// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use chrono::TimeZone;
use ts_core::CanonicalTask;

fn t() -> chrono::DateTime<chrono::Utc> {
    chrono::Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap()
}

fn snapshot(tag: &str, tasks: Vec<(&str, CanonicalTask)>) -> (ProviderTag, ProviderSnapshot) {
    let tag = ProviderTag::new(tag);
    let all = tasks
        .into_iter()
        .map(|(id, task)| RemoteTask { id: id.to_string(), task })
        .collect();
    (tag.clone(), ProviderSnapshot { tag, changed: Vec::new(), all })
}

#[test]
fn groups_identical_title_and_notes_across_two_providers() {
    let mut a = CanonicalTask::new("Buy milk", t());
    a.notes = Some("2%".to_string());
    let mut b = CanonicalTask::new("  BUY   milk ", t());
    b.notes = Some("2%".to_string());

    let mut snapshots = IndexMap::new();
    let (tag, snap) = snapshot("google", vec![("g1", a)]);
    snapshots.insert(tag, snap);
    let (tag, snap) = snapshot("microsoft", vec![("m1", b)]);
    snapshots.insert(tag, snap);

    let state = SyncState::empty();
    let groups = find_cold_start_groups(&state, &snapshots);
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].members.len(), 2);
}

#[test]
fn leaves_singleton_tasks_ungrouped() {
    let mut snapshots = IndexMap::new();
    let (tag, snap) = snapshot("google", vec![("g1", CanonicalTask::new("Unique", t()))]);
    snapshots.insert(tag, snap);

    let state = SyncState::empty();
    let groups = find_cold_start_groups(&state, &snapshots);
    assert!(groups.is_empty());
}

#[test]
fn skips_tasks_with_an_existing_mapping() {
    use ts_core::{CanonicalId, Mapping};

    let mut a = CanonicalTask::new("Buy milk", t());
    a.notes = None;
    let b = CanonicalTask::new("buy milk", t());

    let mut state = SyncState::empty();
    let mut mapping = Mapping::new(CanonicalId::new(uuid::Uuid::nil()), a.clone(), t());
    mapping.set_provider_id(ProviderTag::new("google"), "g1");
    state.mappings.insert(mapping.canonical_id, mapping);

    let mut snapshots = IndexMap::new();
    let (tag, snap) = snapshot("google", vec![("g1", a)]);
    snapshots.insert(tag, snap);
    let (tag, snap) = snapshot("microsoft", vec![("m1", b)]);
    snapshots.insert(tag, snap);

    // "g1" is already mapped, so only "m1" remains — a singleton, no group.
    let groups = find_cold_start_groups(&state, &snapshots);
    assert!(groups.is_empty());
}

#[test]
fn skips_deleted_tasks() {
    use ts_core::TaskStatus;

    let mut a = CanonicalTask::new("Buy milk", t());
    a.status = TaskStatus::Deleted;
    let b = CanonicalTask::new("buy milk", t());

    let mut snapshots = IndexMap::new();
    let (tag, snap) = snapshot("google", vec![("g1", a)]);
    snapshots.insert(tag, snap);
    let (tag, snap) = snapshot("microsoft", vec![("m1", b)]);
    snapshots.insert(tag, snap);

    let state = SyncState::empty();
    let groups = find_cold_start_groups(&state, &snapshots);
    assert!(groups.is_empty());
}
