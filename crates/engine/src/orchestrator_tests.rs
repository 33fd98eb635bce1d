// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use chrono::TimeZone;
use ts_core::{CanonicalTask, FakeClock, SequentialIdGen};
use ts_providers::FakeProvider;

fn t(hour: u32) -> chrono::DateTime<chrono::Utc> {
    chrono::Utc.with_ymd_and_hms(2026, 1, 1, hour, 0, 0).unwrap()
}

fn orchestrator(
    dir: &std::path::Path,
    google: &FakeProvider,
    microsoft: &FakeProvider,
    clock: FakeClock,
) -> CycleOrchestrator {
    let mut providers = IndexMap::new();
    providers.insert(ProviderTag::new("google"), Arc::new(google.clone()) as Arc<dyn Provider>);
    providers.insert(ProviderTag::new("microsoft"), Arc::new(microsoft.clone()) as Arc<dyn Provider>);

    let config = EngineConfig {
        state_dir: dir.to_path_buf(),
        mode: ts_core::SyncMode::Bidirectional,
        tombstone_ttl_days: 30,
        dry_run: false,
        poll_interval_minutes: 15,
        providers: vec![ProviderTag::new("google"), ProviderTag::new("microsoft")],
    };

    CycleOrchestrator::new(config, providers, Arc::new(SequentialIdGen::new()), Arc::new(clock)).unwrap()
}

#[tokio::test]
async fn cold_start_links_matching_tasks_without_emitting_actions() {
    let dir = tempfile::tempdir().unwrap();
    let google = FakeProvider::new("google");
    google.seed("a1", CanonicalTask::new("Buy milk", t(0)));
    let microsoft = FakeProvider::new("microsoft");
    microsoft.seed("b1", CanonicalTask::new("buy milk", t(0)));

    let orch = orchestrator(dir.path(), &google, &microsoft, FakeClock::new(t(1)));
    let report = orch.run_once().await.unwrap();

    assert_eq!(report.action_counts.created, 0);
    assert_eq!(report.action_counts.updated, 0);
    assert_eq!(report.action_counts.deleted, 0);

    let store = ts_storage::StateStore::new(dir.path().join("state.json"));
    let state = store.load().unwrap();
    assert_eq!(state.mappings.len(), 1);
    let mapping = state.mappings.values().next().unwrap();
    assert_eq!(mapping.provider_id(&ProviderTag::new("google")), Some("a1"));
    assert_eq!(mapping.provider_id(&ProviderTag::new("microsoft")), Some("b1"));
}

#[tokio::test]
async fn second_consecutive_cycle_with_no_external_changes_is_all_noop() {
    let dir = tempfile::tempdir().unwrap();
    let google = FakeProvider::new("google");
    google.seed("a1", CanonicalTask::new("Task", t(0)));
    let microsoft = FakeProvider::new("microsoft");

    let orch = orchestrator(dir.path(), &google, &microsoft, FakeClock::new(t(1)));
    let first = orch.run_once().await.unwrap();
    assert_eq!(first.action_counts.created, 1);

    let second = orch.run_once().await.unwrap();
    assert_eq!(second.action_counts.created, 0);
    assert_eq!(second.action_counts.updated, 0);
    assert_eq!(second.action_counts.deleted, 0);
    assert!(second.actions.is_empty());
}

#[tokio::test]
async fn watermark_advances_monotonically_across_cycles() {
    let dir = tempfile::tempdir().unwrap();
    let google = FakeProvider::new("google");
    let microsoft = FakeProvider::new("microsoft");
    let clock = FakeClock::new(t(1));

    let orch = orchestrator(dir.path(), &google, &microsoft, clock.clone());
    let first = orch.run_once().await.unwrap();
    clock.advance(chrono::Duration::hours(1));
    let second = orch.run_once().await.unwrap();

    assert!(second.new_watermark > first.new_watermark);
    assert_eq!(second.old_watermark, Some(first.new_watermark));
}

#[tokio::test]
async fn one_unhealthy_provider_does_not_block_the_rest_of_the_cycle() {
    let dir = tempfile::tempdir().unwrap();
    let google = FakeProvider::new("google");
    google.fail_next(ts_providers::ProviderError::Transient("down".into()));
    let microsoft = FakeProvider::new("microsoft");
    microsoft.seed("m1", CanonicalTask::new("Task", t(0)));

    let orch = orchestrator(dir.path(), &google, &microsoft, FakeClock::new(t(1)));
    let report = orch.run_once().await.unwrap();

    assert!(report.errors.iter().any(|e| e.contains("google")));
    // microsoft's unmapped task still gets a mapping created even though
    // google was excluded this cycle.
    let store = ts_storage::StateStore::new(dir.path().join("state.json"));
    let state = store.load().unwrap();
    assert_eq!(state.mappings.len(), 1);
}

#[tokio::test]
async fn dry_run_does_not_persist_state_to_disk() {
    let dir = tempfile::tempdir().unwrap();
    let google = FakeProvider::new("google");
    google.seed("a1", CanonicalTask::new("Task", t(0)));
    let microsoft = FakeProvider::new("microsoft");

    let mut providers = IndexMap::new();
    providers.insert(ProviderTag::new("google"), Arc::new(google.clone()) as Arc<dyn Provider>);
    providers.insert(ProviderTag::new("microsoft"), Arc::new(microsoft.clone()) as Arc<dyn Provider>);
    let config = EngineConfig {
        state_dir: dir.path().to_path_buf(),
        mode: ts_core::SyncMode::Bidirectional,
        tombstone_ttl_days: 30,
        dry_run: true,
        poll_interval_minutes: 15,
        providers: vec![ProviderTag::new("google"), ProviderTag::new("microsoft")],
    };
    let orch = CycleOrchestrator::new(config, providers, Arc::new(SequentialIdGen::new()), Arc::new(FakeClock::new(t(1)))).unwrap();

    let report = orch.run_once().await.unwrap();
    assert_eq!(report.action_counts.created, 1);
    assert!(!dir.path().join("state.json").exists());
}
