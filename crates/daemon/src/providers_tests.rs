// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn registry_keys_match_configured_tags_in_order() {
    let specs = vec![
        ProviderSpec::Google { tag: "google".into() },
        ProviderSpec::Microsoft { tag: "microsoft".into() },
    ];
    let registry = build_registry(&specs, 3);
    let keys: Vec<&str> = registry.keys().map(|t| t.as_str()).collect();
    assert_eq!(keys, vec!["google", "microsoft"]);
}

#[tokio::test]
async fn an_unimplemented_google_provider_still_reports_its_configured_tag() {
    let provider = build_provider(&ProviderSpec::Google { tag: "google".into() }, 0);
    assert_eq!(provider.tag().as_str(), "google");
    let err = provider.list_tasks(None).await.unwrap_err();
    assert!(matches!(err, ts_providers::ProviderError::NotImplemented(_)));
}

#[tokio::test]
async fn a_local_json_provider_round_trips_through_the_registry() {
    let dir = tempfile::tempdir().unwrap();
    let spec = ProviderSpec::LocalJson { tag: "demo".into(), path: dir.path().join("demo.json") };
    let provider = build_provider(&spec, 0);

    let task = ts_core::CanonicalTask::new("Buy milk", chrono::Utc::now());
    let created = provider.upsert_task(None, &task).await.unwrap();
    let tasks = provider.list_tasks(None).await.unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].id, created.id);
}
