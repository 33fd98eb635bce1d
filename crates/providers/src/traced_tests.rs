// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::fake::FakeProvider;
use chrono::TimeZone;
use ts_core::CanonicalTask;

fn t() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap()
}

#[tokio::test]
async fn forwards_tag_and_calls_to_inner_provider() {
    let fake = FakeProvider::new("google");
    let traced = TracedProvider::new(fake.clone());

    assert_eq!(traced.tag().as_str(), "google");

    let remote = traced
        .upsert_task(None, &CanonicalTask::new("Buy milk", t()))
        .await
        .unwrap();
    assert_eq!(fake.get(&remote.id).unwrap().title, "Buy milk");

    let listed = traced.list_tasks(None).await.unwrap();
    assert_eq!(listed.len(), 1);

    traced.delete_task(&remote.id).await.unwrap();
    assert_eq!(fake.get(&remote.id).unwrap().status, ts_core::TaskStatus::Deleted);
}

#[tokio::test]
async fn surfaces_errors_from_inner_provider() {
    let fake = FakeProvider::new("google");
    fake.fail_next(ProviderError::Transient("boom".into()));
    let traced = TracedProvider::new(fake);

    let err = traced.list_tasks(None).await.unwrap_err();
    assert!(matches!(err, ProviderError::Transient(_)));
}
