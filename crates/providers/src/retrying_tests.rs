// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::fake::FakeProvider;
use chrono::{TimeZone, Utc};
use ts_core::CanonicalTask;

fn t() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap()
}

#[tokio::test]
async fn recovers_from_a_single_transient_failure() {
    let fake = FakeProvider::new("google");
    fake.seed("a1", CanonicalTask::new("Task", t()));
    fake.fail_next(ProviderError::Transient("flaky".into()));

    let retrying = RetryingProvider::new(fake, 2);
    let tasks = retrying.list_tasks(None).await.unwrap();
    assert_eq!(tasks.len(), 1);
}

#[tokio::test]
async fn gives_up_after_exhausting_retries() {
    let fake = FakeProvider::new("google");
    fake.fail_next(ProviderError::Transient("down".into()));
    fake.fail_next(ProviderError::Transient("still down".into()));

    let retrying = RetryingProvider::new(fake, 1);
    let err = retrying.list_tasks(None).await.unwrap_err();
    assert!(err.is_transient());
}

#[tokio::test]
async fn non_transient_errors_are_not_retried() {
    let fake = FakeProvider::new("google");
    fake.fail_next(ProviderError::NotFound("a1".into()));

    let retrying = RetryingProvider::new(fake.clone(), 5);
    let err = retrying.delete_task("a1").await.unwrap_err();
    assert!(matches!(err, ProviderError::NotFound(_)));
    assert_eq!(fake.calls().len(), 1);
}
