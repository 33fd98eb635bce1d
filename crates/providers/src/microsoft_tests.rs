// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use chrono::TimeZone;

fn t() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap()
}

#[tokio::test]
async fn every_operation_is_not_implemented_without_a_transport() {
    let provider = MicrosoftTodoProvider::new();
    assert_eq!(provider.tag().as_str(), "microsoft");

    assert!(matches!(
        provider.list_tasks(None).await,
        Err(ProviderError::NotImplemented(_))
    ));
    assert!(matches!(
        provider.upsert_task(None, &CanonicalTask::new("x", t())).await,
        Err(ProviderError::NotImplemented(_))
    ));
    assert!(matches!(
        provider.delete_task("1").await,
        Err(ProviderError::NotImplemented(_))
    ));
}
