// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Exponential backoff with jitter for transient provider failures (§5).
//!
//! A concrete provider need only express its call as a fallible async
//! closure; this helper supplies the retry policy, mirroring `oj-engine`'s
//! retry/backoff helpers for flaky subprocess spawns.

use crate::provider::ProviderError;
use std::future::Future;
use std::time::Duration;

const BASE_DELAY_MS: u64 = 200;
const MAX_DELAY_MS: u64 = 10_000;

/// Retry `attempt` up to `max_retries` additional times on transient errors,
/// doubling the delay each time and adding up to 100ms of jitter.
pub async fn with_backoff<F, Fut, T>(max_retries: u32, mut attempt: F) -> Result<T, ProviderError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ProviderError>>,
{
    let mut delay_ms = BASE_DELAY_MS;
    let mut tries = 0;
    loop {
        match attempt().await {
            Ok(value) => return Ok(value),
            Err(err) if tries < max_retries && err.is_transient() => {
                tries += 1;
                let jitter = rand::random::<u64>() % 100;
                tokio::time::sleep(Duration::from_millis(delay_ms + jitter)).await;
                delay_ms = (delay_ms * 2).min(MAX_DELAY_MS);
            }
            Err(err) => return Err(err),
        }
    }
}

#[cfg(test)]
#[path = "retry_tests.rs"]
mod tests;
