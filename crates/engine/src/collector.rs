// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Snapshot Collector (C4): concurrent `list_tasks` across every configured
//! provider, with per-call error accounting.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use tokio::task::JoinSet;
use ts_core::ProviderTag;
use ts_providers::{Provider, RemoteTask};

/// One provider's view for this cycle: the incremental changed set and the
/// full index (used by the deletion resolver to detect external deletes).
#[derive(Debug, Clone)]
pub struct ProviderSnapshot {
    pub tag: ProviderTag,
    pub changed: Vec<RemoteTask>,
    pub all: Vec<RemoteTask>,
}

/// Collect snapshots for every provider concurrently (`tokio::task::JoinSet`,
/// grounded in `oj-engine`'s use of `tokio` for concurrent provider I/O).
///
/// A provider whose `list_tasks(None)` call fails is excluded from the
/// returned map entirely (C4: "a provider whose list_all failed is excluded
/// from reconciliation this cycle"); both failures are recorded into
/// `errors`, tagged by which call failed.
pub async fn collect_snapshots(
    providers: &[Arc<dyn Provider>],
    since: Option<DateTime<Utc>>,
) -> (IndexMap<ProviderTag, ProviderSnapshot>, Vec<String>) {
    let mut set = JoinSet::new();
    for provider in providers {
        let provider = Arc::clone(provider);
        set.spawn(async move {
            let tag = provider.tag().clone();
            let all = provider.list_tasks(None).await;
            let changed = provider.list_tasks(since).await;
            (tag, changed, all)
        });
    }

    let mut snapshots = IndexMap::new();
    let mut errors = Vec::new();
    while let Some(outcome) = set.join_next().await {
        match outcome {
            Ok((tag, changed, all)) => {
                let changed = match changed {
                    Ok(tasks) => tasks,
                    Err(e) => {
                        errors.push(format!("{tag}: list_tasks(since) failed: {e}"));
                        Vec::new()
                    }
                };
                match all {
                    Ok(all) => {
                        snapshots.insert(tag.clone(), ProviderSnapshot { tag, changed, all });
                    }
                    Err(e) => {
                        errors.push(format!("{tag}: list_tasks(None) failed, excluding provider this cycle: {e}"));
                    }
                }
            }
            Err(join_err) => errors.push(format!("collector task failed: {join_err}")),
        }
    }

    // Restore declaration order for deterministic downstream iteration.
    snapshots.sort_by(|a, _, b, _| {
        providers
            .iter()
            .position(|p| p.tag() == a)
            .cmp(&providers.iter().position(|p| p.tag() == b))
    });

    (snapshots, errors)
}

#[cfg(test)]
#[path = "collector_tests.rs"]
mod tests;
