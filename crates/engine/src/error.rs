// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Engine-level errors (§7): fatal for the cycle, as distinct from
//! [`ts_providers::ProviderError`], which is recorded per-call and does not
//! abort the cycle.

use thiserror::Error;
use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("could not acquire exclusion lock: {0}")]
    Lock(#[from] ts_storage::LockError),
    #[error("state store error: {0}")]
    State(#[from] ts_storage::StateError),
}
