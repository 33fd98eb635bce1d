// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The HTTP seam a real provider client plugs into.
//!
//! Out of scope here (OAuth refresh, pagination, rate-limit headers — see
//! the crate-level Non-goals): this trait exists only so [`crate::google`]
//! and [`crate::microsoft`] have somewhere to hang a transport once one is
//! written, without embedding HTTP/OAuth logic in this crate.

use crate::provider::ProviderError;
use async_trait::async_trait;
use serde_json::Value;

#[async_trait]
pub trait HttpTransport: Send + Sync + 'static {
    async fn get(&self, path: &str) -> Result<Value, ProviderError>;
    async fn post(&self, path: &str, body: Value) -> Result<Value, ProviderError>;
    async fn patch(&self, path: &str, body: Value) -> Result<Value, ProviderError>;
    async fn delete(&self, path: &str) -> Result<(), ProviderError>;
}
