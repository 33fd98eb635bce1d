// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Builds the provider registry a [`ts_engine::CycleOrchestrator`] runs
//! against from a list of [`ProviderSpec`]s, wrapping each concrete adapter
//! with retry and tracing decorators.

use std::sync::Arc;

use indexmap::IndexMap;
use ts_core::ProviderTag;
use ts_providers::google::GoogleTasksProvider;
use ts_providers::local_json::LocalJsonProvider;
use ts_providers::microsoft::MicrosoftTodoProvider;
use ts_providers::{Provider, RetryingProvider, TracedProvider};

use crate::config::ProviderSpec;

fn decorate<P: Provider>(inner: P, max_retries: u32) -> Arc<dyn Provider> {
    Arc::new(TracedProvider::new(RetryingProvider::new(inner, max_retries)))
}

/// Construct one provider from its spec, wrapped for retry and tracing.
pub fn build_provider(spec: &ProviderSpec, max_retries: u32) -> Arc<dyn Provider> {
    match spec {
        ProviderSpec::Google { .. } => decorate(GoogleTasksProvider::new(), max_retries),
        ProviderSpec::Microsoft { .. } => decorate(MicrosoftTodoProvider::new(), max_retries),
        ProviderSpec::LocalJson { tag, path } => decorate(LocalJsonProvider::new(tag.as_str(), path.clone()), max_retries),
    }
}

/// Build the full registry in declaration order, keyed by the configured
/// tag (not necessarily the adapter's default tag — `GoogleTasksProvider`
/// always reports `"google"` as its own `tag()`, but the registry key is
/// what `EngineConfig.providers` names).
pub fn build_registry(specs: &[ProviderSpec], max_retries: u32) -> IndexMap<ProviderTag, Arc<dyn Provider>> {
    specs
        .iter()
        .map(|spec| (ProviderTag::new(spec.tag()), build_provider(spec, max_retries)))
        .collect()
}

#[cfg(test)]
#[path = "providers_tests.rs"]
mod tests;
