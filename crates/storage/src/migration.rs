// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Schema migration for `state.json`.
//!
//! Migrations transform the raw JSON document from one version to the next
//! before it is deserialized into [`crate::SyncState`]. A missing `version`
//! field means v0 (§3 "Backward compat: accept missing version as v0 and
//! migrate"). Migration only ever reads the source document; the first
//! subsequent `save()` persists the migrated (current) version.

use crate::state::CURRENT_VERSION;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("document version {0} is newer than supported ({1})")]
    TooNew(u32, u32),
    #[error("document is not a JSON object")]
    NotAnObject,
}

/// Migrate a raw `state.json` document up to [`CURRENT_VERSION`].
pub fn migrate_to_current(mut doc: Value) -> Result<Value, MigrationError> {
    let current = doc
        .get("version")
        .and_then(|v| v.as_u64())
        .unwrap_or(0) as u32;

    if current > CURRENT_VERSION {
        return Err(MigrationError::TooNew(current, CURRENT_VERSION));
    }
    if current == CURRENT_VERSION {
        return Ok(doc);
    }

    // v0 -> v1: fill defaults, normalize `byProvider` and `updatedAt` on
    // each mapping.
    migrate_v0_to_v1(&mut doc)?;

    if let Some(obj) = doc.as_object_mut() {
        obj.insert("version".into(), CURRENT_VERSION.into());
    }
    Ok(doc)
}

fn migrate_v0_to_v1(doc: &mut Value) -> Result<(), MigrationError> {
    let obj = doc.as_object_mut().ok_or(MigrationError::NotAnObject)?;

    let Some(mappings) = obj.get_mut("mappings").and_then(|v| v.as_array_mut()) else {
        obj.entry("mappings").or_insert_with(|| Value::Array(Vec::new()));
        obj.entry("tombstones").or_insert_with(|| Value::Array(Vec::new()));
        return Ok(());
    };

    for mapping in mappings.iter_mut() {
        let Some(mapping_obj) = mapping.as_object_mut() else {
            continue;
        };

        // v0 sometimes stored byProvider as a list of [provider, id] pairs
        // instead of an object; normalize to an object either way.
        match mapping_obj.get("byProvider") {
            Some(Value::Array(pairs)) => {
                let mut normalized = serde_json::Map::new();
                for pair in pairs {
                    if let Some([provider, id]) = pair.as_array().map(|v| v.as_slice()) {
                        if let (Some(p), Some(i)) = (provider.as_str(), id.as_str()) {
                            normalized.insert(p.to_string(), Value::String(i.to_string()));
                        }
                    }
                }
                mapping_obj.insert("byProvider".into(), Value::Object(normalized));
            }
            Some(Value::Object(_)) => {}
            _ => {
                mapping_obj.insert("byProvider".into(), Value::Object(Default::default()));
            }
        }

        if !mapping_obj.contains_key("updatedAt") {
            let fallback = mapping_obj
                .get("canonical")
                .and_then(|c| c.get("updatedAt"))
                .cloned()
                .unwrap_or_else(|| Value::String("1970-01-01T00:00:00Z".to_string()));
            mapping_obj.insert("updatedAt".into(), fallback);
        }
    }

    obj.entry("tombstones").or_insert_with(|| Value::Array(Vec::new()));
    Ok(())
}

#[cfg(test)]
#[path = "migration_tests.rs"]
mod tests;
