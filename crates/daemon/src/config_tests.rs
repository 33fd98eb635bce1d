// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn missing_config_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = DaemonConfig::load_from(dir.path().to_path_buf(), dir.path().join("config.json")).unwrap_err();
    assert!(matches!(err, ConfigError::Missing(_)));
}

#[test]
fn minimal_config_fills_in_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("config.json");
    std::fs::write(
        &config_path,
        r#"{"providers": [{"kind": "google", "tag": "google"}, {"kind": "microsoft", "tag": "microsoft"}]}"#,
    )
    .unwrap();

    let config = DaemonConfig::load_from(dir.path().to_path_buf(), config_path).unwrap();
    assert_eq!(config.file.mode, SyncMode::Bidirectional);
    assert_eq!(config.file.tombstone_ttl_days, 30);
    assert_eq!(config.file.poll_interval_minutes, 15);
    assert!(!config.file.dry_run);

    let engine_config = config.engine_config().unwrap();
    assert_eq!(engine_config.providers.len(), 2);
}

#[test]
fn local_json_provider_carries_its_path() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("config.json");
    std::fs::write(
        &config_path,
        r#"{"providers": [
            {"kind": "local_json", "tag": "a", "path": "/tmp/a.json"},
            {"kind": "local_json", "tag": "b", "path": "/tmp/b.json"}
        ]}"#,
    )
    .unwrap();

    let config = DaemonConfig::load_from(dir.path().to_path_buf(), config_path).unwrap();
    match &config.file.providers[0] {
        ProviderSpec::LocalJson { tag, path } => {
            assert_eq!(tag, "a");
            assert_eq!(path, std::path::Path::new("/tmp/a.json"));
        }
        other => panic!("unexpected provider spec: {other:?}"),
    }
}

#[test]
fn a_single_provider_fails_engine_validation() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("config.json");
    std::fs::write(&config_path, r#"{"providers": [{"kind": "google", "tag": "google"}]}"#).unwrap();

    let config = DaemonConfig::load_from(dir.path().to_path_buf(), config_path).unwrap();
    let err = config.engine_config().unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEngineConfig(_)));
}
