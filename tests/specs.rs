// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Black-box specs driving the `ts` CLI binary end-to-end against a pair of
//! `local_json` providers, the way a real `google`/`microsoft` pairing would
//! run against a state directory in production.

use std::path::Path;

use assert_cmd::Command;
use serde_json::Value;

fn write_config(state_dir: &Path, provider_a: &Path, provider_b: &Path) {
    let config = serde_json::json!({
        "providers": [
            {"kind": "local_json", "tag": "a", "path": provider_a},
            {"kind": "local_json", "tag": "b", "path": provider_b},
        ],
    });
    std::fs::write(state_dir.join("config.json"), serde_json::to_string_pretty(&config).unwrap()).unwrap();
}

fn seed_task(path: &Path, id: &str, title: &str) {
    let doc = serde_json::json!({
        "next_id": 1,
        "tasks": {
            id: {
                "title": title,
                "status": "active",
                "updatedAt": "2026-01-01T00:00:00Z",
            }
        }
    });
    std::fs::write(path, serde_json::to_string_pretty(&doc).unwrap()).unwrap();
}

fn ts(state_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("ts").unwrap();
    cmd.env("TS_STATE_DIR", state_dir);
    cmd.env_remove("TS_CONFIG_PATH");
    cmd
}

#[test]
fn sync_creates_the_missing_side_then_converges() {
    let dir = tempfile::tempdir().unwrap();
    let provider_a = dir.path().join("a.json");
    let provider_b = dir.path().join("b.json");
    write_config(dir.path(), &provider_a, &provider_b);
    seed_task(&provider_a, "a-1", "Buy milk");

    let first = ts(dir.path()).arg("sync").assert().success();
    let report: Value = serde_json::from_slice(&first.get_output().stdout).unwrap();
    assert_eq!(report["actionCounts"]["created"], 1);

    let status = ts(dir.path()).arg("status").assert().success();
    let stdout = String::from_utf8(status.get_output().stdout.clone()).unwrap();
    assert!(stdout.contains("mappings:    1"));

    let second = ts(dir.path()).arg("sync").assert().success();
    let report: Value = serde_json::from_slice(&second.get_output().stdout).unwrap();
    assert_eq!(report["actionCounts"]["created"], 0);
    assert_eq!(report["actionCounts"]["updated"], 0);
    assert_eq!(report["actionCounts"]["deleted"], 0);
}

#[test]
fn conflicts_with_no_log_prints_a_friendly_message() {
    let dir = tempfile::tempdir().unwrap();
    let provider_a = dir.path().join("a.json");
    let provider_b = dir.path().join("b.json");
    write_config(dir.path(), &provider_a, &provider_b);

    let output = ts(dir.path()).arg("conflicts").assert().success();
    let stdout = String::from_utf8(output.get_output().stdout.clone()).unwrap();
    assert!(stdout.contains("no conflicts recorded"));
}

#[test]
fn status_on_a_fresh_state_dir_reports_zero_mappings() {
    let dir = tempfile::tempdir().unwrap();
    let provider_a = dir.path().join("a.json");
    let provider_b = dir.path().join("b.json");
    write_config(dir.path(), &provider_a, &provider_b);

    let output = ts(dir.path()).arg("status").assert().success();
    let stdout = String::from_utf8(output.get_output().stdout.clone()).unwrap();
    assert!(stdout.contains("mappings:    0"));
    assert!(stdout.contains("last sync:   never"));
}

#[test]
fn missing_config_file_is_a_clear_error() {
    let dir = tempfile::tempdir().unwrap();
    ts(dir.path()).arg("status").assert().failure();
}
