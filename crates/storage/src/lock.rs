// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Process-level mutual exclusion on the state directory (C2).
//!
//! The lock file holds `{"pid": <int>, "at": "<RFC3339>"}`. Acquisition
//! tries an exclusive create; on conflict it inspects the recorded pid — if
//! that process is no longer alive, or the file can't be parsed, the lock is
//! stolen (stale-lock recovery). Otherwise acquisition fails. A scoped guard
//! releases (best-effort unlink) on every exit path, mirroring the
//! `oj-daemon::lifecycle` pattern of holding a lock handle for the lifetime
//! of a scope and cleaning it up on every return path — adapted here to a
//! pid-introspecting lock instead of an OS advisory `flock`, since stale-lock
//! recovery needs to inspect *which* process holds it, not merely whether
//! the OS still considers it held.

use chrono::{DateTime, Utc};
use nix::sys::signal::kill;
use nix::unistd::Pid;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum LockError {
    #[error("another run is already in progress (pid {0})")]
    HeldByLivePeer(u32),
    #[error("I/O error acquiring lock at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Serialize, Deserialize)]
struct LockContents {
    pid: u32,
    at: DateTime<Utc>,
}

/// RAII guard for a held exclusion lock. Releasing is best-effort: errors
/// are logged and ignored, since a failed unlink must never block shutdown.
#[derive(Debug)]
pub struct LockGuard {
    path: PathBuf,
}

impl Drop for LockGuard {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_file(&self.path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!(error = %e, path = %self.path.display(), "failed to release exclusion lock");
            }
        }
    }
}

/// Try to acquire the exclusion lock at `path`, returning a guard that
/// releases it on drop.
pub fn acquire(path: &Path) -> Result<LockGuard, LockError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| LockError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    match try_create(path, std::process::id()) {
        Ok(()) => return Ok(LockGuard { path: path.to_path_buf() }),
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {}
        Err(source) => return Err(LockError::Io { path: path.to_path_buf(), source }),
    }

    match read_holder(path) {
        Some(holder) if is_alive(holder.pid) => Err(LockError::HeldByLivePeer(holder.pid)),
        _ => {
            info!(path = %path.display(), "stale lock detected, recovering");
            write_contents(path, std::process::id()).map_err(|source| LockError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            Ok(LockGuard { path: path.to_path_buf() })
        }
    }
}

fn try_create(path: &Path, pid: u32) -> std::io::Result<()> {
    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)?;
    write_lock_json(&mut file, pid)
}

fn write_contents(path: &Path, pid: u32) -> std::io::Result<()> {
    let mut file = fs::OpenOptions::new()
        .write(true)
        .truncate(true)
        .create(true)
        .open(path)?;
    write_lock_json(&mut file, pid)
}

fn write_lock_json(file: &mut fs::File, pid: u32) -> std::io::Result<()> {
    let contents = LockContents { pid, at: Utc::now() };
    let json = serde_json::to_string(&contents).unwrap_or_default();
    writeln!(file, "{json}")
}

fn read_holder(path: &Path) -> Option<LockContents> {
    let raw = fs::read_to_string(path).ok()?;
    serde_json::from_str(raw.trim()).ok()
}

fn is_alive(pid: u32) -> bool {
    // Signal 0 performs no action but reports whether the process exists
    // and is signalable by us.
    kill(Pid::from_raw(pid as i32), None).is_ok()
}

#[cfg(test)]
#[path = "lock_tests.rs"]
mod tests;
