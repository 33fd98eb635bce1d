// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `ts`: a thin one-shot/inspection CLI over the engine and on-disk state.
//!
//! This is deliberately not a full management surface — `sync` runs a
//! single cycle and exits, `status`/`conflicts` only load and print what is
//! already on disk. Starting/stopping the background daemon, editing
//! configuration, or driving OAuth are out of scope.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ts_core::{Clock, IdGen, SystemClock, UuidIdGen};
use ts_daemon::config::DaemonConfig;
use ts_daemon::providers::build_registry;
use ts_engine::CycleOrchestrator;
use ts_storage::{ConflictLogEntry, StateStore};

#[derive(Parser)]
#[command(name = "ts", version, about = "Task-sync reconciliation CLI")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a single reconciliation cycle and print the resulting report as JSON.
    Sync,
    /// Print a summary of the currently stored sync state.
    Status,
    /// Print the most recent entries from the conflict log.
    Conflicts {
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Sync => run_sync().await,
        Command::Status => run_status(),
        Command::Conflicts { limit } => run_conflicts(limit),
    }
}

async fn run_sync() -> Result<()> {
    let config = DaemonConfig::load().context("loading configuration")?;
    let lock = ts_storage::acquire(&config.lock_path()).context("acquiring exclusion lock")?;

    let engine_config = config.engine_config().context("validating configuration")?;
    let registry = build_registry(&config.file.providers, config.file.max_retries);
    let orchestrator = CycleOrchestrator::new(
        engine_config,
        registry,
        Arc::new(UuidIdGen) as Arc<dyn IdGen>,
        Arc::new(SystemClock) as Arc<dyn Clock>,
    )
    .context("constructing orchestrator")?;

    let report = orchestrator.run_once().await.context("running sync cycle")?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    drop(lock);
    Ok(())
}

fn run_status() -> Result<()> {
    let config = DaemonConfig::load().context("loading configuration")?;
    let store = StateStore::new(config.state_dir.join("state.json"));
    let state = store.load().context("loading sync state")?;

    println!("mappings:    {}", state.mappings.len());
    println!("tombstones:  {}", state.tombstones.len());
    match state.last_sync_at {
        Some(at) => println!("last sync:   {at}"),
        None => println!("last sync:   never"),
    }
    Ok(())
}

fn run_conflicts(limit: usize) -> Result<()> {
    let config = DaemonConfig::load().context("loading configuration")?;
    let path = config.state_dir.join("conflicts.log");
    if !path.exists() {
        println!("no conflicts recorded");
        return Ok(());
    }

    let contents = std::fs::read_to_string(&path).context("reading conflict log")?;
    let entries: Vec<ConflictLogEntry> = contents
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| serde_json::from_str(line).context("parsing conflict log entry"))
        .collect::<Result<Vec<_>>>()?;

    for entry in entries.iter().rev().take(limit).rev() {
        println!(
            "{}  {}  field={}  winner={}  overwritten={:?}",
            entry.at,
            entry.canonical_id,
            entry.field,
            entry.winner,
            entry.overwritten,
        );
    }
    Ok(())
}
