// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! ts-syncd: background process that polls the configured providers and
//! keeps them reconciled.
//!
//! The daemon is a thin shell around `ts-engine`'s `CycleOrchestrator`: it
//! owns process-level concerns (config loading, the exclusion lock,
//! structured logging, signal handling) and leaves every reconciliation
//! decision to the engine.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

use std::sync::Arc;

use tokio::signal::unix::{signal, SignalKind};
use tokio::sync::watch;
use tracing::{error, info, warn};
use ts_core::{IdGen, SystemClock, UuidIdGen};
use ts_daemon::{config::DaemonConfig, logging, providers::build_registry};
use ts_engine::CycleOrchestrator;

fn print_help() {
    println!("ts-syncd {}", env!("CARGO_PKG_VERSION"));
    println!("Background process that keeps configured task providers reconciled.");
    println!();
    println!("USAGE:");
    println!("    ts-syncd");
    println!();
    println!("CONFIGURATION:");
    println!("    TS_STATE_DIR      state directory (default: ~/.local/state/ts-sync)");
    println!("    TS_CONFIG_PATH    config file path (default: <state_dir>/config.json)");
    println!("    RUST_LOG          tracing filter (default: info)");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Print help information");
    println!("    -v, --version    Print version information");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Some(arg) = std::env::args().nth(1) {
        match arg.as_str() {
            "--version" | "-v" => {
                println!("ts-syncd {}", env!("CARGO_PKG_VERSION"));
                return Ok(());
            }
            "--help" | "-h" | "help" => {
                print_help();
                return Ok(());
            }
            other => {
                eprintln!("error: unexpected argument '{other}'");
                eprintln!("Usage: ts-syncd [--help | --version]");
                std::process::exit(1);
            }
        }
    }

    let config = DaemonConfig::load()?;
    logging::rotate_log_if_needed(&config.log_path);
    let _log_guard = logging::setup_logging(&config.log_path)?;

    info!(state_dir = %config.state_dir.display(), "starting ts-syncd");

    let lock_guard = match ts_storage::acquire(&config.lock_path()) {
        Ok(guard) => guard,
        Err(e) => {
            error!(error = %e, "failed to acquire exclusion lock");
            return Err(e.into());
        }
    };

    let engine_config = config.engine_config()?;
    let registry = build_registry(&config.file.providers, config.file.max_retries);
    let orchestrator = CycleOrchestrator::new(
        engine_config,
        registry,
        Arc::new(UuidIdGen) as Arc<dyn IdGen>,
        Arc::new(SystemClock) as Arc<dyn ts_core::Clock>,
    )?;

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;

    tokio::spawn(async move {
        tokio::select! {
            _ = sigterm.recv() => info!("received SIGTERM, shutting down"),
            _ = sigint.recv() => info!("received SIGINT, shutting down"),
        }
        if shutdown_tx.send(true).is_err() {
            warn!("shutdown signal receiver already dropped");
        }
    });

    println!("READY");
    orchestrator.run_polling(shutdown_rx).await;

    info!("ts-syncd stopped");
    drop(lock_guard);
    Ok(())
}
