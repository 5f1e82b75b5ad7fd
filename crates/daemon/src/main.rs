// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Gentle Alert Daemon (gad)
//!
//! Background process that owns the alert list and every timer, and serves
//! control requests from `ga`.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod lifecycle;
mod server;

use ga_daemon::paths::STARTUP_MARKER_PREFIX;
use std::time::Duration;
use tokio::signal::unix::{signal, SignalKind};
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::{error, info, warn};

use crate::lifecycle::{Config, LifecycleError};
use crate::server::PendingRequest;

/// How long open connections get to write their last responses at shutdown
const SHUTDOWN_DRAIN: Duration = Duration::from_secs(1);

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::load()?;

    // Write startup marker to log (before tracing setup, so CLI can find it)
    write_startup_marker(&config)?;

    // Set up logging
    let log_guard = setup_logging(&config)?;

    info!(
        "Starting gad with config dir {}",
        config.config_dir.root().display()
    );

    // Start daemon
    let mut daemon = match lifecycle::startup(&config).await {
        Ok(d) => d,
        Err(e) => {
            // Write error synchronously (tracing is non-blocking and may not flush in time)
            write_startup_error(&config, &e);
            error!("Failed to start daemon: {}", e);
            drop(log_guard);
            return Err(e.into());
        }
    };

    // Set up signal handlers
    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;

    info!(
        "Daemon ready, listening on {}",
        config.socket_path.display()
    );

    // Signal ready for parent process
    println!("READY");

    // Connections are served on their own tasks; requests come back here
    let (request_tx, mut requests) = mpsc::channel::<PendingRequest>(32);
    let mut connections = JoinSet::new();

    // Main event loop
    loop {
        let idle = daemon.until_next_deadline();

        tokio::select! {
            // Accept client connections
            result = daemon.listener.accept() => {
                match result {
                    Ok((stream, _)) => {
                        connections.spawn(server::serve_connection(stream, request_tx.clone()));
                    }
                    Err(e) => {
                        error!("Error accepting connection: {}", e);
                    }
                }
            }

            // Parsed requests from connection tasks
            Some(pending) = requests.recv() => {
                server::handle_pending(&mut daemon, pending).await;
            }

            // Reap finished connections
            Some(result) = connections.join_next() => {
                match result {
                    Ok(Err(e)) => error!("Error handling connection: {}", e),
                    Err(e) => error!("Connection task failed: {}", e),
                    Ok(Ok(())) => {}
                }
            }

            // Next deadline (or the idle bound) reached
            _ = tokio::time::sleep(idle) => {
                daemon.fire_due().await;
            }

            // Graceful shutdown on SIGTERM
            _ = sigterm.recv() => {
                info!("Received SIGTERM, shutting down...");
                daemon.shutdown().await?;
                break;
            }

            // Graceful shutdown on SIGINT
            _ = sigint.recv() => {
                info!("Received SIGINT, shutting down...");
                daemon.shutdown().await?;
                break;
            }
        }

        // Check if shutdown was requested via IPC
        if daemon.shutdown_requested {
            info!("Shutdown requested via IPC, shutting down...");
            drain(&mut connections).await;
            daemon.shutdown().await?;
            break;
        }
    }

    info!("Daemon stopped");
    Ok(())
}

/// Let open connections deliver their responses, then abort the rest
async fn drain(connections: &mut JoinSet<Result<(), server::ServerError>>) {
    let finished = tokio::time::timeout(SHUTDOWN_DRAIN, async {
        while connections.join_next().await.is_some() {}
    })
    .await;
    if finished.is_err() {
        warn!(open = connections.len(), "aborting connections still open at shutdown");
        connections.abort_all();
    }
}

/// Write startup marker to log file (appends to existing log)
fn write_startup_marker(config: &Config) -> Result<(), LifecycleError> {
    use std::io::Write;

    // Create log directory if needed
    if let Some(parent) = config.log_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    // Append marker to log file with PID
    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_path)?;
    writeln!(file, "{}{}) ---", STARTUP_MARKER_PREFIX, std::process::id())?;

    Ok(())
}

/// Write startup error synchronously to log file.
/// This ensures the error is visible to the CLI even if the process exits quickly.
fn write_startup_error(config: &Config, error: &LifecycleError) {
    use std::io::Write;

    let Ok(mut file) = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_path)
    else {
        return;
    };
    let _ = writeln!(file, "ERROR Failed to start daemon: {}", error);
}

fn setup_logging(
    config: &Config,
) -> Result<tracing_appender::non_blocking::WorkerGuard, LifecycleError> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    // Create log directory if needed
    if let Some(parent) = config.log_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    // Set up file appender
    let file_appender = tracing_appender::rolling::never(
        config.log_path.parent().ok_or(LifecycleError::NoStateDir)?,
        config
            .log_path
            .file_name()
            .ok_or(LifecycleError::NoStateDir)?,
    );
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // Set up subscriber with env filter
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_ansi(false).with_writer(non_blocking))
        .init();

    Ok(guard)
}
