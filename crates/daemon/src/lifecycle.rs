// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon lifecycle management: startup, timer loop, shutdown.

use std::fs::File;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use fs2::FileExt;
use ga_adapters::{
    DesktopPresenter, NoOpPresenter, PresentError, Presenter, TracedPersister, TracedPresenter,
};
use ga_core::{Alert, Clock, Effect, Settings, SystemClock};
use ga_daemon::paths;
use ga_engine::{Executor, SchedulingEngine};
use ga_storage::{ConfigDir, JsonFilePersister, StorageError};
use thiserror::Error;
use tokio::net::UnixListener;
use tracing::{info, warn};

/// Longest the loop sleeps without re-reading the clock.
///
/// Wall-clock jumps (suspend, manual changes) are noticed within this bound.
pub const MAX_IDLE: Duration = Duration::from_secs(60);

/// Engine with the concrete clock
pub type DaemonEngine = SchedulingEngine<SystemClock>;

/// Executor with concrete adapter types (wrapped with tracing)
pub type DaemonExecutor = Executor<TracedPresenter<DaemonPresenter>, TracedPersister<JsonFilePersister>>;

/// Daemon configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Where `alerts.json` and `settings.json` live
    pub config_dir: ConfigDir,
    /// Path to Unix socket
    pub socket_path: PathBuf,
    /// Path to lock/PID file
    pub lock_path: PathBuf,
    /// Path to version file
    pub version_path: PathBuf,
    /// Path to daemon log file
    pub log_path: PathBuf,
}

impl Config {
    /// Resolve every path from the environment
    pub fn load() -> Result<Self, LifecycleError> {
        let state_dir = paths::state_dir().ok_or(LifecycleError::NoStateDir)?;
        Ok(Self {
            config_dir: ConfigDir::from_env()?,
            socket_path: paths::socket_path(),
            lock_path: state_dir.join(paths::PID_FILENAME),
            version_path: state_dir.join(paths::VERSION_FILENAME),
            log_path: state_dir.join(paths::LOG_FILENAME),
        })
    }
}

/// Presenter selected by `GA_PRESENTER` (`desktop`, the default, or `none`)
#[derive(Clone)]
pub enum DaemonPresenter {
    Desktop(DesktopPresenter),
    Headless(NoOpPresenter),
}

impl DaemonPresenter {
    pub fn from_env(settings: &Settings) -> Self {
        match std::env::var("GA_PRESENTER").as_deref() {
            Ok("none") => Self::Headless(NoOpPresenter::new()),
            Ok("desktop") | Err(_) => Self::Desktop(DesktopPresenter::new(settings.clone())),
            Ok(other) => {
                warn!(presenter = other, "unknown presenter, using desktop");
                Self::Desktop(DesktopPresenter::new(settings.clone()))
            }
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Desktop(_) => "desktop",
            Self::Headless(_) => "none",
        }
    }
}

#[async_trait]
impl Presenter for DaemonPresenter {
    async fn present(&self, alert: &Alert) -> Result<usize, PresentError> {
        match self {
            Self::Desktop(p) => p.present(alert).await,
            Self::Headless(p) => p.present(alert).await,
        }
    }

    async fn dismiss_all(&self) -> Result<usize, PresentError> {
        match self {
            Self::Desktop(p) => p.dismiss_all().await,
            Self::Headless(p) => p.dismiss_all().await,
        }
    }

    async fn showing(&self) -> Vec<Alert> {
        match self {
            Self::Desktop(p) => p.showing().await,
            Self::Headless(p) => p.showing().await,
        }
    }
}

/// Daemon state during operation
pub struct DaemonState {
    /// Configuration
    pub config: Config,
    // NOTE(lifetime): Held to maintain exclusive file lock; released on drop
    #[allow(dead_code)]
    lock_file: File,
    /// Unix socket listener
    pub listener: UnixListener,
    /// Owns the alert list and every timer
    pub engine: DaemonEngine,
    /// Runs the effects the engine hands back
    pub executor: DaemonExecutor,
    /// Global defaults loaded at startup
    pub settings: Settings,
    /// When daemon started
    pub start_time: Instant,
    /// Shutdown requested flag
    pub shutdown_requested: bool,
}

impl DaemonState {
    /// Run effects after a committed transition. Failures are logged only.
    pub async fn apply(&self, effects: Vec<Effect>) {
        if effects.is_empty() {
            return;
        }
        let failed = self.executor.execute_all(effects).await;
        if failed > 0 {
            warn!(failed, "some effects failed");
        }
    }

    /// Fire every timer that is due
    pub async fn fire_due(&mut self) {
        let now = self.engine.now();
        let effects = self.engine.poll(now);
        self.apply(effects).await;
    }

    /// How long the loop may sleep before the next deadline
    pub fn until_next_deadline(&self) -> Duration {
        let Some(deadline) = self.engine.next_deadline() else {
            return MAX_IDLE;
        };
        (deadline - self.engine.now())
            .to_std()
            .unwrap_or(Duration::ZERO)
            .min(MAX_IDLE)
    }

    /// Shutdown the daemon gracefully
    pub async fn shutdown(&mut self) -> Result<(), LifecycleError> {
        info!("Shutting down daemon...");

        // 1. Cancel every timer and close anything on screen
        self.engine.shutdown();
        self.apply(vec![Effect::DismissPresentations]).await;

        // 2. Remove socket file
        if self.config.socket_path.exists() {
            if let Err(e) = std::fs::remove_file(&self.config.socket_path) {
                warn!("Failed to remove socket file: {}", e);
            }
        }

        // 3. Remove PID file
        if self.config.lock_path.exists() {
            if let Err(e) = std::fs::remove_file(&self.config.lock_path) {
                warn!("Failed to remove PID file: {}", e);
            }
        }

        // 4. Remove version file
        if self.config.version_path.exists() {
            if let Err(e) = std::fs::remove_file(&self.config.version_path) {
                warn!("Failed to remove version file: {}", e);
            }
        }

        // 5. Lock file is released automatically when self.lock_file is dropped

        info!("Daemon shutdown complete");
        Ok(())
    }
}

/// Lifecycle errors
#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("Could not determine state directory")]
    NoStateDir,

    #[error("Failed to acquire lock: daemon already running?")]
    LockFailed(#[source] std::io::Error),

    #[error("Failed to bind socket at {0}: {1}")]
    BindFailed(PathBuf, std::io::Error),

    #[error("Config error: {0}")]
    Storage(#[from] StorageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Start the daemon
pub async fn startup(config: &Config) -> Result<DaemonState, LifecycleError> {
    match startup_inner(config).await {
        Ok(state) => Ok(state),
        // Another daemon owns these files
        Err(e @ LifecycleError::LockFailed(_)) => Err(e),
        Err(e) => {
            // Clean up any resources created before failure
            cleanup_on_failure(config);
            Err(e)
        }
    }
}

/// Inner startup logic - cleanup_on_failure called if this fails
async fn startup_inner(config: &Config) -> Result<DaemonState, LifecycleError> {
    // 1. Create state directory
    if let Some(parent) = config.lock_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    // 2. Acquire lock file FIRST - prevents races
    // Not truncated until locked: a running daemon's PID must survive
    let mut lock_file = std::fs::OpenOptions::new()
        .create(true)
        .truncate(false)
        .write(true)
        .open(&config.lock_path)?;
    lock_file
        .try_lock_exclusive()
        .map_err(LifecycleError::LockFailed)?;

    // Write PID to lock file
    use std::io::Write;
    lock_file.set_len(0)?;
    writeln!(lock_file, "{}", std::process::id())?;
    let lock_file = lock_file;

    // 3. Create directories
    if let Some(parent) = config.socket_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    config.config_dir.ensure()?;

    // Write version file
    std::fs::write(&config.version_path, env!("CARGO_PKG_VERSION"))?;

    // 4. Load settings and alerts BEFORE binding socket (fail fast on a malformed file)
    let settings = config.config_dir.load_settings()?;
    let clock = SystemClock;
    let alerts = config.config_dir.load_alerts(&settings, clock.now())?;

    info!(
        "Loaded {} alerts from {}",
        alerts.len(),
        config.config_dir.root().display()
    );

    // 5. Set up adapters (wrapped with tracing for observability)
    let presenter = DaemonPresenter::from_env(&settings);
    info!(presenter = presenter.name(), "presenter selected");
    let executor = Executor::new(
        TracedPresenter::new(presenter),
        TracedPersister::new(JsonFilePersister::new(config.config_dir.alerts_path())),
    );

    // 6. Arm every enabled alert
    let mut engine = SchedulingEngine::new(alerts, clock);
    let effects = engine.initialize();

    // 7. Remove stale socket and bind (LAST - only after all validation passes)
    if config.socket_path.exists() {
        std::fs::remove_file(&config.socket_path)?;
    }
    let listener = UnixListener::bind(&config.socket_path)
        .map_err(|e| LifecycleError::BindFailed(config.socket_path.clone(), e))?;

    let state = DaemonState {
        config: config.clone(),
        lock_file,
        listener,
        engine,
        executor,
        settings,
        start_time: Instant::now(),
        shutdown_requested: false,
    };

    // Alerts disabled while arming are saved now
    state.apply(effects).await;

    info!("Daemon started");
    Ok(state)
}

/// Clean up resources on startup failure
fn cleanup_on_failure(config: &Config) {
    // Remove socket if we created it
    if config.socket_path.exists() {
        let _ = std::fs::remove_file(&config.socket_path);
    }

    // Remove version file
    if config.version_path.exists() {
        let _ = std::fs::remove_file(&config.version_path);
    }

    // Remove PID/lock file
    if config.lock_path.exists() {
        let _ = std::fs::remove_file(&config.lock_path);
    }
}

#[cfg(test)]
#[path = "lifecycle_tests.rs"]
mod tests;
