// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon client for CLI commands

use std::path::PathBuf;
use std::process::Command;
use std::time::{Duration, Instant};

use ga_core::Alert;
use ga_daemon::paths;
use ga_daemon::protocol::{self, ProtocolError};
use ga_daemon::{AlertSummary, Request, Response};
use thiserror::Error;
use tokio::net::UnixStream;
use tracing::{debug, warn};

// Timeout configuration (env vars in milliseconds)
fn parse_duration_ms(var: &str) -> Option<Duration> {
    std::env::var(var)
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_millis)
}

/// Timeout for IPC requests
pub fn timeout_ipc() -> Duration {
    parse_duration_ms("GA_TIMEOUT_IPC_MS").unwrap_or(Duration::from_secs(5))
}

/// Timeout for waiting for daemon to start
pub fn timeout_connect() -> Duration {
    parse_duration_ms("GA_TIMEOUT_CONNECT_MS").unwrap_or(Duration::from_secs(5))
}

/// Timeout for waiting for process to exit
pub fn timeout_exit() -> Duration {
    parse_duration_ms("GA_TIMEOUT_EXIT_MS").unwrap_or(Duration::from_secs(2))
}

/// Polling interval for retries
pub fn poll_interval() -> Duration {
    parse_duration_ms("GA_POLL_INTERVAL_MS").unwrap_or(Duration::from_millis(50))
}

/// Client errors
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Daemon not running")]
    DaemonNotRunning,

    #[error("Failed to start daemon: {0}")]
    DaemonStartFailed(String),

    #[error("Connection timeout waiting for daemon to start")]
    DaemonStartTimeout,

    #[error("Protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    #[error("{0}")]
    Rejected(String),

    #[error("Unexpected response from daemon")]
    UnexpectedResponse,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Could not determine state directory")]
    NoStateDir,
}

/// Daemon status as reported by `Status`
#[derive(Debug, Clone, PartialEq)]
pub struct DaemonStatus {
    pub uptime_secs: u64,
    pub alerts: usize,
    pub enabled: usize,
    pub armed: usize,
    pub delayed: usize,
    pub next_alert: Option<chrono::NaiveDateTime>,
}

/// Daemon client
pub struct DaemonClient {
    socket_path: PathBuf,
}

impl DaemonClient {
    /// Connect to daemon, auto-starting if not running
    pub async fn connect_or_start() -> Result<Self, ClientError> {
        // Restart a daemon left over from another version
        if let Ok(daemon_dir) = daemon_dir() {
            let version_path = daemon_dir.join(paths::VERSION_FILENAME);
            if let Ok(daemon_version) = std::fs::read_to_string(&version_path) {
                if daemon_version.trim() != env!("CARGO_PKG_VERSION") {
                    warn!(
                        daemon = daemon_version.trim(),
                        cli = env!("CARGO_PKG_VERSION"),
                        "restarting daemon from another version"
                    );
                    let _ = daemon_stop().await;
                }
            }
        }

        match Self::connect() {
            Ok(client) => match client.ping().await {
                Ok(()) => Ok(client),
                // Nobody listening: socket left behind by a daemon that died
                Err(ClientError::Io(e)) => {
                    debug!(error = %e, "removing stale socket");
                    let _ = std::fs::remove_file(&client.socket_path);
                    let child = start_daemon_background()?;
                    Self::connect_with_retry(timeout_connect(), child).await
                }
                Err(e) => Err(e),
            },
            Err(ClientError::DaemonNotRunning) => {
                // Start daemon in background
                let child = start_daemon_background()?;
                // Wait for socket with retry, watching for early exit
                Self::connect_with_retry(timeout_connect(), child).await
            }
            Err(e) => Err(wrap_with_startup_error(e)),
        }
    }

    /// Connect to existing daemon (no auto-start)
    pub fn connect() -> Result<Self, ClientError> {
        let socket_path = paths::socket_path();

        if !socket_path.exists() {
            return Err(ClientError::DaemonNotRunning);
        }

        Ok(Self { socket_path })
    }

    async fn connect_with_retry(
        timeout: Duration,
        mut child: std::process::Child,
    ) -> Result<Self, ClientError> {
        let start = Instant::now();
        while start.elapsed() < timeout {
            // Check if daemon process exited early (startup failure)
            if let Ok(Some(status)) = child.try_wait() {
                // Poll for startup error in log (filesystem may need to sync)
                let poll_start = Instant::now();
                while poll_start.elapsed() < timeout_exit() {
                    if let Some(err) = read_startup_error() {
                        return Err(ClientError::DaemonStartFailed(err));
                    }
                    tokio::time::sleep(poll_interval()).await;
                }
                return Err(ClientError::DaemonStartFailed(format!(
                    "exited with {}",
                    status
                )));
            }

            // A stale socket file may still exist; only a ping proves the daemon is up
            if let Ok(client) = Self::connect() {
                if client.ping().await.is_ok() {
                    return Ok(client);
                }
            }
            tokio::time::sleep(poll_interval()).await;
        }

        // Timeout - check log for startup errors
        Err(wrap_with_startup_error(ClientError::DaemonStartTimeout))
    }

    /// Send a request and receive a response with specific timeouts
    async fn send_with_timeout(
        &self,
        request: Request,
        read_timeout: Duration,
        write_timeout: Duration,
    ) -> Result<Response, ClientError> {
        let stream = UnixStream::connect(&self.socket_path).await?;
        let (mut reader, mut writer) = stream.into_split();

        // Encode and send request with write timeout
        let data = protocol::encode(&request)?;
        tokio::time::timeout(write_timeout, protocol::write_message(&mut writer, &data))
            .await
            .map_err(|_| ProtocolError::Timeout)??;

        // Read response with read timeout
        let response_bytes =
            tokio::time::timeout(read_timeout, protocol::read_message(&mut reader))
                .await
                .map_err(|_| ProtocolError::Timeout)??;

        let response: Response = protocol::decode(&response_bytes)?;
        Ok(response)
    }

    /// Send a request and receive a response
    pub async fn send(&self, request: Request) -> Result<Response, ClientError> {
        self.send_with_timeout(request, timeout_ipc(), timeout_ipc())
            .await
    }

    /// Send a request whose only success reply is `Ok`
    async fn send_ok(&self, request: Request) -> Result<(), ClientError> {
        match self.send(request).await? {
            Response::Ok => Ok(()),
            other => Err(unexpected(other)),
        }
    }

    pub async fn ping(&self) -> Result<(), ClientError> {
        match self.send(Request::Ping).await? {
            Response::Pong => Ok(()),
            other => Err(unexpected(other)),
        }
    }

    pub async fn status(&self) -> Result<DaemonStatus, ClientError> {
        match self.send(Request::Status).await? {
            Response::Status {
                uptime_secs,
                alerts,
                enabled,
                armed,
                delayed,
                next_alert,
            } => Ok(DaemonStatus {
                uptime_secs,
                alerts,
                enabled,
                armed,
                delayed,
                next_alert,
            }),
            other => Err(unexpected(other)),
        }
    }

    pub async fn list_alerts(&self) -> Result<Vec<AlertSummary>, ClientError> {
        match self.send(Request::ListAlerts).await? {
            Response::Alerts { alerts } => Ok(alerts),
            other => Err(unexpected(other)),
        }
    }

    /// Fetch one alert by index
    pub async fn get_alert(&self, index: usize) -> Result<Alert, ClientError> {
        let alerts = self.list_alerts().await?;
        let len = alerts.len();
        alerts
            .into_iter()
            .find(|s| s.index == index)
            .map(|s| s.alert)
            .ok_or_else(|| {
                ClientError::Rejected(format!("alert index {} out of range (have {})", index, len))
            })
    }

    /// Add an alert, returning its index
    pub async fn add_alert(&self, alert: Alert) -> Result<usize, ClientError> {
        match self.send(Request::AddAlert { alert }).await? {
            Response::Added { index } => Ok(index),
            other => Err(unexpected(other)),
        }
    }

    pub async fn edit_alert(&self, index: usize, alert: Alert) -> Result<(), ClientError> {
        self.send_ok(Request::EditAlert { index, alert }).await
    }

    pub async fn toggle_alert(&self, index: usize, enabled: bool) -> Result<(), ClientError> {
        self.send_ok(Request::ToggleAlert { index, enabled }).await
    }

    /// Remove an alert, returning what was removed
    pub async fn remove_alert(&self, index: usize) -> Result<Alert, ClientError> {
        match self.send(Request::RemoveAlert { index }).await? {
            Response::Removed { alert } => Ok(alert),
            other => Err(unexpected(other)),
        }
    }

    /// Snooze everything on screen, returning how many alerts were delayed
    pub async fn delay_active(&self, minutes: i64) -> Result<usize, ClientError> {
        match self.send(Request::DelayActive { minutes }).await? {
            Response::Delayed { count } => Ok(count),
            other => Err(unexpected(other)),
        }
    }

    pub async fn test_alert(&self, index: usize) -> Result<(), ClientError> {
        self.send_ok(Request::TestAlert { index }).await
    }

    pub async fn test_defaults(&self) -> Result<(), ClientError> {
        self.send_ok(Request::TestDefaults).await
    }

    pub async fn stop_alerts(&self) -> Result<(), ClientError> {
        self.send_ok(Request::StopAlerts).await
    }

    /// Request daemon shutdown
    pub async fn shutdown(&self) -> Result<(), ClientError> {
        match self.send(Request::Shutdown).await? {
            Response::Ok | Response::ShuttingDown => Ok(()),
            other => Err(unexpected(other)),
        }
    }
}

fn unexpected(response: Response) -> ClientError {
    match response {
        Response::Error { message } => ClientError::Rejected(message),
        _ => ClientError::UnexpectedResponse,
    }
}

/// Start the daemon in the background, returning the child process handle
fn start_daemon_background() -> Result<std::process::Child, ClientError> {
    let gad_path = find_gad_binary();
    debug!(path = %gad_path.display(), "starting daemon");

    Command::new(&gad_path)
        .stdin(std::process::Stdio::null())
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .spawn()
        .map_err(|e| ClientError::DaemonStartFailed(e.to_string()))
}

/// Stop the daemon (graceful first, then forceful)
/// Returns true if daemon was stopped, false if it wasn't running
pub async fn daemon_stop() -> Result<bool, ClientError> {
    let client = match DaemonClient::connect() {
        Ok(c) => c,
        Err(ClientError::DaemonNotRunning) => {
            // Clean up any stale files
            if let Ok(daemon_dir) = daemon_dir() {
                cleanup_stale_pid(&daemon_dir);
            }
            return Ok(false);
        }
        Err(e) => return Err(e),
    };

    // Try graceful shutdown (timeout handled by send())
    let shutdown_result = client.shutdown().await;

    if let Some(pid) = read_daemon_pid()? {
        if shutdown_result.is_ok() {
            // Graceful shutdown succeeded, wait for process to exit
            wait_for_exit(pid, timeout_exit()).await;
        }

        // Force kill if still running
        if process_exists(pid) {
            force_kill_daemon(pid);
            wait_for_exit(pid, timeout_exit()).await;
        }
    }

    // A killed daemon leaves its socket behind
    let socket_path = paths::socket_path();
    if socket_path.exists() && shutdown_result.is_err() {
        let _ = std::fs::remove_file(&socket_path);
    }

    cleanup_stale_pid(&daemon_dir()?);

    Ok(true)
}

/// Wait for a process to exit
async fn wait_for_exit(pid: u32, timeout: Duration) -> bool {
    let start = Instant::now();
    while start.elapsed() < timeout {
        if !process_exists(pid) {
            return true;
        }
        tokio::time::sleep(poll_interval()).await;
    }
    false
}

/// Find the gad binary
fn find_gad_binary() -> PathBuf {
    // Explicit override (used by tests to ensure correct binary)
    if let Ok(path) = std::env::var("GA_DAEMON_BINARY") {
        return PathBuf::from(path);
    }

    // Installed side by side with ga
    if let Ok(exe) = std::env::current_exe() {
        if let Some(dir) = exe.parent() {
            let sibling = dir.join("gad");
            if sibling.exists() {
                return sibling;
            }
        }
    }

    // Fall back to PATH lookup
    PathBuf::from("gad")
}

/// Clean up orphaned PID file during shutdown.
fn cleanup_stale_pid(daemon_dir: &std::path::Path) {
    let pid_path = daemon_dir.join(paths::PID_FILENAME);
    if pid_path.exists() {
        let _ = std::fs::remove_file(&pid_path);
    }
}

/// Get the PID from the daemon PID file, if it exists
pub fn read_daemon_pid() -> Result<Option<u32>, ClientError> {
    let pid_path = daemon_dir()?.join(paths::PID_FILENAME);

    match std::fs::read_to_string(&pid_path) {
        Ok(content) => Ok(content.trim().parse::<u32>().ok()),
        Err(_) => Ok(None),
    }
}

/// Check if a process with the given PID exists
pub fn process_exists(pid: u32) -> bool {
    // Use kill -0 to check if process exists without sending a signal
    Command::new("kill")
        .args(["-0", &pid.to_string()])
        .stdin(std::process::Stdio::null())
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Force kill a daemon process
pub fn force_kill_daemon(pid: u32) -> bool {
    Command::new("kill")
        .args(["-9", &pid.to_string()])
        .stdin(std::process::Stdio::null())
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Where the daemon keeps its log, pid and version files
pub fn daemon_dir() -> Result<PathBuf, ClientError> {
    paths::state_dir().ok_or(ClientError::NoStateDir)
}

/// Read daemon log from the last startup marker, looking for errors.
/// Returns the error message if found, None otherwise.
pub fn read_startup_error() -> Option<String> {
    let log_path = daemon_dir().ok()?.join(paths::LOG_FILENAME);
    let content = std::fs::read_to_string(&log_path).ok()?;
    startup_error_in(&content)
}

fn startup_error_in(log: &str) -> Option<String> {
    // Find the last startup marker
    let start_pos = log.rfind(paths::STARTUP_MARKER_PREFIX)?;
    let startup_log = &log[start_pos..];

    // Look for ERROR lines
    let errors: Vec<&str> = startup_log
        .lines()
        .filter(|line| line.contains(" ERROR ") || line.contains("Failed to start"))
        .collect();

    if errors.is_empty() {
        return None;
    }

    // Strip the timestamp/level prefix: "timestamp LEVEL target: message"
    let messages: Vec<String> = errors
        .iter()
        .filter_map(|line| line.split_once(": ").map(|(_, msg)| msg.to_string()))
        .collect();

    if messages.is_empty() {
        Some(errors.join("\n"))
    } else {
        Some(messages.join("\n"))
    }
}

/// Wrap an error with startup log info if available.
fn wrap_with_startup_error(err: ClientError) -> ClientError {
    // Don't double-wrap
    if matches!(err, ClientError::DaemonStartFailed(_)) {
        return err;
    }

    match read_startup_error() {
        Some(startup_error) => ClientError::DaemonStartFailed(startup_error),
        None => err,
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
