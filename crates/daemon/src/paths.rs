// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Well-known locations shared by the daemon and its clients

use std::path::PathBuf;

pub const SOCKET_FILENAME: &str = "ga.sock";
pub const PID_FILENAME: &str = "daemon.pid";
pub const VERSION_FILENAME: &str = "daemon.version";
pub const LOG_FILENAME: &str = "daemon.log";

/// Startup marker prefix written to the log before anything else.
/// Clients use it to find where the current startup attempt begins.
/// Full format: "--- gad: starting (pid: 12345) ---"
pub const STARTUP_MARKER_PREFIX: &str = "--- gad: starting (pid: ";

/// State directory: `$XDG_STATE_HOME/ga`, else `~/.local/state/ga`
pub fn state_dir() -> Option<PathBuf> {
    if let Ok(xdg) = std::env::var("XDG_STATE_HOME") {
        return Some(PathBuf::from(xdg).join("ga"));
    }
    let home = std::env::var("HOME").ok()?;
    Some(PathBuf::from(home).join(".local/state/ga"))
}

/// Socket directory: `GA_SOCKET_DIR`, else `/tmp/ga`.
///
/// Kept short because of the socket path limit (104 bytes on macOS).
pub fn socket_dir() -> PathBuf {
    match std::env::var("GA_SOCKET_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => PathBuf::from("/tmp/ga"),
    }
}

pub fn socket_path() -> PathBuf {
    socket_dir().join(SOCKET_FILENAME)
}

#[cfg(test)]
#[path = "paths_tests.rs"]
mod tests;
