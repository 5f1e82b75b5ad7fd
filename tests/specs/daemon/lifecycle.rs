// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon lifecycle specs
//!
//! Verify the daemon starts on demand, reports status, and stops cleanly.

use crate::prelude::*;

#[test]
fn status_when_not_running() {
    let temp = Project::empty();

    temp.ga()
        .args(&["status"])
        .passes()
        .stdout_eq("Daemon not running\n");
}

#[test]
fn status_does_not_start_daemon() {
    let temp = Project::empty();
    temp.ga().args(&["status"]).passes();

    assert!(!temp.socket_path().exists());
}

#[test]
fn first_command_starts_daemon() {
    let temp = Project::empty();
    temp.ga().args(&["list"]).passes().stdout_has("No alerts");

    temp.ga()
        .args(&["status"])
        .passes()
        .stdout_has("Daemon running")
        .stdout_has("Uptime:")
        .stdout_has("Alerts: 0 (0 enabled)");
}

#[test]
fn daemon_writes_version_pid_and_log() {
    let temp = Project::empty();
    temp.ga().args(&["list"]).passes();

    let dir = temp.daemon_dir();
    assert!(dir.join("daemon.version").exists());
    assert!(dir.join("daemon.pid").exists());
    let log = std::fs::read_to_string(dir.join("daemon.log")).unwrap();
    assert!(log.contains("--- gad: starting (pid: "));
}

#[test]
fn silent_client_does_not_stall_other_requests() {
    let temp = Project::empty();
    temp.ga().args(&["list"]).passes();

    // Connected but never sends a request
    let _silent = std::os::unix::net::UnixStream::connect(temp.socket_path()).unwrap();

    temp.ga()
        .env("GA_TIMEOUT_IPC_MS", "1000")
        .args(&["list"])
        .passes()
        .stdout_has("No alerts");
}

#[test]
fn shutdown_stops_daemon_and_removes_files() {
    let temp = Project::empty();
    temp.ga().args(&["list"]).passes();

    temp.ga()
        .args(&["shutdown"])
        .passes()
        .stdout_has("Daemon stopped");

    assert!(wait_for(SPEC_WAIT_MAX_MS, || !temp.socket_path().exists()));
    assert!(!temp.daemon_dir().join("daemon.pid").exists());
    temp.ga()
        .args(&["status"])
        .passes()
        .stdout_has("Daemon not running");
}

#[test]
fn shutdown_when_not_running() {
    let temp = Project::empty();

    temp.ga()
        .args(&["shutdown"])
        .passes()
        .stdout_has("Daemon not running");
}

#[test]
fn status_as_json() {
    let temp = Project::empty();
    temp.ga()
        .args(&["add", "Stretch", "--time", "09:00", "--repeat", "daily"])
        .passes();

    let status = temp.ga().args(&["status", "--output", "json"]).passes().json();

    assert_eq!(status["running"], true);
    assert_eq!(status["alerts"], 1);
    assert_eq!(status["armed"], 1);
    assert!(status["next_alert"].is_string());
}

#[test]
fn malformed_alerts_file_reports_startup_error() {
    let temp = Project::empty();
    temp.file("alerts.json", "{\"not\": \"a list\"}");

    temp.ga()
        .args(&["list"])
        .fails()
        .stderr_has("Failed to start daemon");
    assert!(!temp.socket_path().exists());
}

#[test]
fn daemon_restarts_after_shutdown_with_saved_alerts() {
    let temp = Project::empty();
    temp.ga()
        .args(&["add", "Stretch", "--time", "09:00", "--repeat", "daily"])
        .passes();
    temp.ga().args(&["shutdown"]).passes();
    assert!(wait_for(SPEC_WAIT_MAX_MS, || !temp.socket_path().exists()));

    temp.ga().args(&["list"]).passes().stdout_has("Stretch");
}
