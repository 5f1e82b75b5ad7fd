// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared helpers for behavioral specs.
//!
//! Every `Project` gets its own config, state and socket directories, so specs
//! run in parallel against separate daemons. The daemon is stopped on drop.

#![allow(dead_code)]

use std::path::PathBuf;
use std::process::Output;
use std::time::{Duration, Instant};

use tempfile::TempDir;

/// Upper bound for polling waits in specs
pub const SPEC_WAIT_MAX_MS: u64 = 5_000;

const SPEC_POLL_MS: u64 = 20;

/// Poll `check` until it holds or `max_ms` elapses
pub fn wait_for(max_ms: u64, mut check: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + Duration::from_millis(max_ms);
    while Instant::now() < deadline {
        if check() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(SPEC_POLL_MS));
    }
    check()
}

/// Isolated environment for one spec
pub struct Project {
    dir: TempDir,
}

impl Project {
    pub fn empty() -> Self {
        let dir = TempDir::new().unwrap();
        for sub in ["config", "state", "sock"] {
            std::fs::create_dir_all(dir.path().join(sub)).unwrap();
        }
        Self { dir }
    }

    /// Config directory holding alerts.json and settings.json
    pub fn config_path(&self) -> PathBuf {
        self.dir.path().join("config")
    }

    /// Value of XDG_STATE_HOME for the daemon
    pub fn state_path(&self) -> PathBuf {
        self.dir.path().join("state")
    }

    /// Daemon pid, version and log files
    pub fn daemon_dir(&self) -> PathBuf {
        self.state_path().join("ga")
    }

    pub fn socket_path(&self) -> PathBuf {
        self.dir.path().join("sock").join("ga.sock")
    }

    /// Write a file relative to the config directory
    pub fn file(&self, rel: &str, contents: &str) {
        let path = self.config_path().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, contents).unwrap();
    }

    pub fn read(&self, rel: &str) -> Option<String> {
        std::fs::read_to_string(self.config_path().join(rel)).ok()
    }

    /// Saved alert list, parsed
    pub fn saved_alerts(&self) -> Vec<serde_json::Value> {
        self.read("alerts.json")
            .and_then(|s| serde_json::from_str(&s).ok())
            .unwrap_or_default()
    }

    pub fn ga(&self) -> CliBuilder {
        let mut cmd = assert_cmd::Command::cargo_bin("ga").unwrap();
        cmd.env("GA_CONFIG_DIR", self.config_path())
            .env("XDG_STATE_HOME", self.state_path())
            .env("GA_SOCKET_DIR", self.dir.path().join("sock"))
            .env("GA_PRESENTER", "none")
            .env("GA_DAEMON_BINARY", gad_binary())
            .env("GA_TIMEOUT_CONNECT_MS", "10000")
            .env_remove("RUST_LOG");
        CliBuilder { cmd }
    }
}

impl Drop for Project {
    fn drop(&mut self) {
        if self.socket_path().exists() {
            let _ = self.ga().cmd.arg("shutdown").output();
        }
    }
}

fn gad_binary() -> PathBuf {
    assert_cmd::cargo::cargo_bin("gad")
}

pub struct CliBuilder {
    cmd: assert_cmd::Command,
}

impl CliBuilder {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    pub fn env(mut self, key: &str, value: impl AsRef<std::ffi::OsStr>) -> Self {
        self.cmd.env(key, value);
        self
    }

    /// Run and require exit code 0
    pub fn passes(mut self) -> RunAssert {
        let output = self.cmd.output().unwrap();
        let run = RunAssert { output };
        assert!(
            run.output.status.success(),
            "expected success, got {}\nstdout:\n{}\nstderr:\n{}",
            run.output.status,
            run.stdout(),
            run.stderr()
        );
        run
    }

    /// Run and require a non-zero exit code
    pub fn fails(mut self) -> RunAssert {
        let output = self.cmd.output().unwrap();
        let run = RunAssert { output };
        assert!(
            !run.output.status.success(),
            "expected failure\nstdout:\n{}",
            run.stdout()
        );
        run
    }
}

pub struct RunAssert {
    output: Output,
}

impl RunAssert {
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }

    pub fn stdout_has(self, needle: &str) -> Self {
        let out = self.stdout();
        assert!(out.contains(needle), "stdout lacks {:?}:\n{}", needle, out);
        self
    }

    pub fn stdout_lacks(self, needle: &str) -> Self {
        let out = self.stdout();
        assert!(!out.contains(needle), "stdout has {:?}:\n{}", needle, out);
        self
    }

    pub fn stdout_eq(self, expected: &str) -> Self {
        similar_asserts::assert_eq!(self.stdout(), expected);
        self
    }

    pub fn stderr_has(self, needle: &str) -> Self {
        let err = self.stderr();
        assert!(err.contains(needle), "stderr lacks {:?}:\n{}", needle, err);
        self
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.stdout()).unwrap()
    }
}
