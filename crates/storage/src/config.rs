// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Config directory holding `alerts.json` and `settings.json`

use crate::validate::{validate_alert, validate_settings};
use crate::StorageError;
use chrono::NaiveDateTime;
use ga_core::{Alert, Settings};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Directory name under the platform config dir
pub const APP_DIR_NAME: &str = "GentleAlertScheduler";

pub const ALERTS_FILENAME: &str = "alerts.json";
pub const SETTINGS_FILENAME: &str = "settings.json";

/// Location of the alert and settings files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigDir {
    root: PathBuf,
}

impl ConfigDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// `GA_CONFIG_DIR`, else `$XDG_CONFIG_HOME/GentleAlertScheduler`,
    /// else `~/.config/GentleAlertScheduler`
    pub fn from_env() -> Result<Self, StorageError> {
        if let Ok(dir) = std::env::var("GA_CONFIG_DIR") {
            return Ok(Self::new(dir));
        }
        let base = dirs::config_dir()
            .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
            .ok_or(StorageError::NoConfigDir)?;
        Ok(Self::new(base.join(APP_DIR_NAME)))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn alerts_path(&self) -> PathBuf {
        self.root.join(ALERTS_FILENAME)
    }

    pub fn settings_path(&self) -> PathBuf {
        self.root.join(SETTINGS_FILENAME)
    }

    /// Create the directory if needed
    pub fn ensure(&self) -> Result<(), StorageError> {
        fs::create_dir_all(&self.root)?;
        Ok(())
    }

    /// Load global settings; a missing file yields the defaults
    pub fn load_settings(&self) -> Result<Settings, StorageError> {
        let Some(value) = read_json(&self.settings_path())? else {
            tracing::info!("no settings file, using defaults");
            return Ok(Settings::default());
        };
        Ok(validate_settings(&value))
    }

    /// Load and validate every stored alert; a missing file yields none
    pub fn load_alerts(
        &self,
        settings: &Settings,
        now: NaiveDateTime,
    ) -> Result<Vec<Alert>, StorageError> {
        let Some(value) = read_json(&self.alerts_path())? else {
            return Ok(Vec::new());
        };
        let Value::Array(records) = value else {
            return Err(StorageError::InvalidFormat(format!(
                "{} must hold a list of alerts",
                ALERTS_FILENAME
            )));
        };
        let alerts: Vec<Alert> = records
            .iter()
            .map(|r| validate_alert(r, settings, now))
            .collect();
        tracing::info!(count = alerts.len(), "alerts loaded");
        Ok(alerts)
    }

    pub fn save_alerts(&self, alerts: &[Alert]) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(alerts)?;
        write_atomic(&self.alerts_path(), &json)
    }
}

fn read_json(path: &Path) -> Result<Option<Value>, StorageError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    Ok(Some(serde_json::from_str(&text)?))
}

/// Write to a sibling temp file, then rename over the target
pub(crate) fn write_atomic(path: &Path, contents: &str) -> Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, contents)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
