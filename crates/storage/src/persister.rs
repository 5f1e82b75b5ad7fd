// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Persister that writes `alerts.json`

use async_trait::async_trait;
use ga_adapters::{PersistError, Persister};
use ga_core::Alert;
use std::path::PathBuf;

/// Saves the alert list as pretty-printed JSON, replacing the file atomically
#[derive(Clone, Debug)]
pub struct JsonFilePersister {
    path: PathBuf,
}

impl JsonFilePersister {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl Persister for JsonFilePersister {
    async fn save_alerts(&self, alerts: &[Alert]) -> Result<(), PersistError> {
        let json =
            serde_json::to_string_pretty(alerts).map_err(|e| PersistError::Encode(e.to_string()))?;
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "persister_tests.rs"]
mod tests;
