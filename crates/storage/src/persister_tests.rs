// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::ConfigDir;
use ga_core::{Recurrence, Settings};
use tempfile::TempDir;

#[tokio::test]
async fn saved_alerts_load_back() {
    let dir = TempDir::new().unwrap();
    let config = ConfigDir::new(dir.path().join("nested"));
    let persister = JsonFilePersister::new(config.alerts_path());
    let alerts = vec![Alert::new("2025-01-01", "09:00:00", "walk")
        .with_recurrence(Recurrence::Interval { interval_minutes: 90 })];

    persister.save_alerts(&alerts).await.unwrap();

    let now = chrono::NaiveDateTime::parse_from_str("2025-01-01 00:00:00", "%Y-%m-%d %H:%M:%S")
        .unwrap();
    assert_eq!(config.load_alerts(&Settings::default(), now).unwrap(), alerts);
}

#[tokio::test]
async fn unwritable_path_reports_io_error() {
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("file");
    std::fs::write(&blocker, "").unwrap();
    let persister = JsonFilePersister::new(blocker.join("alerts.json"));

    let result = persister.save_alerts(&[]).await;

    assert!(matches!(result, Err(PersistError::Io(_))));
}
