// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use ga_core::{Display, Recurrence, Rgb};
use tempfile::TempDir;

fn now() -> NaiveDateTime {
    NaiveDateTime::parse_from_str("2025-04-02 13:14:15", "%Y-%m-%d %H:%M:%S").unwrap()
}

#[test]
fn missing_files_yield_defaults() {
    let dir = TempDir::new().unwrap();
    let config = ConfigDir::new(dir.path().join("absent"));

    assert_eq!(config.load_settings().unwrap(), Settings::default());
    assert!(config.load_alerts(&Settings::default(), now()).unwrap().is_empty());
}

#[test]
fn alerts_survive_save_and_load() {
    let dir = TempDir::new().unwrap();
    let config = ConfigDir::new(dir.path());
    let alerts = vec![
        Alert::new("2025-01-01", "09:00:00", "stretch").with_recurrence(Recurrence::Daily),
        Alert::new("2025-01-31", "08:00:00", "rent")
            .with_recurrence(Recurrence::Monthly { day_of_month: 31 })
            .disabled(),
    ];

    config.save_alerts(&alerts).unwrap();
    let loaded = config.load_alerts(&Settings::default(), now()).unwrap();

    assert_eq!(loaded, alerts);
    assert!(!dir.path().join("alerts.json.tmp").exists());
}

#[test]
fn stored_settings_are_loaded() {
    let dir = TempDir::new().unwrap();
    let config = ConfigDir::new(dir.path());
    let settings = Settings {
        default_display: Display::All,
        default_text_color: Rgb(9, 9, 9),
        ..Settings::default()
    };
    std::fs::write(
        config.settings_path(),
        serde_json::to_string_pretty(&settings).unwrap(),
    )
    .unwrap();

    assert_eq!(config.load_settings().unwrap(), settings);
}

#[test]
fn hand_edited_alerts_are_repaired() {
    let dir = TempDir::new().unwrap();
    let config = ConfigDir::new(dir.path());
    std::fs::write(
        config.alerts_path(),
        r#"[{"text": "legacy", "repeat": true, "time": "07:00:00", "overlay_color": "red"}]"#,
    )
    .unwrap();

    let loaded = config.load_alerts(&Settings::default(), now()).unwrap();

    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].recurrence, Recurrence::Daily);
    assert_eq!(loaded[0].date, "2025-04-02");
    assert_eq!(loaded[0].presentation.overlay_color, None);
}

#[test]
fn non_list_alerts_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let config = ConfigDir::new(dir.path());
    std::fs::write(config.alerts_path(), r#"{"text": "oops"}"#).unwrap();

    let result = config.load_alerts(&Settings::default(), now());

    assert!(matches!(result, Err(StorageError::InvalidFormat(_))));
}

#[test]
fn corrupt_settings_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let config = ConfigDir::new(dir.path());
    std::fs::write(config.settings_path(), "{not json").unwrap();

    assert!(matches!(config.load_settings(), Err(StorageError::Json(_))));
}
