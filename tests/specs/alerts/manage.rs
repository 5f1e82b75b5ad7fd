// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Alert management specs
//!
//! Verify add/edit/enable/disable/remove through the CLI and what lands in
//! alerts.json.

use crate::prelude::*;

const FAR_FUTURE: &str = "2099-01-01";

fn add_daily(temp: &Project, text: &str) {
    temp.ga()
        .args(&["add", text, "--time", "09:00", "--repeat", "daily"])
        .passes();
}

#[test]
fn list_is_empty_at_first() {
    let temp = Project::empty();

    temp.ga().args(&["list"]).passes().stdout_eq("No alerts\n");
}

#[test]
fn add_reports_index_and_lists_alert() {
    let temp = Project::empty();

    temp.ga()
        .args(&["add", "Stretch", "--time", "09:30", "--date", FAR_FUTURE])
        .passes()
        .stdout_eq("Added alert 0\n");

    temp.ga()
        .args(&["list"])
        .passes()
        .stdout_has("IDX")
        .stdout_has("2099-01-01 09:30:00 No Repeat")
        .stdout_has("Stretch");
}

#[test]
fn add_persists_to_alerts_file() {
    let temp = Project::empty();
    temp.ga()
        .args(&["add", "Standup", "--time", "10:00", "--weekdays", "mon,fri"])
        .passes();

    let saved = temp.saved_alerts();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0]["text"], "Standup");
    assert_eq!(saved[0]["time"], "10:00:00");
    assert_eq!(saved[0]["repeat"], "Weekly");
    assert_eq!(saved[0]["weekdays"], serde_json::json!(["Mon", "Fri"]));
}

#[test]
fn list_as_json_includes_next_trigger() {
    let temp = Project::empty();
    add_daily(&temp, "Water");
    temp.ga()
        .args(&["add", "Off", "--time", "09:00", "--repeat", "daily", "--disabled"])
        .passes();

    let rows = temp.ga().args(&["list", "--output", "json"]).passes().json();

    assert_eq!(rows[0]["index"], 0);
    assert_eq!(rows[0]["repeat"], "Daily");
    assert!(rows[0]["next_trigger"].is_string());
    assert_eq!(rows[1]["enabled"], false);
    assert!(rows[1]["next_trigger"].is_null());
}

#[test]
fn edit_changes_only_given_fields() {
    let temp = Project::empty();
    add_daily(&temp, "Stretch");

    temp.ga()
        .args(&["edit", "0", "--text", "Stretch legs", "--time", "11:15"])
        .passes()
        .stdout_has("Updated alert 0");

    let saved = temp.saved_alerts();
    assert_eq!(saved[0]["text"], "Stretch legs");
    assert_eq!(saved[0]["time"], "11:15:00");
    assert_eq!(saved[0]["repeat"], "Daily");
}

#[test]
fn disable_and_enable_toggle_schedule() {
    let temp = Project::empty();
    add_daily(&temp, "Stretch");

    temp.ga()
        .args(&["disable", "0"])
        .passes()
        .stdout_has("Disabled alert 0");
    temp.ga()
        .args(&["status"])
        .passes()
        .stdout_has("Alerts: 1 (0 enabled)")
        .stdout_has("Armed: 0");
    assert_eq!(temp.saved_alerts()[0]["enabled"], false);

    temp.ga()
        .args(&["enable", "0"])
        .passes()
        .stdout_has("Enabled alert 0");
    temp.ga().args(&["status"]).passes().stdout_has("Armed: 1");
}

#[test]
fn remove_shifts_later_alerts_down() {
    let temp = Project::empty();
    add_daily(&temp, "First");
    add_daily(&temp, "Second");
    add_daily(&temp, "Third");

    temp.ga()
        .args(&["remove", "0"])
        .passes()
        .stdout_has("Removed alert 0: First");

    let rows = temp.ga().args(&["list", "--output", "json"]).passes().json();
    assert_eq!(rows[0]["text"], "Second");
    assert_eq!(rows[1]["index"], 1);
    assert_eq!(rows[1]["text"], "Third");
    temp.ga().args(&["status"]).passes().stdout_has("Armed: 2");
}

#[test]
fn out_of_range_index_fails_with_hint() {
    let temp = Project::empty();
    add_daily(&temp, "Only");

    temp.ga()
        .args(&["remove", "3"])
        .fails()
        .stderr_has("out of range")
        .stderr_has("ga list");
    temp.ga().args(&["disable", "7"]).fails().stderr_has("out of range");
    temp.ga().args(&["edit", "2", "--time", "10:00"]).fails().stderr_has("out of range");
}

#[test]
fn invalid_options_are_rejected() {
    let temp = Project::empty();

    temp.ga()
        .args(&["add", "Bad", "--time", "25:00"])
        .fails()
        .stderr_has("invalid value '25:00' for --time");
    temp.ga()
        .args(&["add", "Bad", "--time", "09:00", "--repeat", "weekly"])
        .fails()
        .stderr_has("at least one weekday");
    temp.ga()
        .args(&["add", "Bad", "--time", "09:00", "--every", "0"])
        .fails()
        .stderr_has("--every");

    assert!(temp.saved_alerts().is_empty());
}

#[test]
fn passed_one_shot_is_disabled_on_startup() {
    let temp = Project::empty();
    temp.file(
        "alerts.json",
        r#"[{"enabled": true, "date": "2001-02-03", "time": "09:00:00", "repeat": "No Repeat", "text": "Long gone"}]"#,
    );

    let rows = temp.ga().args(&["list", "--output", "json"]).passes().json();

    assert_eq!(rows[0]["enabled"], false);
    assert!(wait_for(SPEC_WAIT_MAX_MS, || {
        temp.saved_alerts()
            .first()
            .is_some_and(|a| a["enabled"] == false)
    }));
}

#[test]
fn legacy_boolean_repeat_loads_as_daily() {
    let temp = Project::empty();
    temp.file(
        "alerts.json",
        r#"[{"enabled": true, "date": "2001-02-03", "time": "09:00:00", "repeat": true, "text": "Legacy"}]"#,
    );

    temp.ga()
        .args(&["list"])
        .passes()
        .stdout_has("Daily")
        .stdout_has("Legacy");
}
