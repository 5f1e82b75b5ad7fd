// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Presentation command specs
//!
//! The daemon runs headless here, so nothing is ever on screen.

use crate::prelude::*;

#[test]
fn delay_with_nothing_showing_is_a_no_op() {
    let temp = Project::empty();

    temp.ga()
        .args(&["delay", "5"])
        .passes()
        .stdout_eq("Nothing showing\n");
    temp.ga().args(&["status"]).passes().stdout_has("Delayed: 0");
}

#[test]
fn delay_as_json() {
    let temp = Project::empty();

    let ack = temp.ga().args(&["delay", "10", "--output", "json"]).passes().json();

    assert_eq!(ack, serde_json::json!({ "delayed": 0, "minutes": 10 }));
}

#[test]
fn delay_rejects_non_positive_minutes() {
    let temp = Project::empty();

    temp.ga()
        .args(&["delay", "0"])
        .fails()
        .stderr_has("positive number of minutes");
    temp.ga()
        .args(&["delay", "-3"])
        .fails()
        .stderr_has("got -3");
}

#[test]
fn test_without_index_shows_defaults() {
    let temp = Project::empty();

    temp.ga()
        .args(&["test"])
        .passes()
        .stdout_eq("Showing default settings\n");
}

#[test]
fn test_alert_does_not_change_schedule() {
    let temp = Project::empty();
    temp.ga()
        .args(&["add", "Once", "--time", "09:00", "--date", "2099-01-01"])
        .passes();

    temp.ga()
        .args(&["test", "0"])
        .passes()
        .stdout_has("Showing alert 0");

    let rows = temp.ga().args(&["list", "--output", "json"]).passes().json();
    assert_eq!(rows[0]["enabled"], true);
    assert_eq!(rows[0]["next_trigger"], "2099-01-01T09:00:00");
}

#[test]
fn test_unknown_index_fails() {
    let temp = Project::empty();

    temp.ga()
        .args(&["test", "4"])
        .fails()
        .stderr_has("out of range");
}

#[test]
fn stop_dismisses() {
    let temp = Project::empty();

    temp.ga()
        .args(&["stop"])
        .passes()
        .stdout_has("Dismissed alerts on screen");
}
