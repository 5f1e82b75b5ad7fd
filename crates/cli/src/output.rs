// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Output formatting for CLI commands

use std::fmt;

use chrono::NaiveDateTime;
use clap::ValueEnum;
use ga_daemon::AlertSummary;
use serde::Serialize;

use crate::client::DaemonStatus;

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Print output in the specified format
pub fn print<T: Serialize + fmt::Display>(value: &T, format: OutputFormat) {
    match format {
        OutputFormat::Text => println!("{}", value),
        OutputFormat::Json => {
            if let Ok(json) = serde_json::to_string_pretty(value) {
                println!("{}", json);
            }
        }
    }
}

/// Print a list of items
pub fn print_list<T: Serialize + fmt::Display>(items: &[T], format: OutputFormat) {
    match format {
        OutputFormat::Text => {
            for item in items {
                println!("{}", item);
            }
        }
        OutputFormat::Json => {
            if let Ok(json) = serde_json::to_string_pretty(items) {
                println!("{}", json);
            }
        }
    }
}

/// Print a one-line acknowledgement, or its JSON form
pub fn print_ack(text: &str, value: serde_json::Value, format: OutputFormat) {
    match format {
        OutputFormat::Text => println!("{}", text),
        OutputFormat::Json => {
            if let Ok(json) = serde_json::to_string_pretty(&value) {
                println!("{}", json);
            }
        }
    }
}

const TEXT_WIDTH: usize = 30;

/// One line of `ga list`
#[derive(Serialize)]
pub struct AlertRow {
    pub index: usize,
    pub enabled: bool,
    pub date: String,
    pub time: String,
    pub repeat: String,
    pub text: String,
    pub next_trigger: Option<NaiveDateTime>,
}

impl From<AlertSummary> for AlertRow {
    fn from(summary: AlertSummary) -> Self {
        let alert = summary.alert;
        Self {
            index: summary.index,
            enabled: alert.enabled,
            repeat: alert.recurrence.to_string(),
            date: alert.date,
            time: alert.time,
            text: alert.text,
            next_trigger: summary.next_trigger,
        }
    }
}

impl AlertRow {
    pub const HEADER: &'static str = "IDX ON  DATE       TIME     REPEAT               NEXT                 TEXT";
}

impl fmt::Display for AlertRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let next = match self.next_trigger {
            Some(at) => at.format("%Y-%m-%d %H:%M:%S").to_string(),
            None => "-".to_string(),
        };
        write!(
            f,
            "{:<3} {:<3} {:<10} {:<8} {:<20} {:<20} {}",
            self.index,
            if self.enabled { "yes" } else { "no" },
            self.date,
            self.time,
            self.repeat,
            next,
            truncate(&self.text, TEXT_WIDTH)
        )
    }
}

fn truncate(text: &str, width: usize) -> String {
    // Overlay text may span lines; keep the table on one
    let first = text.lines().next().unwrap_or("");
    if first.chars().count() > width || first.len() < text.len() {
        let cut: String = first.chars().take(width.saturating_sub(3)).collect();
        format!("{}...", cut)
    } else {
        first.to_string()
    }
}

/// `ga status` report
#[derive(Serialize)]
pub struct StatusReport {
    pub running: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uptime_secs: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alerts: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub armed: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delayed: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_alert: Option<NaiveDateTime>,
}

impl StatusReport {
    pub fn not_running() -> Self {
        Self {
            running: false,
            uptime_secs: None,
            alerts: None,
            enabled: None,
            armed: None,
            delayed: None,
            next_alert: None,
        }
    }
}

impl From<DaemonStatus> for StatusReport {
    fn from(s: DaemonStatus) -> Self {
        Self {
            running: true,
            uptime_secs: Some(s.uptime_secs),
            alerts: Some(s.alerts),
            enabled: Some(s.enabled),
            armed: Some(s.armed),
            delayed: Some(s.delayed),
            next_alert: s.next_alert,
        }
    }
}

impl fmt::Display for StatusReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.running {
            return write!(f, "Daemon not running");
        }
        writeln!(f, "Daemon running")?;
        writeln!(f, "  Uptime: {}", format_uptime(self.uptime_secs.unwrap_or(0)))?;
        writeln!(
            f,
            "  Alerts: {} ({} enabled)",
            self.alerts.unwrap_or(0),
            self.enabled.unwrap_or(0)
        )?;
        writeln!(f, "  Armed: {}", self.armed.unwrap_or(0))?;
        writeln!(f, "  Delayed: {}", self.delayed.unwrap_or(0))?;
        match self.next_alert {
            Some(at) => write!(f, "  Next: {}", at.format("%Y-%m-%d %H:%M:%S")),
            None => write!(f, "  Next: -"),
        }
    }
}

fn format_uptime(secs: u64) -> String {
    let (h, m, s) = (secs / 3600, (secs % 3600) / 60, secs % 60);
    if h > 0 {
        format!("{}h {}m", h, m)
    } else if m > 0 {
        format!("{}m {}s", m, s)
    } else {
        format!("{}s", s)
    }
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
