// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Alert records and their recurrence rules
//!
//! An alert keeps its start date and time of day as the raw strings it was
//! configured with. Parsing happens when the next trigger is computed, so a
//! malformed value is tolerated (or disables the alert) instead of being
//! rejected on load.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Storage format for an alert's start date
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Storage format for an alert's time of day
pub const TIME_FORMAT: &str = "%H:%M:%S";

/// Default day for monthly alerts created without one
pub const DEFAULT_DAY_OF_MONTH: u32 = 1;

/// A configured reminder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub enabled: bool,
    /// Start date, `YYYY-MM-DD`
    pub date: String,
    /// Time of day, `HH:MM:SS`
    pub time: String,
    #[serde(flatten)]
    pub recurrence: Recurrence,
    pub text: String,
    /// Overlay parameters; only the presenter interprets these
    #[serde(flatten)]
    pub presentation: PresentationParams,
}

impl Alert {
    pub fn new(date: impl Into<String>, time: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            enabled: true,
            date: date.into(),
            time: time.into(),
            recurrence: Recurrence::Once,
            text: text.into(),
            presentation: PresentationParams::default(),
        }
    }

    /// Create an alert whose start date and time come from `at`
    pub fn at(at: NaiveDateTime, text: impl Into<String>) -> Self {
        Self::new(
            at.date().format(DATE_FORMAT).to_string(),
            at.time().format(TIME_FORMAT).to_string(),
            text,
        )
    }

    pub fn with_recurrence(mut self, recurrence: Recurrence) -> Self {
        self.recurrence = recurrence;
        self
    }

    pub fn with_display(mut self, display: Display) -> Self {
        self.presentation.display = display;
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Parsed start date, if the stored string is valid
    pub fn start_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.date.trim(), DATE_FORMAT).ok()
    }

    /// Parsed time of day, if the stored string is valid
    pub fn time_of_day(&self) -> Option<NaiveTime> {
        NaiveTime::parse_from_str(self.time.trim(), TIME_FORMAT).ok()
    }

    pub fn is_one_shot(&self) -> bool {
        !self.recurrence.is_repeating()
    }

    /// Text for log lines and listings
    pub fn label(&self) -> &str {
        if self.text.is_empty() {
            "(No Text)"
        } else {
            &self.text
        }
    }

    /// A one-off copy of this alert that fires at `at`.
    ///
    /// Used for delayed (snoozed) presentations: the copy never repeats and is
    /// always enabled, whatever the original's state.
    pub fn snoozed_until(&self, at: NaiveDateTime) -> Self {
        let mut copy = self.clone();
        copy.recurrence = Recurrence::Once;
        copy.enabled = true;
        copy.date = at.date().format(DATE_FORMAT).to_string();
        copy.time = at.time().format(TIME_FORMAT).to_string();
        copy
    }
}

/// Repetition rule for an alert
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "repeat")]
pub enum Recurrence {
    /// Fires once at the start date and time
    #[default]
    #[serde(rename = "No Repeat")]
    Once,
    Daily,
    Weekly {
        #[serde(default)]
        weekdays: Vec<Weekday>,
    },
    Monthly {
        #[serde(default = "default_day_of_month")]
        day_of_month: u32,
    },
    /// Fixed interval anchored to the start date and time
    Interval { interval_minutes: i64 },
}

fn default_day_of_month() -> u32 {
    DEFAULT_DAY_OF_MONTH
}

impl Recurrence {
    pub fn is_repeating(&self) -> bool {
        !matches!(self, Recurrence::Once)
    }

    /// Name of the rule as stored under the `repeat` key
    pub fn kind(&self) -> &'static str {
        match self {
            Recurrence::Once => "No Repeat",
            Recurrence::Daily => "Daily",
            Recurrence::Weekly { .. } => "Weekly",
            Recurrence::Monthly { .. } => "Monthly",
            Recurrence::Interval { .. } => "Interval",
        }
    }
}

impl fmt::Display for Recurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recurrence::Weekly { weekdays } => {
                let days: Vec<String> = weekdays.iter().map(|d| d.to_string()).collect();
                write!(f, "Weekly ({})", days.join(", "))
            }
            Recurrence::Monthly { day_of_month } => write!(f, "Monthly (day {})", day_of_month),
            Recurrence::Interval { interval_minutes } => {
                write!(f, "Every {} min", interval_minutes)
            }
            other => f.write_str(other.kind()),
        }
    }
}

/// Which screens an alert is shown on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Display {
    /// Primary screen only
    #[default]
    Main,
    /// One presentation per screen
    All,
}

impl fmt::Display for Display {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Display::Main => f.write_str("Main"),
            Display::All => f.write_str("All"),
        }
    }
}

/// RGB color, stored as a three-element array
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const WHITE: Rgb = Rgb(255, 255, 255);
}

/// Per-alert overlay parameters.
///
/// Unset fields fall back to the global [`Settings`](crate::Settings) when the
/// presenter resolves them.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PresentationParams {
    #[serde(default)]
    pub display: Display,
    /// Minutes until the overlay reaches full size
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expansion_time: Option<f64>,
    /// Total on-screen time as a multiple of `expansion_time`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_multiplier: Option<f64>,
    /// Initial overlay edge in pixels
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_size: Option<u32>,
    /// Overlay transparency, percent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transparency: Option<f64>,
    /// Text transparency, percent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_transparency: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overlay_color: Option<Rgb>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_color: Option<Rgb>,
}

#[cfg(test)]
#[path = "alert_tests.rs"]
mod tests;
