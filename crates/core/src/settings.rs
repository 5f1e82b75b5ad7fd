// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Global presentation defaults

use crate::alert::{Alert, Display, PresentationParams, Rgb};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::time::Duration;

/// Text of the synthetic alert shown by "test defaults"
pub const TEST_ALERT_TEXT: &str = "Default Settings Test Alert";

/// Accepted expansion times, in minutes
pub const EXPANSION_TIME_RANGE: RangeInclusive<f64> = 0.1..=1440.0;

/// Accepted duration multipliers
pub const DURATION_MULTIPLIER_RANGE: RangeInclusive<f64> = 0.1..=10.0;

/// Defaults applied to alert fields that are left unset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub default_expansion_time: f64,
    pub default_duration_multiplier: f64,
    pub default_start_size: u32,
    pub default_transparency: f64,
    pub default_text_transparency: f64,
    pub default_overlay_color: Rgb,
    pub default_text_color: Rgb,
    pub default_display: Display,
    pub max_pixels_per_step: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_expansion_time: 60.0,
            default_duration_multiplier: 2.0,
            default_start_size: 200,
            default_transparency: 39.0,
            default_text_transparency: 39.0,
            default_overlay_color: Rgb::BLACK,
            default_text_color: Rgb::WHITE,
            default_display: Display::Main,
            max_pixels_per_step: 50,
        }
    }
}

impl Settings {
    /// Fill every unset field of `alert` from these defaults
    pub fn resolve(&self, alert: &Alert) -> Presentation {
        let p = &alert.presentation;
        Presentation {
            text: alert.text.clone(),
            display: p.display,
            expansion_time: p.expansion_time.unwrap_or(self.default_expansion_time),
            duration_multiplier: p
                .duration_multiplier
                .unwrap_or(self.default_duration_multiplier),
            start_size: p.start_size.unwrap_or(self.default_start_size),
            transparency: p.transparency.unwrap_or(self.default_transparency),
            text_transparency: p.text_transparency.unwrap_or(self.default_text_transparency),
            overlay_color: p.overlay_color.unwrap_or(self.default_overlay_color),
            text_color: p.text_color.unwrap_or(self.default_text_color),
            max_pixels_per_step: self.max_pixels_per_step,
        }
    }

    /// Synthetic one-shot alert carrying every default explicitly
    pub fn test_alert(&self, now: NaiveDateTime) -> Alert {
        let mut alert = Alert::at(now, TEST_ALERT_TEXT);
        alert.presentation = PresentationParams {
            display: self.default_display,
            expansion_time: Some(self.default_expansion_time),
            duration_multiplier: Some(self.default_duration_multiplier),
            start_size: Some(self.default_start_size),
            transparency: Some(self.default_transparency),
            text_transparency: Some(self.default_text_transparency),
            overlay_color: Some(self.default_overlay_color),
            text_color: Some(self.default_text_color),
        };
        alert
    }
}

/// An alert's overlay parameters with all defaults applied
#[derive(Debug, Clone, PartialEq)]
pub struct Presentation {
    pub text: String,
    pub display: Display,
    pub expansion_time: f64,
    pub duration_multiplier: f64,
    pub start_size: u32,
    pub transparency: f64,
    pub text_transparency: f64,
    pub overlay_color: Rgb,
    pub text_color: Rgb,
    pub max_pixels_per_step: u32,
}

impl Presentation {
    /// How long the overlay stays up before dismissing itself.
    ///
    /// Both factors are capped at the top of their accepted range, so the
    /// result never exceeds 1440 × 10 minutes.
    pub fn on_screen(&self) -> Duration {
        let minutes = capped(self.expansion_time, *EXPANSION_TIME_RANGE.end())
            * capped(self.duration_multiplier, *DURATION_MULTIPLIER_RANGE.end());
        Duration::from_secs_f64(minutes * 60.0)
    }
}

/// Non-positive and NaN become zero; everything else is capped at `max`
fn capped(value: f64, max: f64) -> f64 {
    if value.is_nan() || value <= 0.0 {
        0.0
    } else {
        value.min(max)
    }
}

/// Clamp a stored value into `range`, or `None` when it is not a number
pub fn clamp_to(value: f64, range: &RangeInclusive<f64>) -> Option<f64> {
    if value.is_nan() {
        None
    } else {
        Some(value.clamp(*range.start(), *range.end()))
    }
}

#[cfg(test)]
#[path = "settings_tests.rs"]
mod tests;
