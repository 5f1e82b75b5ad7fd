// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Lenient validation of stored alerts and settings
//!
//! Hand-edited or older config files are accepted field by field. A field
//! that is missing or has the wrong shape falls back to its default and the
//! rest of the record is kept.

use chrono::{NaiveDateTime, Weekday};
use ga_core::{
    clamp_to, Alert, Display, PresentationParams, Recurrence, Rgb, Settings, DATE_FORMAT,
    DURATION_MULTIPLIER_RANGE, EXPANSION_TIME_RANGE, TIME_FORMAT,
};
use serde_json::{Map, Value};

/// Build an alert from one stored JSON record.
///
/// Missing date and time default to `now`; an unrecognised `repeat` becomes
/// "No Repeat"; legacy boolean `repeat` values map to Daily / No Repeat.
pub fn validate_alert(value: &Value, settings: &Settings, now: NaiveDateTime) -> Alert {
    let empty = Map::new();
    let record = value.as_object().unwrap_or(&empty);

    let enabled = record.get("enabled").and_then(Value::as_bool).unwrap_or(true);
    let date = record
        .get("date")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| now.date().format(DATE_FORMAT).to_string());
    let time = record
        .get("time")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| now.time().format(TIME_FORMAT).to_string());
    let text = record
        .get("text")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    Alert {
        enabled,
        date,
        time,
        recurrence: recurrence(record),
        text,
        presentation: presentation(record, settings),
    }
}

fn recurrence(record: &Map<String, Value>) -> Recurrence {
    let kind = match record.get("repeat") {
        Some(Value::Bool(true)) => "Daily",
        Some(Value::String(s)) => s.as_str(),
        _ => "No Repeat",
    };

    match kind {
        "Daily" => Recurrence::Daily,
        "Weekly" => Recurrence::Weekly {
            weekdays: weekdays(record.get("weekdays")),
        },
        "Monthly" => Recurrence::Monthly {
            day_of_month: record
                .get("day_of_month")
                .and_then(coerce_int)
                .map(|d| u32::try_from(d).unwrap_or(0))
                .unwrap_or(ga_core::alert::DEFAULT_DAY_OF_MONTH),
        },
        "Interval" => Recurrence::Interval {
            interval_minutes: record
                .get("interval_minutes")
                .and_then(coerce_int)
                .unwrap_or(0),
        },
        "No Repeat" => Recurrence::Once,
        other => {
            tracing::warn!(repeat = other, "unknown repeat value, using No Repeat");
            Recurrence::Once
        }
    }
}

fn weekdays(value: Option<&Value>) -> Vec<Weekday> {
    let Some(Value::Array(days)) = value else {
        return Vec::new();
    };
    let mut parsed: Vec<Weekday> = Vec::new();
    for day in days.iter().filter_map(Value::as_str) {
        match day.parse::<Weekday>() {
            Ok(d) if !parsed.contains(&d) => parsed.push(d),
            Ok(_) => {}
            Err(_) => tracing::warn!(day, "ignoring unknown weekday"),
        }
    }
    parsed
}

fn presentation(record: &Map<String, Value>, settings: &Settings) -> PresentationParams {
    let display = match record.get("display").and_then(Value::as_str) {
        Some("Main") => Display::Main,
        Some("All") => Display::All,
        _ => settings.default_display,
    };

    PresentationParams {
        display,
        expansion_time: record
            .get("expansion_time")
            .and_then(coerce_float)
            .and_then(|v| clamp_to(v, &EXPANSION_TIME_RANGE)),
        duration_multiplier: record
            .get("duration_multiplier")
            .and_then(coerce_float)
            .and_then(|v| clamp_to(v, &DURATION_MULTIPLIER_RANGE)),
        start_size: record
            .get("start_size")
            .and_then(coerce_int)
            .and_then(|n| u32::try_from(n).ok()),
        transparency: record.get("transparency").and_then(coerce_float),
        text_transparency: record.get("text_transparency").and_then(coerce_float),
        overlay_color: color(record, "overlay_color"),
        text_color: color(record, "text_color"),
    }
}

fn color(record: &Map<String, Value>, key: &str) -> Option<Rgb> {
    let value = record.get(key)?;
    let parsed = parse_color(value);
    if parsed.is_none() {
        tracing::warn!(key, %value, "invalid color, using default");
    }
    parsed
}

/// Three integer components, each 0..=255
pub fn parse_color(value: &Value) -> Option<Rgb> {
    let parts = value.as_array()?;
    if parts.len() != 3 {
        return None;
    }
    let mut rgb = [0u8; 3];
    for (slot, part) in rgb.iter_mut().zip(parts) {
        *slot = u8::try_from(part.as_u64()?).ok()?;
    }
    Some(Rgb(rgb[0], rgb[1], rgb[2]))
}

fn coerce_float(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn coerce_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Build settings from a stored JSON object.
///
/// Each key that is present and well-formed overrides its default; anything
/// else keeps the default and is logged.
pub fn validate_settings(value: &Value) -> Settings {
    let mut settings = Settings::default();
    let Some(record) = value.as_object() else {
        tracing::warn!("settings file is not an object, using defaults");
        return settings;
    };

    let float = |key: &str, slot: &mut f64| {
        if let Some(v) = record.get(key) {
            match v.as_f64() {
                Some(f) => *slot = f,
                None => tracing::warn!(key, %v, "type mismatch in settings, using default"),
            }
        }
    };
    float("default_expansion_time", &mut settings.default_expansion_time);
    float("default_duration_multiplier", &mut settings.default_duration_multiplier);
    float("default_transparency", &mut settings.default_transparency);
    float("default_text_transparency", &mut settings.default_text_transparency);

    let defaults = Settings::default();
    settings.default_expansion_time =
        clamp_to(settings.default_expansion_time, &EXPANSION_TIME_RANGE)
            .unwrap_or(defaults.default_expansion_time);
    settings.default_duration_multiplier =
        clamp_to(settings.default_duration_multiplier, &DURATION_MULTIPLIER_RANGE)
            .unwrap_or(defaults.default_duration_multiplier);

    let int = |key: &str, slot: &mut u32| {
        if let Some(v) = record.get(key) {
            match v.as_u64().and_then(|n| u32::try_from(n).ok()) {
                Some(n) => *slot = n,
                None => tracing::warn!(key, %v, "type mismatch in settings, using default"),
            }
        }
    };
    int("default_start_size", &mut settings.default_start_size);
    int("max_pixels_per_step", &mut settings.max_pixels_per_step);

    let rgb = |key: &str, slot: &mut Rgb| {
        if let Some(v) = record.get(key) {
            match parse_color(v) {
                Some(c) => *slot = c,
                None => tracing::warn!(key, %v, "invalid color in settings, using default"),
            }
        }
    };
    rgb("default_overlay_color", &mut settings.default_overlay_color);
    rgb("default_text_color", &mut settings.default_text_color);

    match record.get("default_display").and_then(Value::as_str) {
        Some("Main") => settings.default_display = Display::Main,
        Some("All") => settings.default_display = Display::All,
        Some(other) => tracing::warn!(display = other, "unknown display in settings"),
        None => {}
    }

    settings
}

#[cfg(test)]
#[path = "validate_tests.rs"]
mod tests;
