// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Alert commands: list, add, edit, enable/disable, remove, delay, test, stop

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use clap::{Args, ValueEnum};
use ga_core::alert::DEFAULT_DAY_OF_MONTH;
use ga_core::{
    Alert, Display, Recurrence, Rgb, DATE_FORMAT, DURATION_MULTIPLIER_RANGE, EXPANSION_TIME_RANGE,
    TIME_FORMAT,
};
use serde_json::json;
use std::ops::RangeInclusive;

use crate::client::{ClientError, DaemonClient};
use crate::error::GaError;
use crate::output::{self, AlertRow, OutputFormat};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RepeatArg {
    None,
    Daily,
    Weekly,
    Monthly,
    Interval,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DisplayArg {
    Main,
    All,
}

impl From<DisplayArg> for Display {
    fn from(arg: DisplayArg) -> Self {
        match arg {
            DisplayArg::Main => Display::Main,
            DisplayArg::All => Display::All,
        }
    }
}

/// Schedule and presentation options shared by `add` and `edit`.
///
/// Unset options leave the alert untouched.
#[derive(Debug, Default, Args)]
pub struct AlertFields {
    /// Start date (YYYY-MM-DD)
    #[arg(long)]
    pub date: Option<String>,

    /// Time of day (HH:MM or HH:MM:SS)
    #[arg(long)]
    pub time: Option<String>,

    /// Repetition rule
    #[arg(long, value_enum)]
    pub repeat: Option<RepeatArg>,

    /// Weekdays for weekly alerts (e.g. mon,wed,fri)
    #[arg(long, value_delimiter = ',')]
    pub weekdays: Vec<String>,

    /// Day of month for monthly alerts (1-31)
    #[arg(long)]
    pub day_of_month: Option<u32>,

    /// Interval in minutes for interval alerts
    #[arg(long, allow_negative_numbers = true)]
    pub every: Option<i64>,

    /// Screens to show the alert on
    #[arg(long, value_enum)]
    pub display: Option<DisplayArg>,

    /// Minutes until the overlay reaches full size (0.1-1440)
    #[arg(long)]
    pub expansion_time: Option<f64>,

    /// On-screen time as a multiple of the expansion time (0.1-10)
    #[arg(long)]
    pub duration_multiplier: Option<f64>,

    /// Initial overlay size in pixels
    #[arg(long)]
    pub start_size: Option<u32>,

    /// Overlay transparency (percent)
    #[arg(long)]
    pub transparency: Option<f64>,

    /// Text transparency (percent)
    #[arg(long)]
    pub text_transparency: Option<f64>,

    /// Overlay color as r,g,b
    #[arg(long)]
    pub overlay_color: Option<String>,

    /// Text color as r,g,b
    #[arg(long)]
    pub text_color: Option<String>,
}

#[derive(Debug, Args)]
pub struct AddArgs {
    /// Text shown in the overlay
    pub text: String,

    #[command(flatten)]
    pub fields: AlertFields,

    /// Save the alert without scheduling it
    #[arg(long)]
    pub disabled: bool,
}

#[derive(Debug, Args)]
pub struct EditArgs {
    /// Index from `ga list`
    pub index: usize,

    /// Replace the overlay text
    #[arg(long)]
    pub text: Option<String>,

    #[command(flatten)]
    pub fields: AlertFields,
}

impl AddArgs {
    /// Build a new alert; the date defaults to today
    pub fn build(&self, now: NaiveDateTime) -> Result<Alert, GaError> {
        if self.fields.time.is_none() {
            return Err(GaError::new("missing --time")
                .with_suggestion("Give a time of day: ga add \"Stretch\" --time 09:30"));
        }
        let mut alert = Alert::new(
            now.date().format(DATE_FORMAT).to_string(),
            now.time().format(TIME_FORMAT).to_string(),
            self.text.clone(),
        );
        self.fields.apply(&mut alert)?;
        if self.disabled {
            alert = alert.disabled();
        }
        Ok(alert)
    }
}

impl EditArgs {
    /// Patch an existing alert with the given options
    pub fn patch(&self, mut alert: Alert) -> Result<Alert, GaError> {
        if let Some(text) = &self.text {
            alert.text = text.clone();
        }
        self.fields.apply(&mut alert)?;
        Ok(alert)
    }
}

impl AlertFields {
    pub fn apply(&self, alert: &mut Alert) -> Result<(), GaError> {
        if let Some(date) = &self.date {
            alert.date = parse_date(date)?;
        }
        if let Some(time) = &self.time {
            alert.time = parse_time(time)?;
        }
        alert.recurrence = self.recurrence(&alert.recurrence)?;

        let p = &mut alert.presentation;
        if let Some(display) = self.display {
            p.display = display.into();
        }
        if let Some(v) = self.expansion_time {
            p.expansion_time = Some(in_range("--expansion-time", v, &EXPANSION_TIME_RANGE)?);
        }
        if let Some(v) = self.duration_multiplier {
            p.duration_multiplier =
                Some(in_range("--duration-multiplier", v, &DURATION_MULTIPLIER_RANGE)?);
        }
        if let Some(v) = self.start_size {
            p.start_size = Some(v);
        }
        if let Some(v) = self.transparency {
            p.transparency = Some(percent("--transparency", v)?);
        }
        if let Some(v) = self.text_transparency {
            p.text_transparency = Some(percent("--text-transparency", v)?);
        }
        if let Some(c) = &self.overlay_color {
            p.overlay_color = Some(parse_rgb("--overlay-color", c)?);
        }
        if let Some(c) = &self.text_color {
            p.text_color = Some(parse_rgb("--text-color", c)?);
        }
        Ok(())
    }

    /// Rule the options ask for, starting from `current`.
    ///
    /// Rule-specific options without `--repeat` switch to their rule.
    fn recurrence(&self, current: &Recurrence) -> Result<Recurrence, GaError> {
        let implied = if !self.weekdays.is_empty() {
            Some(RepeatArg::Weekly)
        } else if self.day_of_month.is_some() {
            Some(RepeatArg::Monthly)
        } else if self.every.is_some() {
            Some(RepeatArg::Interval)
        } else {
            None
        };

        let kind = match (self.repeat, implied) {
            (None, None) => return Ok(current.clone()),
            (Some(kind), Some(other)) if kind != other => {
                return Err(GaError::new(format!(
                    "--repeat {} does not take the options given",
                    repeat_name(kind)
                ))
                .with_context(format!("those options belong to --repeat {}", repeat_name(other))));
            }
            (Some(kind), _) | (None, Some(kind)) => kind,
        };

        match kind {
            RepeatArg::None => Ok(Recurrence::Once),
            RepeatArg::Daily => Ok(Recurrence::Daily),
            RepeatArg::Weekly => {
                let weekdays = if self.weekdays.is_empty() {
                    match current {
                        Recurrence::Weekly { weekdays } => weekdays.clone(),
                        _ => Vec::new(),
                    }
                } else {
                    parse_weekdays(&self.weekdays)?
                };
                if weekdays.is_empty() {
                    return Err(GaError::new("weekly alerts need at least one weekday")
                        .with_suggestion("Pass --weekdays, e.g. --weekdays mon,wed,fri"));
                }
                Ok(Recurrence::Weekly { weekdays })
            }
            RepeatArg::Monthly => {
                let day_of_month = match (self.day_of_month, current) {
                    (Some(day), _) => day,
                    (None, Recurrence::Monthly { day_of_month }) => *day_of_month,
                    (None, _) => DEFAULT_DAY_OF_MONTH,
                };
                if !(1..=31).contains(&day_of_month) {
                    return Err(GaError::invalid_option(
                        "--day-of-month",
                        &day_of_month.to_string(),
                        "a day between 1 and 31",
                    ));
                }
                Ok(Recurrence::Monthly { day_of_month })
            }
            RepeatArg::Interval => {
                let interval_minutes = match (self.every, current) {
                    (Some(m), _) => m,
                    (None, Recurrence::Interval { interval_minutes }) => *interval_minutes,
                    (None, _) => {
                        return Err(GaError::new("interval alerts need --every")
                            .with_suggestion("Give the interval in minutes: --every 45"));
                    }
                };
                if interval_minutes <= 0 {
                    return Err(GaError::invalid_option(
                        "--every",
                        &interval_minutes.to_string(),
                        "a positive number of minutes",
                    ));
                }
                Ok(Recurrence::Interval { interval_minutes })
            }
        }
    }
}

fn repeat_name(kind: RepeatArg) -> &'static str {
    match kind {
        RepeatArg::None => "none",
        RepeatArg::Daily => "daily",
        RepeatArg::Weekly => "weekly",
        RepeatArg::Monthly => "monthly",
        RepeatArg::Interval => "interval",
    }
}

fn parse_date(value: &str) -> Result<String, GaError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map(|d| d.format(DATE_FORMAT).to_string())
        .map_err(|_| GaError::invalid_option("--date", value, "a date as YYYY-MM-DD"))
}

/// Accept HH:MM or HH:MM:SS; store HH:MM:SS
pub fn parse_time(value: &str) -> Result<String, GaError> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, TIME_FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
        .map(|t| t.format(TIME_FORMAT).to_string())
        .map_err(|_| GaError::invalid_option("--time", value, "HH:MM or HH:MM:SS"))
}

fn parse_weekdays(values: &[String]) -> Result<Vec<Weekday>, GaError> {
    let mut days = Vec::new();
    for value in values {
        let day: Weekday = value
            .trim()
            .parse()
            .map_err(|_| GaError::invalid_option("--weekdays", value, "weekday names like mon,tue"))?;
        if !days.contains(&day) {
            days.push(day);
        }
    }
    Ok(days)
}

/// Parse "r,g,b" with each channel in 0..=255
pub fn parse_rgb(flag: &str, value: &str) -> Result<Rgb, GaError> {
    let invalid = || GaError::invalid_option(flag, value, "three values 0-255 as r,g,b");
    let parts: Vec<u8> = value
        .split(',')
        .map(|p| p.trim().parse::<u8>())
        .collect::<Result<_, _>>()
        .map_err(|_| invalid())?;
    match parts.as_slice() {
        [r, g, b] => Ok(Rgb(*r, *g, *b)),
        _ => Err(invalid()),
    }
}

fn in_range(flag: &str, value: f64, range: &RangeInclusive<f64>) -> Result<f64, GaError> {
    if range.contains(&value) {
        Ok(value)
    } else {
        let expected = format!("a number between {} and {}", range.start(), range.end());
        Err(GaError::invalid_option(flag, &value.to_string(), &expected))
    }
}

fn percent(flag: &str, value: f64) -> Result<f64, GaError> {
    if (0.0..=100.0).contains(&value) {
        Ok(value)
    } else {
        Err(GaError::invalid_option(flag, &value.to_string(), "a percentage between 0 and 100"))
    }
}

/// Map a refused index to an error that points at `ga list`
fn for_index(index: usize) -> impl Fn(ClientError) -> GaError {
    move |err| match err {
        ClientError::Rejected(message) if message.contains("out of range") => {
            GaError::index_out_of_range(index, message)
        }
        other => other.into(),
    }
}

pub async fn list(client: &DaemonClient, format: OutputFormat) -> Result<(), GaError> {
    let rows: Vec<AlertRow> = client
        .list_alerts()
        .await?
        .into_iter()
        .map(AlertRow::from)
        .collect();

    match format {
        OutputFormat::Text if rows.is_empty() => println!("No alerts"),
        OutputFormat::Text => {
            println!("{}", AlertRow::HEADER);
            output::print_list(&rows, format);
        }
        OutputFormat::Json => output::print_list(&rows, format),
    }
    Ok(())
}

pub async fn add(client: &DaemonClient, args: AddArgs, format: OutputFormat) -> Result<(), GaError> {
    let alert = args.build(chrono::Local::now().naive_local())?;
    let index = client.add_alert(alert).await?;
    output::print_ack(&format!("Added alert {}", index), json!({ "index": index }), format);
    Ok(())
}

pub async fn edit(client: &DaemonClient, args: EditArgs, format: OutputFormat) -> Result<(), GaError> {
    let index = args.index;
    let current = client.get_alert(index).await.map_err(for_index(index))?;
    let alert = args.patch(current)?;
    client
        .edit_alert(index, alert)
        .await
        .map_err(for_index(index))?;
    output::print_ack(&format!("Updated alert {}", index), json!({ "index": index }), format);
    Ok(())
}

pub async fn toggle(
    client: &DaemonClient,
    index: usize,
    enabled: bool,
    format: OutputFormat,
) -> Result<(), GaError> {
    client
        .toggle_alert(index, enabled)
        .await
        .map_err(for_index(index))?;
    let verb = if enabled { "Enabled" } else { "Disabled" };
    output::print_ack(
        &format!("{} alert {}", verb, index),
        json!({ "index": index, "enabled": enabled }),
        format,
    );
    Ok(())
}

pub async fn remove(client: &DaemonClient, index: usize, format: OutputFormat) -> Result<(), GaError> {
    let alert = client.remove_alert(index).await.map_err(for_index(index))?;
    output::print_ack(
        &format!("Removed alert {}: {}", index, alert.label()),
        json!({ "index": index, "alert": alert }),
        format,
    );
    Ok(())
}

pub async fn delay(client: &DaemonClient, minutes: i64, format: OutputFormat) -> Result<(), GaError> {
    let count = client.delay_active(minutes).await?;
    let text = if count == 0 {
        "Nothing showing".to_string()
    } else {
        format!("Delayed {} alert(s) by {} min", count, minutes)
    };
    output::print_ack(&text, json!({ "delayed": count, "minutes": minutes }), format);
    Ok(())
}

pub async fn test(
    client: &DaemonClient,
    index: Option<usize>,
    format: OutputFormat,
) -> Result<(), GaError> {
    match index {
        Some(index) => {
            client.test_alert(index).await.map_err(for_index(index))?;
            output::print_ack(&format!("Showing alert {}", index), json!({ "index": index }), format);
        }
        None => {
            client.test_defaults().await?;
            output::print_ack("Showing default settings", json!({ "index": null }), format);
        }
    }
    Ok(())
}

pub async fn stop(client: &DaemonClient, format: OutputFormat) -> Result<(), GaError> {
    client.stop_alerts().await?;
    output::print_ack("Dismissed alerts on screen", json!({ "dismissed": true }), format);
    Ok(())
}

#[cfg(test)]
#[path = "alert_tests.rs"]
mod tests;
