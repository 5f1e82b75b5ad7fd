// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Next-trigger calculation for recurrence rules
//!
//! Pure functions of `(now, alert)`. A returned instant is never earlier than
//! `now`. When there is no next occurrence, [`NoTrigger`] says why, which lets
//! the engine tell an exhausted one-shot (disabled) apart from a misconfigured
//! rule (left alone).

use crate::alert::{Alert, Recurrence};
use chrono::{Datelike, Days, Months, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Weekday};
use thiserror::Error;

/// Days scanned for a weekly match, today included
const WEEKLY_SEARCH_DAYS: u64 = 8;

/// Months scanned for a monthly match
const MONTHLY_SEARCH_MONTHS: u32 = 25;

/// Why an alert has no next trigger
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NoTrigger {
    #[error("time of day does not parse")]
    InvalidTime,
    #[error("start date does not parse")]
    InvalidDate,
    #[error("one-shot instant is in the past")]
    Passed,
    #[error("no weekdays selected")]
    EmptyWeekdays,
    #[error("day of month {0} is outside 1..=31")]
    DayOfMonthOutOfRange(u32),
    #[error("interval of {0} minutes is not positive")]
    NonPositiveInterval(i64),
    #[error("no occurrence within the search window")]
    Exhausted,
}

impl NoTrigger {
    /// True when the alert can never fire again and should be disabled.
    ///
    /// Only one-shot alerts produce these reasons.
    pub fn disables_alert(&self) -> bool {
        matches!(self, NoTrigger::Passed | NoTrigger::InvalidDate)
    }

    /// True for rule parameters that can never produce a trigger
    pub fn is_misconfiguration(&self) -> bool {
        matches!(
            self,
            NoTrigger::EmptyWeekdays
                | NoTrigger::DayOfMonthOutOfRange(_)
                | NoTrigger::NonPositiveInterval(_)
        )
    }
}

/// The next instant `alert` should fire at, relative to `now`
pub fn next_trigger(now: NaiveDateTime, alert: &Alert) -> Option<NaiveDateTime> {
    resolve(now, alert).ok()
}

/// Like [`next_trigger`], but reports why there is no trigger.
///
/// An unparseable time never triggers. An unparseable start date is replaced
/// by today for repeating rules and is fatal for one-shots.
pub fn resolve(now: NaiveDateTime, alert: &Alert) -> Result<NaiveDateTime, NoTrigger> {
    let time = alert.time_of_day().ok_or(NoTrigger::InvalidTime)?;
    let start = match alert.start_date() {
        Some(date) => date,
        None if alert.is_one_shot() => return Err(NoTrigger::InvalidDate),
        None => now.date(),
    };

    match &alert.recurrence {
        Recurrence::Once => once(now, start, time),
        Recurrence::Daily => daily(now, start, time),
        Recurrence::Weekly { weekdays } => weekly(now, start, time, weekdays),
        Recurrence::Monthly { day_of_month } => monthly(now, start, time, *day_of_month),
        Recurrence::Interval { interval_minutes } => {
            interval(now, start, time, *interval_minutes)
        }
    }
}

fn once(now: NaiveDateTime, start: NaiveDate, time: NaiveTime) -> Result<NaiveDateTime, NoTrigger> {
    let at = start.and_time(time);
    if at >= now {
        Ok(at)
    } else {
        Err(NoTrigger::Passed)
    }
}

fn daily(now: NaiveDateTime, start: NaiveDate, time: NaiveTime) -> Result<NaiveDateTime, NoTrigger> {
    let from = start.max(now.date());
    let at = from.and_time(time);
    if at >= now {
        return Ok(at);
    }
    from.succ_opt()
        .map(|next| next.and_time(time))
        .ok_or(NoTrigger::Exhausted)
}

fn weekly(
    now: NaiveDateTime,
    start: NaiveDate,
    time: NaiveTime,
    weekdays: &[Weekday],
) -> Result<NaiveDateTime, NoTrigger> {
    if weekdays.is_empty() {
        return Err(NoTrigger::EmptyWeekdays);
    }
    let from = start.max(now.date());
    (0..WEEKLY_SEARCH_DAYS)
        .filter_map(|offset| from.checked_add_days(Days::new(offset)))
        .filter(|date| weekdays.contains(&date.weekday()) && *date >= start)
        .map(|date| date.and_time(time))
        .find(|at| *at >= now)
        .ok_or(NoTrigger::Exhausted)
}

fn monthly(
    now: NaiveDateTime,
    start: NaiveDate,
    time: NaiveTime,
    day_of_month: u32,
) -> Result<NaiveDateTime, NoTrigger> {
    if !(1..=31).contains(&day_of_month) {
        return Err(NoTrigger::DayOfMonthOutOfRange(day_of_month));
    }
    let from = start.max(now.date());
    let mut month = first_of_month(from).ok_or(NoTrigger::Exhausted)?;

    for _ in 0..MONTHLY_SEARCH_MONTHS {
        let next_month = month.checked_add_months(Months::new(1));
        // 31 in a 28-day month lands on the 28th
        let last_day = next_month
            .and_then(|n| n.pred_opt())
            .map(|d| d.day())
            .unwrap_or(31);
        if let Some(date) = month.with_day(day_of_month.min(last_day)) {
            let at = date.and_time(time);
            if date >= start && at >= now {
                return Ok(at);
            }
        }
        match next_month {
            Some(next) => month = next,
            None => break,
        }
    }
    Err(NoTrigger::Exhausted)
}

fn interval(
    now: NaiveDateTime,
    start: NaiveDate,
    time: NaiveTime,
    interval_minutes: i64,
) -> Result<NaiveDateTime, NoTrigger> {
    if interval_minutes <= 0 {
        return Err(NoTrigger::NonPositiveInterval(interval_minutes));
    }
    let anchor = start.and_time(time);
    if anchor >= now {
        return Ok(anchor);
    }

    // Grid is anchored at the start instant, never at `now`
    let step = TimeDelta::try_minutes(interval_minutes).ok_or(NoTrigger::Exhausted)?;
    let elapsed = (now - anchor).num_milliseconds() / step.num_milliseconds();
    let offset = interval_minutes
        .checked_mul(elapsed + 1)
        .and_then(TimeDelta::try_minutes)
        .ok_or(NoTrigger::Exhausted)?;
    anchor
        .checked_add_signed(offset)
        .ok_or(NoTrigger::Exhausted)
}

fn first_of_month(date: NaiveDate) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1)
}

#[cfg(test)]
#[path = "recurrence_tests.rs"]
mod tests;
