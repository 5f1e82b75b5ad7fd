// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Deadline table backing every alert timer

use chrono::{NaiveDateTime, TimeDelta};
use std::collections::HashMap;
use std::fmt;

/// Address of a single-shot timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TimerKey {
    /// Regular timer for the alert at this store index
    Alert(usize),
    /// Snoozed copy with no owning index
    Ephemeral(u64),
}

impl fmt::Display for TimerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimerKey::Alert(index) => write!(f, "alert:{}", index),
            TimerKey::Ephemeral(id) => write!(f, "ephemeral:{}", id),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Deadline {
    fire_at: NaiveDateTime,
    /// Registration order, breaks ties between equal deadlines
    seq: u64,
}

/// Single-shot timers keyed by [`TimerKey`].
///
/// Setting a key that already exists replaces its deadline.
#[derive(Debug, Default)]
pub struct Scheduler {
    timers: HashMap<TimerKey, Deadline>,
    next_seq: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm `key` to fire `delay` after `now`, returning the deadline
    pub fn set_timer(&mut self, key: TimerKey, delay: TimeDelta, now: NaiveDateTime) -> NaiveDateTime {
        let fire_at = now.checked_add_signed(delay).unwrap_or(NaiveDateTime::MAX);
        let seq = self.next_seq;
        self.next_seq += 1;
        self.timers.insert(key, Deadline { fire_at, seq });
        fire_at
    }

    /// Returns true if a timer was pending for `key`
    pub fn cancel_timer(&mut self, key: TimerKey) -> bool {
        self.timers.remove(&key).is_some()
    }

    /// Remove and return every timer due at `now`, earliest first
    pub fn fired_timers(&mut self, now: NaiveDateTime) -> Vec<TimerKey> {
        let mut due: Vec<(TimerKey, Deadline)> = self
            .timers
            .iter()
            .filter(|(_, d)| d.fire_at <= now)
            .map(|(k, d)| (*k, *d))
            .collect();
        due.sort_by_key(|(_, d)| (d.fire_at, d.seq));

        for (key, _) in &due {
            self.timers.remove(key);
        }
        due.into_iter().map(|(key, _)| key).collect()
    }

    pub fn next_deadline(&self) -> Option<NaiveDateTime> {
        self.timers.values().map(|d| d.fire_at).min()
    }

    pub fn has_timers(&self) -> bool {
        !self.timers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Cancel everything, returning how many timers were pending
    pub fn clear(&mut self) -> usize {
        let pending = self.timers.len();
        self.timers.clear();
        pending
    }
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod tests;
