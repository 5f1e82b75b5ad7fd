// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Live timer entries, regular and ephemeral

use chrono::NaiveDateTime;
use ga_core::Alert;
use std::collections::{BTreeMap, HashMap};

/// What a live timer is waiting for.
///
/// `fires_at` is the real occurrence. The scheduler deadline may be earlier
/// when the delay exceeds the timer ceiling, in which case the timer is a wake.
#[derive(Debug, Clone, PartialEq)]
pub struct TimerEntry {
    pub fires_at: NaiveDateTime,
    /// Alert as it looked when armed; never used to decide rescheduling
    pub snapshot: Alert,
}

impl TimerEntry {
    /// True when the timer fired before its occurrence (a ceiling wake)
    pub fn is_wake(&self, now: NaiveDateTime) -> bool {
        self.fires_at > now
    }
}

/// Alert index → regular timer entry, plus snoozed entries with no index
#[derive(Debug, Default)]
pub struct TimerRegistry {
    regular: BTreeMap<usize, TimerEntry>,
    ephemeral: HashMap<u64, TimerEntry>,
    next_ephemeral: u64,
}

impl TimerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_regular(&mut self, index: usize, entry: TimerEntry) {
        self.regular.insert(index, entry);
    }

    pub fn take_regular(&mut self, index: usize) -> Option<TimerEntry> {
        self.regular.remove(&index)
    }

    pub fn regular(&self, index: usize) -> Option<&TimerEntry> {
        self.regular.get(&index)
    }

    /// Armed indices in ascending order
    pub fn regular_entries(&self) -> impl Iterator<Item = (usize, &TimerEntry)> {
        self.regular.iter().map(|(i, e)| (*i, e))
    }

    /// Store a snoozed entry under a fresh id
    pub fn insert_ephemeral(&mut self, entry: TimerEntry) -> u64 {
        let id = self.next_ephemeral;
        self.next_ephemeral += 1;
        self.ephemeral.insert(id, entry);
        id
    }

    /// Put back an entry taken for a wake, keeping its id
    pub fn restore_ephemeral(&mut self, id: u64, entry: TimerEntry) {
        self.ephemeral.insert(id, entry);
    }

    pub fn take_ephemeral(&mut self, id: u64) -> Option<TimerEntry> {
        self.ephemeral.remove(&id)
    }

    pub fn ephemeral_entries(&self) -> impl Iterator<Item = (u64, &TimerEntry)> {
        self.ephemeral.iter().map(|(id, e)| (*id, e))
    }

    pub fn regular_count(&self) -> usize {
        self.regular.len()
    }

    pub fn ephemeral_count(&self) -> usize {
        self.ephemeral.len()
    }

    pub fn clear(&mut self) {
        self.regular.clear();
        self.ephemeral.clear();
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
