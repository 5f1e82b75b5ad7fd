// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scheduling engine: one timer per enabled alert, plus snoozed copies
//!
//! Every operation commits its changes to the store and the timer table before
//! returning, and hands back the [`Effect`]s it implies. Presenting and saving
//! happen afterwards, in the executor.
//!
//! A slot moves between three states. `Unscheduled` has no registry entry.
//! `Armed(fires_at)` has one regular entry and one scheduler deadline. While a
//! fired timer is being handled its entry has already been taken, which is
//! the fired-pending-reschedule state; it ends in either `Armed` or
//! `Unscheduled` before `poll` returns.

use crate::error::EngineError;
use crate::registry::{TimerEntry, TimerRegistry};
use crate::scheduler::{Scheduler, TimerKey};
use chrono::{NaiveDateTime, TimeDelta};
use ga_core::{recurrence, Alert, Clock, Effect, NoTrigger, Settings};
use ga_storage::AlertStore;

/// Longest single timer delay: a signed 32-bit millisecond count (~24.8 days)
pub const DEFAULT_TIMER_CEILING_MS: i64 = i32::MAX as i64;

/// Externally visible state of an alert slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotState {
    Unscheduled,
    Armed(NaiveDateTime),
}

/// Owns the alert store and every live timer
pub struct SchedulingEngine<C: Clock> {
    store: AlertStore,
    registry: TimerRegistry,
    scheduler: Scheduler,
    clock: C,
    timer_ceiling: TimeDelta,
}

impl<C: Clock> SchedulingEngine<C> {
    /// Create an engine over `alerts`. Nothing is armed until [`initialize`](Self::initialize).
    pub fn new(alerts: Vec<Alert>, clock: C) -> Self {
        Self {
            store: AlertStore::new(alerts),
            registry: TimerRegistry::new(),
            scheduler: Scheduler::new(),
            clock,
            timer_ceiling: TimeDelta::milliseconds(DEFAULT_TIMER_CEILING_MS),
        }
    }

    /// Override the longest single timer delay
    pub fn with_timer_ceiling(mut self, ceiling: TimeDelta) -> Self {
        self.timer_ceiling = ceiling.max(TimeDelta::milliseconds(1));
        self
    }

    /// Arm every enabled alert
    pub fn initialize(&mut self) -> Vec<Effect> {
        let now = self.clock.now();
        let mut effects = Vec::new();
        for index in 0..self.store.len() {
            effects.extend(self.arm(index, now));
        }
        tracing::info!(
            alerts = self.store.len(),
            armed = self.registry.regular_count(),
            delayed = self.registry.ephemeral_count(),
            "scheduler initialized"
        );
        collapse_persists(effects)
    }

    /// Append an alert and arm it, returning its index
    pub fn add_alert(&mut self, alert: Alert) -> (usize, Vec<Effect>) {
        let now = self.clock.now();
        let index = self.store.append(alert);
        tracing::info!(index, "alert added");
        let mut effects = self.arm(index, now);
        effects.push(self.persist());
        (index, collapse_persists(effects))
    }

    /// Replace the alert at `index` and re-arm it
    pub fn edit_alert(&mut self, index: usize, alert: Alert) -> Result<Vec<Effect>, EngineError> {
        self.check_index(index)?;
        let now = self.clock.now();
        self.store.set(index, alert);
        tracing::info!(index, "alert edited");
        let mut effects = self.arm(index, now);
        effects.push(self.persist());
        Ok(collapse_persists(effects))
    }

    /// Enable or disable the alert at `index`; only `enabled` changes
    pub fn toggle_alert(&mut self, index: usize, enabled: bool) -> Result<Vec<Effect>, EngineError> {
        self.check_index(index)?;
        let now = self.clock.now();
        if let Some(alert) = self.store.get_mut(index) {
            alert.enabled = enabled;
        }
        tracing::info!(index, enabled, "alert toggled");
        let mut effects = if enabled {
            self.arm(index, now)
        } else {
            self.disarm(index);
            Vec::new()
        };
        effects.push(self.persist());
        Ok(collapse_persists(effects))
    }

    /// Remove the alert at `index`, renumbering the timers above it
    pub fn remove_alert(&mut self, index: usize) -> Result<(Alert, Vec<Effect>), EngineError> {
        self.check_index(index)?;
        let now = self.clock.now();

        // Timers at and above the removal point belong to positions that shift
        for i in index..self.store.len() {
            self.disarm(i);
        }
        let removed = self
            .store
            .remove(index)
            .ok_or(EngineError::IndexOutOfRange {
                index,
                len: self.store.len(),
            })?;
        tracing::info!(index, text = removed.label(), "alert removed");

        let mut effects = Vec::new();
        for i in index..self.store.len() {
            effects.extend(self.arm(i, now));
        }
        effects.push(self.persist());
        Ok((removed, collapse_persists(effects)))
    }

    /// Snooze whatever is on screen for `minutes`.
    ///
    /// `showing` holds one snapshot per live presentation; identical snapshots
    /// (the same alert on several screens) are delayed once. Returns the
    /// number of alerts delayed.
    pub fn delay_active(
        &mut self,
        minutes: i64,
        showing: &[Alert],
    ) -> Result<(usize, Vec<Effect>), EngineError> {
        let delay = TimeDelta::try_minutes(minutes)
            .filter(|d| *d > TimeDelta::zero())
            .ok_or(EngineError::InvalidDelay(minutes))?;

        let mut unique: Vec<&Alert> = Vec::new();
        for alert in showing {
            if !unique.contains(&alert) {
                unique.push(alert);
            }
        }
        if unique.is_empty() {
            tracing::info!("nothing showing, nothing to delay");
            return Ok((0, Vec::new()));
        }

        let now = self.clock.now();
        let fires_at = now
            .checked_add_signed(delay)
            .ok_or(EngineError::InvalidDelay(minutes))?;
        for alert in &unique {
            let entry = TimerEntry {
                fires_at,
                snapshot: alert.snoozed_until(fires_at),
            };
            let id = self.registry.insert_ephemeral(entry.clone());
            self.schedule(TimerKey::Ephemeral(id), &entry, now);
        }
        tracing::info!(
            count = unique.len(),
            minutes,
            fires_at = %fires_at,
            pending = self.registry.ephemeral_count(),
            "delayed active alerts"
        );
        Ok((unique.len(), vec![Effect::DismissPresentations]))
    }

    /// Present the alert at `index` as it is now, bypassing its timer
    pub fn test_alert(&self, index: usize) -> Result<Vec<Effect>, EngineError> {
        self.check_index(index)?;
        let alert = self.store.get(index).cloned().ok_or(EngineError::IndexOutOfRange {
            index,
            len: self.store.len(),
        })?;
        tracing::info!(index, text = alert.label(), "testing alert");
        Ok(vec![Effect::Present { alert }])
    }

    /// Present a synthetic alert built from the global defaults
    pub fn test_defaults(&self, settings: &Settings) -> Vec<Effect> {
        tracing::info!("testing default settings");
        vec![Effect::Present {
            alert: settings.test_alert(self.clock.now()),
        }]
    }

    /// Handle every timer due at `now`, in deadline order
    pub fn poll(&mut self, now: NaiveDateTime) -> Vec<Effect> {
        let mut effects = Vec::new();
        for key in self.scheduler.fired_timers(now) {
            match key {
                TimerKey::Alert(index) => effects.extend(self.fire(index, now)),
                TimerKey::Ephemeral(id) => effects.extend(self.fire_ephemeral(id, now)),
            }
        }
        collapse_persists(effects)
    }

    pub fn next_deadline(&self) -> Option<NaiveDateTime> {
        self.scheduler.next_deadline()
    }

    /// Cancel every regular and ephemeral timer, returning how many were live
    pub fn shutdown(&mut self) -> usize {
        let cancelled = self.scheduler.clear();
        self.registry.clear();
        tracing::info!(cancelled, "all timers cancelled");
        cancelled
    }

    pub fn alerts(&self) -> &[Alert] {
        self.store.list()
    }

    /// Armed alert indices with their next occurrence, ascending by index
    pub fn armed(&self) -> Vec<(usize, NaiveDateTime)> {
        self.registry
            .regular_entries()
            .map(|(index, entry)| (index, entry.fires_at))
            .collect()
    }

    /// Snoozed copies waiting to fire, earliest first
    pub fn delayed(&self) -> Vec<(NaiveDateTime, Alert)> {
        let mut delayed: Vec<(NaiveDateTime, Alert)> = self
            .registry
            .ephemeral_entries()
            .map(|(_, entry)| (entry.fires_at, entry.snapshot.clone()))
            .collect();
        delayed.sort_by_key(|(at, _)| *at);
        delayed
    }

    pub fn slot_state(&self, index: usize) -> SlotState {
        match self.registry.regular(index) {
            Some(entry) => SlotState::Armed(entry.fires_at),
            None => SlotState::Unscheduled,
        }
    }

    /// Frozen snapshot taken when `index` was last armed
    pub fn armed_snapshot(&self, index: usize) -> Option<&Alert> {
        self.registry.regular(index).map(|e| &e.snapshot)
    }

    pub fn now(&self) -> NaiveDateTime {
        self.clock.now()
    }

    // -- transitions ---------------------------------------------------------

    /// Compute and install the timer for `index` from `now`
    fn arm(&mut self, index: usize, now: NaiveDateTime) -> Vec<Effect> {
        self.arm_from(index, now, now)
    }

    /// Arm `index` for its first occurrence at or after `not_before`
    fn arm_from(&mut self, index: usize, now: NaiveDateTime, not_before: NaiveDateTime) -> Vec<Effect> {
        self.disarm(index);

        let Some(alert) = self.store.get(index) else {
            tracing::warn!(index, "arm skipped, no alert at index");
            return Vec::new();
        };
        if !alert.enabled {
            tracing::debug!(index, "alert disabled, not arming");
            return Vec::new();
        }

        let fires_at = match recurrence::resolve(not_before, alert) {
            Ok(at) => at,
            Err(reason) if reason.disables_alert() => {
                tracing::info!(index, text = alert.label(), %reason, "one-shot alert cannot fire again, disabling");
                return self.disable(index);
            }
            Err(reason) => {
                log_no_trigger(index, alert, &reason);
                return Vec::new();
            }
        };

        if fires_at < now {
            tracing::error!(index, fires_at = %fires_at, now = %now, "negative delay, not arming");
            return Vec::new();
        }

        let entry = TimerEntry {
            fires_at,
            snapshot: alert.clone(),
        };
        self.schedule(TimerKey::Alert(index), &entry, now);
        self.registry.insert_regular(index, entry);
        tracing::info!(index, fires_at = %fires_at, "armed");
        Vec::new()
    }

    /// Handle a fired regular timer
    fn fire(&mut self, index: usize, now: NaiveDateTime) -> Vec<Effect> {
        let Some(entry) = self.registry.take_regular(index) else {
            tracing::warn!(index, "fired timer has no entry, discarding");
            return Vec::new();
        };
        // Decide from the live record, never from the snapshot
        let Some(alert) = self.store.get(index).cloned() else {
            tracing::info!(index, "alert removed since arming, discarding");
            return Vec::new();
        };
        if !alert.enabled {
            tracing::info!(index, "alert disabled since arming, discarding");
            return Vec::new();
        }
        if entry.is_wake(now) {
            tracing::debug!(index, fires_at = %entry.fires_at, "ceiling wake, re-arming");
            return self.arm(index, now);
        }

        tracing::info!(index, text = alert.label(), "alert fired");
        let one_shot = alert.is_one_shot();
        let mut effects = vec![Effect::Present { alert }];
        if one_shot {
            effects.extend(self.disable(index));
        } else {
            // Strictly after the fired occurrence so it is never presented twice
            let not_before = now.max(entry.fires_at) + TimeDelta::milliseconds(1);
            effects.extend(self.arm_from(index, now, not_before));
        }
        effects
    }

    /// Handle a fired snoozed copy
    fn fire_ephemeral(&mut self, id: u64, now: NaiveDateTime) -> Vec<Effect> {
        let Some(entry) = self.registry.take_ephemeral(id) else {
            tracing::warn!(id, "fired snooze has no entry, discarding");
            return Vec::new();
        };
        if entry.is_wake(now) {
            tracing::debug!(id, fires_at = %entry.fires_at, "ceiling wake, rescheduling snooze");
            self.schedule(TimerKey::Ephemeral(id), &entry, now);
            self.registry.restore_ephemeral(id, entry);
            return Vec::new();
        }
        tracing::info!(id, text = entry.snapshot.label(), "delayed alert fired");
        vec![Effect::Present {
            alert: entry.snapshot,
        }]
    }

    /// Cancel the timer for `index`, if any
    fn disarm(&mut self, index: usize) {
        let had_timer = self.scheduler.cancel_timer(TimerKey::Alert(index));
        if self.registry.take_regular(index).is_some() || had_timer {
            tracing::debug!(index, "disarmed");
        }
    }

    fn disable(&mut self, index: usize) -> Vec<Effect> {
        self.disarm(index);
        match self.store.get_mut(index) {
            Some(alert) if alert.enabled => {
                alert.enabled = false;
                tracing::info!(index, "alert disabled");
                vec![self.persist()]
            }
            _ => Vec::new(),
        }
    }

    /// Install a scheduler deadline, capped at the timer ceiling
    fn schedule(&mut self, key: TimerKey, entry: &TimerEntry, now: NaiveDateTime) {
        let delay = (entry.fires_at - now).max(TimeDelta::zero());
        if delay > self.timer_ceiling {
            tracing::debug!(%key, fires_at = %entry.fires_at, "delay exceeds timer ceiling, scheduling wake");
            self.scheduler.set_timer(key, self.timer_ceiling, now);
        } else {
            self.scheduler.set_timer(key, delay, now);
        }
    }

    fn persist(&self) -> Effect {
        Effect::PersistAlerts {
            alerts: self.store.list().to_vec(),
        }
    }

    fn check_index(&self, index: usize) -> Result<(), EngineError> {
        if self.store.contains(index) {
            Ok(())
        } else {
            Err(EngineError::IndexOutOfRange {
                index,
                len: self.store.len(),
            })
        }
    }
}

fn log_no_trigger(index: usize, alert: &Alert, reason: &NoTrigger) {
    if reason.is_misconfiguration() {
        tracing::warn!(index, text = alert.label(), %reason, "alert misconfigured, left enabled but unscheduled");
    } else {
        tracing::warn!(index, text = alert.label(), %reason, "no next occurrence");
    }
}

/// Keep only the last save: every save writes the whole list
fn collapse_persists(effects: Vec<Effect>) -> Vec<Effect> {
    let Some(last) = effects
        .iter()
        .rposition(|e| matches!(e, Effect::PersistAlerts { .. }))
    else {
        return effects;
    };
    effects
        .into_iter()
        .enumerate()
        .filter(|(i, e)| *i == last || !matches!(e, Effect::PersistAlerts { .. }))
        .map(|(_, e)| e)
        .collect()
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
