// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Ordered, index-addressed alert collection

use ga_core::Alert;

/// The configured alerts, in display order.
///
/// An alert's index is its position in the list. Indices stay stable until a
/// removal shifts every later alert down by one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlertStore {
    alerts: Vec<Alert>,
}

impl AlertStore {
    pub fn new(alerts: Vec<Alert>) -> Self {
        Self { alerts }
    }

    pub fn list(&self) -> &[Alert] {
        &self.alerts
    }

    pub fn get(&self, index: usize) -> Option<&Alert> {
        self.alerts.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Alert> {
        self.alerts.get_mut(index)
    }

    /// Replace the alert at `index`, returning the previous one
    pub fn set(&mut self, index: usize, alert: Alert) -> Option<Alert> {
        let slot = self.alerts.get_mut(index)?;
        Some(std::mem::replace(slot, alert))
    }

    /// Add an alert at the end, returning its index
    pub fn append(&mut self, alert: Alert) -> usize {
        self.alerts.push(alert);
        self.alerts.len() - 1
    }

    /// Remove the alert at `index`, shifting later alerts down
    pub fn remove(&mut self, index: usize) -> Option<Alert> {
        if index < self.alerts.len() {
            Some(self.alerts.remove(index))
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.alerts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty()
    }

    pub fn contains(&self, index: usize) -> bool {
        index < self.alerts.len()
    }
}

impl From<Vec<Alert>> for AlertStore {
    fn from(alerts: Vec<Alert>) -> Self {
        Self::new(alerts)
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
