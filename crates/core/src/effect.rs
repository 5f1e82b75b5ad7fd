// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Side effects requested by scheduling transitions
//!
//! The engine commits each transition in memory and hands back the effects it
//! implies. The executor performs them afterwards, so a slow or failing
//! presenter or persister never leaves the timer table half-updated.

use crate::alert::Alert;
use crate::traced::TracedEffect;

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Show an alert with its current presentation parameters
    Present { alert: Alert },
    /// Close every overlay currently on screen
    DismissPresentations,
    /// Save the alert list (best effort)
    PersistAlerts { alerts: Vec<Alert> },
}

impl TracedEffect for Effect {
    fn name(&self) -> &'static str {
        match self {
            Effect::Present { .. } => "present",
            Effect::DismissPresentations => "dismiss_presentations",
            Effect::PersistAlerts { .. } => "persist_alerts",
        }
    }

    fn fields(&self) -> Vec<(&'static str, String)> {
        match self {
            Effect::Present { alert } => vec![
                ("text", alert.label().to_string()),
                ("display", alert.presentation.display.to_string()),
            ],
            Effect::DismissPresentations => vec![],
            Effect::PersistAlerts { alerts } => vec![("count", alerts.len().to_string())],
        }
    }
}

#[cfg(test)]
#[path = "effect_tests.rs"]
mod tests;
