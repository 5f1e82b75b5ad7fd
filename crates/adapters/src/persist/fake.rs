// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake persister for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{PersistError, Persister};
use async_trait::async_trait;
use ga_core::Alert;
use std::sync::{Arc, Mutex};

/// Fake persister that records every saved list
#[derive(Clone, Default)]
pub struct FakePersister {
    saves: Arc<Mutex<Vec<Vec<Alert>>>>,
    failure: Arc<Mutex<Option<String>>>,
}

impl FakePersister {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following save fail
    pub fn fail_with(&self, message: &str) {
        *self.failure.lock().unwrap_or_else(|e| e.into_inner()) = Some(message.to_string());
    }

    /// Every list passed to `save_alerts`, in order
    pub fn saves(&self) -> Vec<Vec<Alert>> {
        self.saves.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// The most recently saved list
    pub fn last_saved(&self) -> Option<Vec<Alert>> {
        self.saves().pop()
    }
}

#[async_trait]
impl Persister for FakePersister {
    async fn save_alerts(&self, alerts: &[Alert]) -> Result<(), PersistError> {
        if let Some(message) = self.failure.lock().unwrap_or_else(|e| e.into_inner()).clone() {
            return Err(PersistError::Encode(message));
        }
        self.saves
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(alerts.to_vec());
        Ok(())
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
