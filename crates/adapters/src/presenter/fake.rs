// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake presenter for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{PresentError, Presenter};
use async_trait::async_trait;
use ga_core::{Alert, Display};
use std::sync::{Arc, Mutex};

/// Recorded presenter call
#[derive(Debug, Clone, PartialEq)]
pub enum PresenterCall {
    Present { alert: Alert },
    DismissAll,
}

#[derive(Default)]
struct FakeState {
    calls: Vec<PresenterCall>,
    showing: Vec<Alert>,
    screens: usize,
    failure: Option<String>,
}

/// Fake presenter for testing.
///
/// Keeps one entry per screen in its showing list, so `Display::All` alerts
/// appear several times when more than one screen is configured.
#[derive(Clone, Default)]
pub struct FakePresenter {
    inner: Arc<Mutex<FakeState>>,
}

impl FakePresenter {
    pub fn new() -> Self {
        Self::with_screens(1)
    }

    pub fn with_screens(screens: usize) -> Self {
        let presenter = Self::default();
        presenter.lock().screens = screens.max(1);
        presenter
    }

    /// Make every following call fail with `message`
    pub fn fail_with(&self, message: &str) {
        self.lock().failure = Some(message.to_string());
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<PresenterCall> {
        self.lock().calls.clone()
    }

    /// Alerts passed to `present`, in order
    pub fn presented(&self) -> Vec<Alert> {
        self.lock()
            .calls
            .iter()
            .filter_map(|c| match c {
                PresenterCall::Present { alert } => Some(alert.clone()),
                PresenterCall::DismissAll => None,
            })
            .collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FakeState> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl Presenter for FakePresenter {
    async fn present(&self, alert: &Alert) -> Result<usize, PresentError> {
        let mut state = self.lock();
        state.calls.push(PresenterCall::Present {
            alert: alert.clone(),
        });
        if let Some(message) = &state.failure {
            return Err(PresentError::CommandFailed(message.clone()));
        }
        let copies = match alert.presentation.display {
            Display::Main => 1,
            Display::All => state.screens.max(1),
        };
        for _ in 0..copies {
            state.showing.push(alert.clone());
        }
        Ok(copies)
    }

    async fn dismiss_all(&self) -> Result<usize, PresentError> {
        let mut state = self.lock();
        state.calls.push(PresenterCall::DismissAll);
        if let Some(message) = &state.failure {
            return Err(PresentError::CommandFailed(message.clone()));
        }
        let closed = state.showing.len();
        state.showing.clear();
        Ok(closed)
    }

    async fn showing(&self) -> Vec<Alert> {
        self.lock().showing.clone()
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
