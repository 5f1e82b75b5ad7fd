// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! No-op presenter for headless runs.

use super::{PresentError, Presenter};
use async_trait::async_trait;
use ga_core::Alert;

/// Presenter that shows nothing.
///
/// Used when the daemon runs without a desktop session.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoOpPresenter;

impl NoOpPresenter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Presenter for NoOpPresenter {
    async fn present(&self, _alert: &Alert) -> Result<usize, PresentError> {
        Ok(0)
    }

    async fn dismiss_all(&self) -> Result<usize, PresentError> {
        Ok(0)
    }

    async fn showing(&self) -> Vec<Alert> {
        Vec::new()
    }
}
