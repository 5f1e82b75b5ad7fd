// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Alert presentation adapters

mod desktop;
mod noop;

pub use desktop::DesktopPresenter;
pub use noop::NoOpPresenter;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakePresenter, PresenterCall};

use async_trait::async_trait;
use ga_core::Alert;
use thiserror::Error;

/// Errors from presentation operations
#[derive(Debug, Error)]
pub enum PresentError {
    #[error("command failed: {0}")]
    CommandFailed(String),
    #[error("presenter unavailable: {0}")]
    Unavailable(String),
}

/// Adapter that puts alerts on screen.
///
/// Nothing a presenter reports affects scheduling, except the list of
/// presentations currently showing, which the snooze flow reads.
#[async_trait]
pub trait Presenter: Clone + Send + Sync + 'static {
    /// Show an alert, returning how many presentations were opened
    async fn present(&self, alert: &Alert) -> Result<usize, PresentError>;

    /// Close every presentation, returning how many were closed
    async fn dismiss_all(&self) -> Result<usize, PresentError>;

    /// One alert snapshot per live presentation
    async fn showing(&self) -> Vec<Alert>;
}
