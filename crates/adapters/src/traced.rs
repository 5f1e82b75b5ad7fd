// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced adapter wrappers for consistent observability

use crate::persist::{PersistError, Persister};
use crate::presenter::{PresentError, Presenter};
use async_trait::async_trait;
use ga_core::Alert;
use tracing::Instrument;

/// Wrapper that adds tracing to any Presenter
#[derive(Clone)]
pub struct TracedPresenter<P> {
    inner: P,
}

impl<P> TracedPresenter<P> {
    pub fn new(inner: P) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<P: Presenter> Presenter for TracedPresenter<P> {
    async fn present(&self, alert: &Alert) -> Result<usize, PresentError> {
        let span = tracing::info_span!(
            "presenter.present",
            text = alert.label(),
            display = %alert.presentation.display
        );
        async move {
            let start = std::time::Instant::now();
            let result = self.inner.present(alert).await;
            let elapsed = start.elapsed();

            match &result {
                Ok(opened) => tracing::info!(
                    opened,
                    elapsed_ms = elapsed.as_millis() as u64,
                    "alert shown"
                ),
                Err(e) => tracing::error!(
                    elapsed_ms = elapsed.as_millis() as u64,
                    error = %e,
                    "present failed"
                ),
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn dismiss_all(&self) -> Result<usize, PresentError> {
        let span = tracing::info_span!("presenter.dismiss_all");
        async move {
            let result = self.inner.dismiss_all().await;
            match &result {
                Ok(closed) => tracing::info!(closed, "dismissed"),
                Err(e) => tracing::error!(error = %e, "dismiss failed"),
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn showing(&self) -> Vec<Alert> {
        let showing = self.inner.showing().await;
        tracing::trace!(count = showing.len(), "showing");
        showing
    }
}

/// Wrapper that adds tracing to any Persister
#[derive(Clone)]
pub struct TracedPersister<P> {
    inner: P,
}

impl<P> TracedPersister<P> {
    pub fn new(inner: P) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<P: Persister> Persister for TracedPersister<P> {
    async fn save_alerts(&self, alerts: &[Alert]) -> Result<(), PersistError> {
        let span = tracing::info_span!("persist.save_alerts", count = alerts.len());
        async move {
            let start = std::time::Instant::now();
            let result = self.inner.save_alerts(alerts).await;
            let elapsed = start.elapsed();

            match &result {
                Ok(()) => tracing::debug!(elapsed_ms = elapsed.as_millis() as u64, "saved"),
                // Saves are best effort; the caller carries on
                Err(e) => tracing::warn!(
                    elapsed_ms = elapsed.as_millis() as u64,
                    error = %e,
                    "save failed"
                ),
            }
            result
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
