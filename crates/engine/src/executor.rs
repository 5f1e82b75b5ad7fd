// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Effect executor

use ga_adapters::{PersistError, Persister, PresentError, Presenter};
use ga_core::{Alert, Effect, TracedEffect};
use thiserror::Error;
use tracing::Instrument;

/// Errors that can occur during effect execution
#[derive(Debug, Error)]
pub enum ExecuteError {
    #[error("present error: {0}")]
    Present(#[from] PresentError),
    #[error("persist error: {0}")]
    Persist(#[from] PersistError),
}

/// Executes effects using the configured adapters
pub struct Executor<P, S> {
    presenter: P,
    persister: S,
}

impl<P, S> Executor<P, S>
where
    P: Presenter,
    S: Persister,
{
    pub fn new(presenter: P, persister: S) -> Self {
        Self {
            presenter,
            persister,
        }
    }

    /// Execute a single effect with tracing
    pub async fn execute(&self, effect: Effect) -> Result<(), ExecuteError> {
        let span = tracing::info_span!("effect", effect = effect.name());
        async move {
            tracing::info!(fields = ?effect.fields(), "executing");

            let start = std::time::Instant::now();
            let result = self.execute_inner(effect).await;
            let elapsed_ms = start.elapsed().as_millis() as u64;

            match &result {
                Ok(()) => tracing::info!(elapsed_ms, "completed"),
                Err(e) => tracing::error!(elapsed_ms, error = %e, "failed"),
            }
            result
        }
        .instrument(span)
        .await
    }

    /// Execute effects in order. A failure is logged and the rest still run.
    pub async fn execute_all(&self, effects: Vec<Effect>) -> usize {
        let mut failed = 0;
        for effect in effects {
            if self.execute(effect).await.is_err() {
                failed += 1;
            }
        }
        failed
    }

    /// Snapshots of the presentations currently on screen
    pub async fn showing(&self) -> Vec<Alert> {
        self.presenter.showing().await
    }

    async fn execute_inner(&self, effect: Effect) -> Result<(), ExecuteError> {
        match effect {
            Effect::Present { alert } => {
                self.presenter.present(&alert).await?;
            }
            Effect::DismissPresentations => {
                self.presenter.dismiss_all().await?;
            }
            Effect::PersistAlerts { alerts } => {
                self.persister.save_alerts(&alerts).await?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "executor_tests.rs"]
mod tests;
