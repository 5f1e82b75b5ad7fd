// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Alert list persistence adapters

mod noop;

pub use noop::NoOpPersister;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::FakePersister;

use async_trait::async_trait;
use ga_core::Alert;
use thiserror::Error;

/// Errors from persistence operations
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("encode error: {0}")]
    Encode(String),
}

/// Adapter that saves the alert list after a mutation.
///
/// Saves are best effort: callers log failures and carry on.
#[async_trait]
pub trait Persister: Clone + Send + Sync + 'static {
    async fn save_alerts(&self, alerts: &[Alert]) -> Result<(), PersistError>;
}
