// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::{PersistError, Persister};
use async_trait::async_trait;
use ga_core::Alert;

/// Persister that keeps nothing
#[derive(Clone, Copy, Debug, Default)]
pub struct NoOpPersister;

impl NoOpPersister {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Persister for NoOpPersister {
    async fn save_alerts(&self, _alerts: &[Alert]) -> Result<(), PersistError> {
        Ok(())
    }
}
