// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the scheduling engine

use thiserror::Error;

/// Errors returned by host-facing engine operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("alert index {index} out of range (have {len})")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("delay must be a positive number of minutes, got {0}")]
    InvalidDelay(i64),
}
