// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Alert storage: the in-memory store and the JSON files behind it

mod config;
mod persister;
mod store;
mod validate;

pub use config::{ConfigDir, ALERTS_FILENAME, APP_DIR_NAME, SETTINGS_FILENAME};
pub use persister::JsonFilePersister;
pub use store::AlertStore;
pub use validate::{parse_color, validate_alert, validate_settings};

use thiserror::Error;

/// Errors from reading or writing config files
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid format: {0}")]
    InvalidFormat(String),
    #[error("could not determine config directory")]
    NoConfigDir,
}
