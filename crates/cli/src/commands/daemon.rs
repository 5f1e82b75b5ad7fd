// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon commands that must work whether or not gad is running

use serde_json::json;

use crate::client::{self, ClientError, DaemonClient};
use crate::error::GaError;
use crate::output::{self, OutputFormat, StatusReport};

/// Report daemon state without starting it
pub async fn status(format: OutputFormat) -> Result<(), GaError> {
    let client = match DaemonClient::connect() {
        Ok(client) => client,
        Err(ClientError::DaemonNotRunning) => {
            output::print(&StatusReport::not_running(), format);
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    match client.status().await {
        Ok(status) => output::print(&StatusReport::from(status), format),
        // Socket left behind by a daemon that is gone
        Err(ClientError::Io(_)) => output::print(&StatusReport::not_running(), format),
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

pub async fn shutdown(format: OutputFormat) -> Result<(), GaError> {
    let stopped = client::daemon_stop().await?;
    let text = if stopped {
        "Daemon stopped"
    } else {
        "Daemon not running"
    };
    output::print_ack(text, json!({ "stopped": stopped }), format);
    Ok(())
}
