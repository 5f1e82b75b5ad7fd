// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Control protocol between `ga` and `gad`.
//!
//! Each message is a 4-byte big-endian length followed by that many bytes of
//! JSON. A connection carries exactly one request and one response.

use chrono::NaiveDateTime;
use ga_core::Alert;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

/// Version reported in the Hello handshake
pub const PROTOCOL_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Read/write timeout used by the daemon
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Largest accepted message body
pub const MAX_MESSAGE_SIZE: usize = 4 * 1024 * 1024;

/// Request from a client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Request {
    Ping,
    Hello { version: String },
    Status,
    ListAlerts,
    AddAlert { alert: Alert },
    EditAlert { index: usize, alert: Alert },
    ToggleAlert { index: usize, enabled: bool },
    RemoveAlert { index: usize },
    /// Snooze everything on screen
    DelayActive { minutes: i64 },
    /// Present an alert now, bypassing its timer
    TestAlert { index: usize },
    /// Present a synthetic alert built from the default settings
    TestDefaults,
    /// Close every alert on screen
    StopAlerts,
    Shutdown,
}

/// Response from the daemon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Response {
    Ok,
    Pong,
    Hello {
        version: String,
    },
    ShuttingDown,
    Error {
        message: String,
    },
    Status {
        uptime_secs: u64,
        alerts: usize,
        enabled: usize,
        armed: usize,
        delayed: usize,
        next_alert: Option<NaiveDateTime>,
    },
    Alerts {
        alerts: Vec<AlertSummary>,
    },
    Added {
        index: usize,
    },
    Removed {
        alert: Alert,
    },
    Delayed {
        count: usize,
    },
}

/// One row of `ListAlerts`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertSummary {
    pub index: usize,
    pub alert: Alert,
    /// Set while the alert is armed
    pub next_trigger: Option<NaiveDateTime>,
}

/// Protocol errors
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("message of {size} bytes exceeds limit of {max}")]
    MessageTooLarge { size: usize, max: usize },
    #[error("timed out")]
    Timeout,
    #[error("connection closed")]
    ConnectionClosed,
}

/// Serialize a message to JSON (no length prefix)
pub fn encode<T: Serialize>(message: &T) -> Result<Vec<u8>, ProtocolError> {
    Ok(serde_json::to_vec(message)?)
}

pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, ProtocolError> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Write one length-prefixed message
pub async fn write_message<W: AsyncWrite + Unpin>(
    writer: &mut W,
    data: &[u8],
) -> Result<(), ProtocolError> {
    if data.len() > MAX_MESSAGE_SIZE {
        return Err(ProtocolError::MessageTooLarge {
            size: data.len(),
            max: MAX_MESSAGE_SIZE,
        });
    }
    let len = data.len() as u32;
    writer.write_all(&len.to_be_bytes()).await?;
    writer.write_all(data).await?;
    writer.flush().await?;
    Ok(())
}

/// Read one length-prefixed message
pub async fn read_message<R: AsyncRead + Unpin>(reader: &mut R) -> Result<Vec<u8>, ProtocolError> {
    let mut prefix = [0u8; 4];
    match reader.read_exact(&mut prefix).await {
        Ok(_) => {}
        Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
            return Err(ProtocolError::ConnectionClosed)
        }
        Err(e) => return Err(e.into()),
    }

    let size = u32::from_be_bytes(prefix) as usize;
    if size > MAX_MESSAGE_SIZE {
        return Err(ProtocolError::MessageTooLarge {
            size,
            max: MAX_MESSAGE_SIZE,
        });
    }

    let mut data = vec![0u8; size];
    reader.read_exact(&mut data).await?;
    Ok(data)
}

/// Read and decode a request, giving up after `timeout`
pub async fn read_request<R: AsyncRead + Unpin>(
    reader: &mut R,
    timeout: Duration,
) -> Result<Request, ProtocolError> {
    let bytes = tokio::time::timeout(timeout, read_message(reader))
        .await
        .map_err(|_| ProtocolError::Timeout)??;
    decode(&bytes)
}

/// Encode and write a response, giving up after `timeout`
pub async fn write_response<W: AsyncWrite + Unpin>(
    writer: &mut W,
    response: &Response,
    timeout: Duration,
) -> Result<(), ProtocolError> {
    let data = encode(response)?;
    tokio::time::timeout(timeout, write_message(writer, &data))
        .await
        .map_err(|_| ProtocolError::Timeout)?
}

#[cfg(test)]
#[path = "protocol_tests.rs"]
mod tests;
