// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Structured naming for traced effects

/// An operation the executor logs under its own span
pub trait TracedEffect {
    /// Span name, e.g. "present" or "persist_alerts"
    fn name(&self) -> &'static str;

    /// Key-value pairs attached to the "executing" log line
    fn fields(&self) -> Vec<(&'static str, String)>;
}
