// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! User-friendly error display with context and suggestions.
//!
//! Each error carries what went wrong, why it might have happened, and how
//! to fix it.

use std::fmt;

use crate::client::ClientError;

/// Error with context and recovery suggestions for user-friendly display.
#[derive(Debug)]
pub struct GaError {
    /// What went wrong
    pub message: String,
    /// Why it might have happened
    pub context: Vec<String>,
    /// How to fix it
    pub suggestions: Vec<String>,
    /// Original error if any
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl GaError {
    /// Create a new error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: Vec::new(),
            suggestions: Vec::new(),
            source: None,
        }
    }

    /// Add context about why this error might have happened.
    pub fn with_context(mut self, ctx: impl Into<String>) -> Self {
        self.context.push(ctx.into());
        self
    }

    /// Add a suggestion for how to fix this error.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    /// Set the source error that caused this error.
    pub fn with_source<E: std::error::Error + Send + Sync + 'static>(mut self, source: E) -> Self {
        self.source = Some(Box::new(source));
        self
    }
}

impl fmt::Display for GaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "error: {}", self.message)?;

        if !self.context.is_empty() {
            writeln!(f)?;
            for ctx in &self.context {
                writeln!(f, "  -> {}", ctx)?;
            }
        }

        if !self.suggestions.is_empty() {
            writeln!(f)?;
            writeln!(f, "suggestions:")?;
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                writeln!(f, "  {}. {}", i + 1, suggestion)?;
            }
        }

        Ok(())
    }
}

impl std::error::Error for GaError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Common error builders for typical failure scenarios.
impl GaError {
    /// An option value the CLI could not make sense of.
    pub fn invalid_option(flag: &str, value: &str, expected: &str) -> Self {
        GaError::new(format!("invalid value '{}' for {}", value, flag))
            .with_context(format!("expected {}", expected))
    }

    /// The daemon could not be reached or started.
    pub fn daemon_unavailable(err: ClientError) -> Self {
        let base = GaError::new(err.to_string());
        match err {
            ClientError::DaemonStartFailed(_) | ClientError::DaemonStartTimeout => base
                .with_context("gad exited or never opened its socket")
                .with_suggestion("Check the daemon log under $XDG_STATE_HOME/ga/daemon.log")
                .with_suggestion("Set GA_DAEMON_BINARY if gad is not next to ga or on PATH"),
            ClientError::Protocol(_) | ClientError::Io(_) => base
                .with_context("A stale socket may be left over from a crashed daemon")
                .with_suggestion("Restart the daemon: ga shutdown, then rerun the command")
                .with_source(err),
            ClientError::Rejected(_) => base,
            _ => base.with_source(err),
        }
    }

    /// The daemon refused an index.
    pub fn index_out_of_range(index: usize, message: String) -> Self {
        GaError::new(message)
            .with_context(format!("no alert at index {}", index))
            .with_suggestion("List alerts and their indices: ga list")
    }
}

impl From<ClientError> for GaError {
    fn from(err: ClientError) -> Self {
        GaError::daemon_unavailable(err)
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
