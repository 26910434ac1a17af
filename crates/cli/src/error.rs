// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! User-friendly error display with context and suggestions.
//!
//! A rejected request is shown as:
//! - What went wrong (message)
//! - Why it might have happened (context)
//! - How to fix it (suggestions)

use std::fmt;

use rp_engine::ErrorKind;

/// Error with context and recovery suggestions for user-friendly display.
#[derive(Debug)]
pub struct RpError {
    /// What went wrong
    pub message: String,
    /// Why it might have happened
    pub context: Vec<String>,
    /// How to fix it
    pub suggestions: Vec<String>,
}

impl RpError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    pub fn with_context(mut self, ctx: impl Into<String>) -> Self {
        self.context.push(ctx.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    /// Explain a request the daemon refused
    pub fn rejected(kind: ErrorKind, message: &str) -> Self {
        let err = RpError::new(message);
        match kind {
            ErrorKind::NotFound => err
                .with_suggestion("List radios: rp asset list")
                .with_suggestion("List people: rp person list"),
            ErrorKind::Validation => err.with_context("The request was incomplete or malformed"),
            ErrorKind::Busy => err
                .with_context("A radio is either available, on loan, or in maintenance")
                .with_suggestion("Check the radio: rp asset show <CODE>"),
            ErrorKind::AlreadyClosed => {
                err.with_context("Closed episodes cannot be closed again")
            }
            ErrorKind::Conflict => err
                .with_context("Records referenced by history or by other records are kept")
                .with_suggestion("Edit the record instead of deleting it"),
            ErrorKind::Generation => err.with_context("Codes are never reused"),
            ErrorKind::Timeout => err
                .with_context("Another operation on the same radio held it too long")
                .with_suggestion("Retry the command"),
            ErrorKind::Storage | ErrorKind::Internal => err
                .with_context("The daemon could not complete the request")
                .with_suggestion("Inspect the daemon log: rp daemon logs"),
        }
    }

    pub fn daemon_start_failed(reason: &str) -> Self {
        RpError::new("Failed to start the daemon")
            .with_context(reason.to_string())
            .with_suggestion("Inspect the daemon log: rp daemon logs")
            .with_suggestion("Run it in the foreground: rp daemon start --foreground")
    }
}

impl fmt::Display for RpError {
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

impl std::error::Error for RpError {}
