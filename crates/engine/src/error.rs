// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the engine

use rp_core::{AssetId, Busy, Code, GenerationError, ValidationError};
use rp_storage::WalError;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Errors returned by engine operations
///
/// Everything except `Storage` is a rejection the caller can act on; no
/// rejected operation has written anything.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("{entity} not found: {key}")]
    NotFound { entity: &'static str, key: String },
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("{asset} is busy: {reason}")]
    Busy { asset: Code, reason: Busy },
    #[error("{entity} {id} is already closed")]
    AlreadyClosed { entity: &'static str, id: u64 },
    #[error("conflict: {0}")]
    Conflict(String),
    #[error(transparent)]
    Generation(#[from] GenerationError),
    #[error("timed out after {waited:?} waiting for asset {asset}")]
    Timeout { asset: AssetId, waited: Duration },
    #[error("storage error: {0}")]
    Storage(#[from] WalError),
}

impl EngineError {
    pub(crate) fn not_found(entity: &'static str, key: impl ToString) -> Self {
        EngineError::NotFound {
            entity,
            key: key.to_string(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            EngineError::NotFound { .. } => ErrorKind::NotFound,
            EngineError::Validation(_) => ErrorKind::Validation,
            EngineError::Busy { .. } => ErrorKind::Busy,
            EngineError::AlreadyClosed { .. } => ErrorKind::AlreadyClosed,
            EngineError::Conflict(_) => ErrorKind::Conflict,
            EngineError::Generation(_) => ErrorKind::Generation,
            EngineError::Timeout { .. } => ErrorKind::Timeout,
            EngineError::Storage(_) => ErrorKind::Storage,
        }
    }
}

/// Stable error category carried across the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    NotFound,
    Validation,
    Busy,
    AlreadyClosed,
    Conflict,
    Generation,
    Timeout,
    Storage,
    /// Failures outside the engine, such as a malformed request
    Internal,
}

impl ErrorKind {
    /// Worth retrying unchanged
    pub fn is_retryable(self) -> bool {
        matches!(self, ErrorKind::Timeout)
    }
}
