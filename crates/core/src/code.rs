// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Human-readable record codes (`RAD-00042`, `USR-00007`)
//!
//! Codes come from a per-kind counter that only moves forward. The counter is
//! persisted alongside the records, so a deleted record never frees its code.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Highest sequence that fits in the five-digit suffix
pub const MAX_SEQUENCE: u32 = 99_999;

/// The class of record a code identifies
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CodeKind {
    Asset,
    Person,
}

impl CodeKind {
    pub fn prefix(self) -> &'static str {
        match self {
            CodeKind::Asset => "RAD",
            CodeKind::Person => "USR",
        }
    }
}

impl fmt::Display for CodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodeKind::Asset => write!(f, "asset"),
            CodeKind::Person => write!(f, "person"),
        }
    }
}

/// A formatted, immutable record code
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Code {
    kind: CodeKind,
    sequence: u32,
}

impl Code {
    /// Build a code, rejecting sequences that do not fit in five digits
    pub fn new(kind: CodeKind, sequence: u32) -> Result<Self, GenerationError> {
        if sequence > MAX_SEQUENCE {
            return Err(GenerationError::Exhausted { kind });
        }
        Ok(Self { kind, sequence })
    }

    pub fn kind(&self) -> CodeKind {
        self.kind
    }

    pub fn sequence(&self) -> u32 {
        self.sequence
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&format!("{}-{:05}", self.kind.prefix(), self.sequence))
    }
}

impl From<Code> for String {
    fn from(code: Code) -> Self {
        code.to_string()
    }
}

/// Errors from parsing a code string
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodeParseError {
    #[error("unknown code prefix in {0:?} (expected RAD- or USR-)")]
    UnknownPrefix(String),
    #[error("code {0:?} must end in exactly five digits")]
    BadSuffix(String),
}

impl FromStr for Code {
    type Err = CodeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (prefix, digits) = s
            .split_once('-')
            .ok_or_else(|| CodeParseError::UnknownPrefix(s.to_string()))?;
        let kind = match prefix {
            "RAD" => CodeKind::Asset,
            "USR" => CodeKind::Person,
            _ => return Err(CodeParseError::UnknownPrefix(s.to_string())),
        };
        if digits.len() != 5 || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CodeParseError::BadSuffix(s.to_string()));
        }
        let sequence = digits
            .parse::<u32>()
            .map_err(|_| CodeParseError::BadSuffix(s.to_string()))?;
        Ok(Self { kind, sequence })
    }
}

impl TryFrom<String> for Code {
    type Error = CodeParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Identifier space exhaustion
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    #[error("{kind} code space exhausted (sequence {max} already issued)", max = MAX_SEQUENCE)]
    Exhausted { kind: CodeKind },
}

/// Last-issued sequence number per code kind
///
/// Sequences start at 1. `issued` is only ever raised, never lowered.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeSequences {
    asset: u32,
    person: u32,
}

impl CodeSequences {
    /// Last sequence issued for `kind` (0 if none)
    pub fn issued(&self, kind: CodeKind) -> u32 {
        match kind {
            CodeKind::Asset => self.asset,
            CodeKind::Person => self.person,
        }
    }

    /// Compute the next code without advancing the counter
    ///
    /// The caller advances the counter by recording the returned code in the
    /// same atomic unit that inserts the record.
    pub fn peek_next(&self, kind: CodeKind) -> Result<Code, GenerationError> {
        let next = self
            .issued(kind)
            .checked_add(1)
            .ok_or(GenerationError::Exhausted { kind })?;
        Code::new(kind, next)
    }

    /// Record that `code` has been issued
    pub fn record(&mut self, code: Code) {
        let slot = match code.kind() {
            CodeKind::Asset => &mut self.asset,
            CodeKind::Person => &mut self.person,
        };
        *slot = (*slot).max(code.sequence());
    }
}

#[cfg(test)]
#[path = "code_tests.rs"]
mod tests;
