// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Loan episodes

use crate::id::{AssetId, LoanId, PersonId};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Accessories handed out with a radio
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Accessories {
    #[default]
    None,
    Earpiece,
    Mic,
    Both,
}

impl Accessories {
    pub fn as_str(self) -> &'static str {
        match self {
            Accessories::None => "none",
            Accessories::Earpiece => "earpiece",
            Accessories::Mic => "mic",
            Accessories::Both => "both",
        }
    }
}

impl fmt::Display for Accessories {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Accessories {
    type Err = crate::ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Accessories::None),
            "earpiece" => Ok(Accessories::Earpiece),
            "mic" => Ok(Accessories::Mic),
            "both" => Ok(Accessories::Both),
            other => Err(crate::ValidationError::new(
                "accessories",
                format!("{other:?} is not one of none, earpiece, mic, both"),
            )),
        }
    }
}

/// One loan of one radio to one person
///
/// `returned_at == None` means the loan is still active.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanEpisode {
    pub id: LoanId,
    pub asset_id: AssetId,
    pub person_id: PersonId,
    pub borrowed_at: DateTime<Utc>,
    pub returned_at: Option<DateTime<Utc>>,
    pub accessories: Accessories,
    pub comment: Option<String>,
}

impl LoanEpisode {
    pub fn is_open(&self) -> bool {
        self.returned_at.is_none()
    }

    /// Time on loan, measured up to `now` for an open loan
    pub fn duration(&self, now: DateTime<Utc>) -> Duration {
        self.returned_at.unwrap_or(now) - self.borrowed_at
    }
}

#[cfg(test)]
#[path = "loan_tests.rs"]
mod tests;
