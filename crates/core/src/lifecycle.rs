// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Asset lifecycle state machine
//!
//! An asset's state is never stored. It is derived from whether the asset
//! has an open loan or an open maintenance episode, and the two are mutually
//! exclusive. Transitions are pure decisions: the caller checks admission
//! and then persists the resulting episode in the same critical section.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssetState {
    Available,
    OnLoan,
    InMaintenance,
}

impl AssetState {
    /// Derive the state from the open-episode facts.
    ///
    /// Both being open violates the exclusion invariant; maintenance wins so
    /// that a corrupted asset is never handed out.
    pub fn derive(has_open_loan: bool, has_open_maintenance: bool) -> Self {
        match (has_open_loan, has_open_maintenance) {
            (_, true) => AssetState::InMaintenance,
            (true, false) => AssetState::OnLoan,
            (false, false) => AssetState::Available,
        }
    }

    /// Decide whether `transition` may start from this state.
    pub fn admit(self, transition: Transition) -> Result<AssetState, Busy> {
        match (self, transition) {
            (AssetState::Available, Transition::StartLoan) => Ok(AssetState::OnLoan),
            (AssetState::Available, Transition::StartMaintenance) => {
                Ok(AssetState::InMaintenance)
            }
            (AssetState::InMaintenance, Transition::StartLoan) => Err(Busy::InMaintenance),
            (AssetState::OnLoan, Transition::StartLoan) => Err(Busy::AlreadyLoaned),
            (AssetState::OnLoan, Transition::StartMaintenance) => Err(Busy::AlreadyLoaned),
            (AssetState::InMaintenance, Transition::StartMaintenance) => {
                Err(Busy::AlreadyInMaintenance)
            }
        }
    }

    /// Descriptive attributes are frozen while the radio is out on loan.
    pub fn allows_edit(self) -> bool {
        self != AssetState::OnLoan
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AssetState::Available => "AVAILABLE",
            AssetState::OnLoan => "ON_LOAN",
            AssetState::InMaintenance => "IN_MAINTENANCE",
        }
    }
}

impl fmt::Display for AssetState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Transitions that open an episode
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    StartLoan,
    StartMaintenance,
}

/// Why an asset refused a transition
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Busy {
    InMaintenance,
    AlreadyLoaned,
    AlreadyInMaintenance,
}

impl Busy {
    pub fn reason(self) -> &'static str {
        match self {
            Busy::InMaintenance => "in maintenance",
            Busy::AlreadyLoaned => "already loaned",
            Busy::AlreadyInMaintenance => "already in maintenance",
        }
    }
}

impl fmt::Display for Busy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.reason())
    }
}

#[cfg(test)]
#[path = "lifecycle_tests.rs"]
mod tests;
