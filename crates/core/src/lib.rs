// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! rp-core: domain types for the radio pool
//!
//! This crate provides:
//! - Records for radios, people, teams, training centers and their episodes
//! - Human-readable code issuance (`RAD-00042`, `USR-00007`)
//! - The pure lifecycle state machine deciding loan/maintenance admission
//! - Write-ahead log operations

#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod asset;
pub mod clock;
pub mod code;
pub mod directory;
pub mod history;
pub mod id;
pub mod lifecycle;
pub mod loan;
pub mod maintenance;
pub mod operation;
pub mod patch;
pub mod person;
pub mod validation;

pub use asset::{Asset, AssetAttributes, AssetPatch};
pub use clock::{Clock, FakeClock, SystemClock};
pub use code::{Code, CodeKind, CodeParseError, CodeSequences, GenerationError, MAX_SEQUENCE};
pub use directory::{NewCenter, NewTeam, Team, TeamCategory, TrainingCenter};
pub use history::{Episode, EpisodeStatus, HistoryFilter};
pub use id::{AssetId, CenterId, LoanId, MaintenanceId, PersonId, TeamId};
pub use lifecycle::{AssetState, Busy, Transition};
pub use loan::{Accessories, LoanEpisode};
pub use maintenance::{MaintenanceEpisode, NewMaintenance};
pub use operation::Operation;
pub use patch::Field;
pub use person::{NewPerson, Person, PersonPatch};
pub use validation::{require_text, ValidationError};
