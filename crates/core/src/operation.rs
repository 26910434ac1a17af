// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Operations for the write-ahead log
//!
//! Every operation carries the values decided at commit time (surrogate ids,
//! codes, timestamps) so that replaying the log reproduces the same state
//! without consulting a clock or a counter.

use crate::asset::{Asset, AssetPatch};
use crate::directory::{Team, TrainingCenter};
use crate::id::{AssetId, CenterId, LoanId, MaintenanceId, PersonId, TeamId};
use crate::loan::LoanEpisode;
use crate::maintenance::MaintenanceEpisode;
use crate::person::{Person, PersonPatch};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Operations that can be persisted to the WAL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operation {
    /// Register a radio with its freshly issued code
    AssetCreate { asset: Asset },

    AssetUpdate {
        id: AssetId,
        patch: AssetPatch,
        at: DateTime<Utc>,
    },

    AssetDelete { id: AssetId },

    /// Register a person with their freshly issued code
    PersonCreate { person: Person },

    PersonUpdate {
        id: PersonId,
        patch: PersonPatch,
        at: DateTime<Utc>,
    },

    PersonDelete { id: PersonId },

    TeamCreate { team: Team },

    TeamDelete { id: TeamId },

    CenterCreate { center: TrainingCenter },

    CenterDelete { id: CenterId },

    /// Open a loan episode
    LoanOpen { loan: LoanEpisode },

    /// Close a loan, optionally replacing its comment
    LoanClose {
        id: LoanId,
        returned_at: DateTime<Utc>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        comment: Option<String>,
    },

    /// Replace the comment of a loan, open or closed
    LoanComment { id: LoanId, comment: Option<String> },

    /// Open a maintenance episode
    MaintenanceOpen { episode: MaintenanceEpisode },

    /// Close a maintenance episode
    MaintenanceClose {
        id: MaintenanceId,
        ended_at: DateTime<Utc>,
    },
}

impl Operation {
    /// The asset whose lifecycle this operation touches, if any
    pub fn asset_id(&self) -> Option<AssetId> {
        match self {
            Operation::AssetCreate { asset } => Some(asset.id),
            Operation::AssetUpdate { id, .. } | Operation::AssetDelete { id } => Some(*id),
            Operation::LoanOpen { loan } => Some(loan.asset_id),
            Operation::MaintenanceOpen { episode } => Some(episode.asset_id),
            _ => None,
        }
    }

    /// Short name used in log lines
    pub fn name(&self) -> &'static str {
        match self {
            Operation::AssetCreate { .. } => "asset:create",
            Operation::AssetUpdate { .. } => "asset:update",
            Operation::AssetDelete { .. } => "asset:delete",
            Operation::PersonCreate { .. } => "person:create",
            Operation::PersonUpdate { .. } => "person:update",
            Operation::PersonDelete { .. } => "person:delete",
            Operation::TeamCreate { .. } => "team:create",
            Operation::TeamDelete { .. } => "team:delete",
            Operation::CenterCreate { .. } => "center:create",
            Operation::CenterDelete { .. } => "center:delete",
            Operation::LoanOpen { .. } => "loan:open",
            Operation::LoanClose { .. } => "loan:close",
            Operation::LoanComment { .. } => "loan:comment",
            Operation::MaintenanceOpen { .. } => "maintenance:open",
            Operation::MaintenanceClose { .. } => "maintenance:close",
        }
    }
}

#[cfg(test)]
#[path = "operation_tests.rs"]
mod tests;
