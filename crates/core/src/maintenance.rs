// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Maintenance episodes

use crate::id::{AssetId, MaintenanceId};
use crate::validation::{require_text, ValidationError};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Input for sending a radio to maintenance
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMaintenance {
    pub description: String,
    pub operator: String,
}

impl NewMaintenance {
    pub fn new(description: impl Into<String>, operator: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            operator: operator.into(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("description", &self.description)?;
        require_text("operator", &self.operator)?;
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaintenanceEpisode {
    pub id: MaintenanceId,
    pub asset_id: AssetId,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
    pub description: String,
    pub operator: String,
}

impl MaintenanceEpisode {
    pub fn is_open(&self) -> bool {
        self.ended_at.is_none()
    }

    pub fn duration(&self, now: DateTime<Utc>) -> Duration {
        self.ended_at.unwrap_or(now) - self.started_at
    }
}
