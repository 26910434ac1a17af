// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Organizational reference data: teams and training centers

use crate::id::{CenterId, TeamId};
use crate::validation::{require_text, ValidationError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamCategory {
    Rescue,
    Logistics,
    Management,
    External,
}

impl TeamCategory {
    pub const ALL: [TeamCategory; 4] = [
        TeamCategory::Rescue,
        TeamCategory::Logistics,
        TeamCategory::Management,
        TeamCategory::External,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TeamCategory::Rescue => "rescue",
            TeamCategory::Logistics => "logistics",
            TeamCategory::Management => "management",
            TeamCategory::External => "external",
        }
    }
}

impl fmt::Display for TeamCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for TeamCategory {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TeamCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| {
                ValidationError::new(
                    "category",
                    format!("{s:?} is not one of rescue, logistics, management, external"),
                )
            })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTeam {
    pub name: String,
    pub category: TeamCategory,
}

impl NewTeam {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("name", &self.name)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub category: TeamCategory,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCenter {
    pub name: String,
    pub manager: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl NewCenter {
    pub fn new(name: impl Into<String>, manager: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            manager: manager.into(),
            address: None,
            phone: None,
            email: None,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("name", &self.name)?;
        require_text("manager", &self.manager)?;
        Ok(())
    }
}

/// A training center people may be attached to
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingCenter {
    pub id: CenterId,
    pub name: String,
    pub manager: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl TrainingCenter {
    pub fn new(id: CenterId, center: NewCenter, at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: center.name,
            manager: center.manager,
            address: center.address,
            phone: center.phone,
            email: center.email,
            created_at: at,
        }
    }
}

#[cfg(test)]
#[path = "directory_tests.rs"]
mod tests;
