// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Registered borrowers

use crate::code::Code;
use crate::id::{CenterId, PersonId, TeamId};
use crate::patch::Field;
use crate::validation::{require_text, ValidationError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Input for registering a person
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPerson {
    pub last_name: String,
    pub first_name: String,
    #[serde(default)]
    pub team_id: Option<TeamId>,
    #[serde(default)]
    pub center_id: Option<CenterId>,
}

impl NewPerson {
    pub fn new(last_name: impl Into<String>, first_name: impl Into<String>) -> Self {
        Self {
            last_name: last_name.into(),
            first_name: first_name.into(),
            team_id: None,
            center_id: None,
        }
    }

    pub fn in_team(mut self, team: TeamId) -> Self {
        self.team_id = Some(team);
        self
    }

    pub fn in_center(mut self, center: CenterId) -> Self {
        self.center_id = Some(center);
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("last_name", &self.last_name)?;
        require_text("first_name", &self.first_name)?;
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: PersonId,
    pub code: Code,
    pub last_name: String,
    pub first_name: String,
    pub team_id: Option<TeamId>,
    pub center_id: Option<CenterId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Person {
    pub fn new(id: PersonId, code: Code, person: NewPerson, at: DateTime<Utc>) -> Self {
        Self {
            id,
            code,
            last_name: person.last_name,
            first_name: person.first_name,
            team_id: person.team_id,
            center_id: person.center_id,
            created_at: at,
            updated_at: at,
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.last_name, self.first_name)
    }
}

/// Partial update of a person
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonPatch {
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub last_name: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub first_name: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub team_id: Field<Option<TeamId>>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub center_id: Field<Option<CenterId>>,
}

impl PersonPatch {
    pub fn is_empty(&self) -> bool {
        self.last_name.is_unset()
            && self.first_name.is_unset()
            && self.team_id.is_unset()
            && self.center_id.is_unset()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Field::Set(name) = &self.last_name {
            require_text("last_name", name)?;
        }
        if let Field::Set(name) = &self.first_name {
            require_text("first_name", name)?;
        }
        Ok(())
    }

    pub fn apply(self, person: &mut Person, at: DateTime<Utc>) {
        self.last_name.apply_to(&mut person.last_name);
        self.first_name.apply_to(&mut person.first_name);
        self.team_id.apply_to(&mut person.team_id);
        self.center_id.apply_to(&mut person.center_id);
        person.updated_at = at;
    }
}

#[cfg(test)]
#[path = "person_tests.rs"]
mod tests;
