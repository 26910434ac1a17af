// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Registered borrowers

use crate::directory::Directory;
use crate::error::EngineError;
use crate::runtime::Engine;
use rp_core::{
    CenterId, Clock, Code, CodeKind, Field, NewPerson, Operation, Person, PersonId, PersonPatch,
    TeamId, ValidationError,
};
use serde::{Deserialize, Serialize};

/// Listing criteria for people
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonFilter {
    #[serde(default)]
    pub team_id: Option<TeamId>,
    #[serde(default)]
    pub center_id: Option<CenterId>,
}

impl<C: Clock, D: Directory> Engine<C, D> {
    async fn check_references(
        &self,
        team: Option<TeamId>,
        center: Option<CenterId>,
    ) -> Result<(), ValidationError> {
        if let Some(team) = team {
            if !self.directory.team_exists(team).await {
                return Err(ValidationError::new(
                    "team_id",
                    format!("team {team} does not exist"),
                ));
            }
        }
        if let Some(center) = center {
            if !self.directory.center_exists(center).await {
                return Err(ValidationError::new(
                    "center_id",
                    format!("training center {center} does not exist"),
                ));
            }
        }
        Ok(())
    }

    /// Register a person under the next `USR-` code
    pub async fn create_person(&self, person: NewPerson) -> Result<Person, EngineError> {
        person.validate()?;
        let _refs = self.references.lock().await;
        self.check_references(person.team_id, person.center_id)
            .await?;

        let now = self.clock.now();
        let person = self.store.commit(|state| -> Result<_, EngineError> {
            let code = state.next_code(CodeKind::Person)?;
            let id = PersonId(state.ids().person + 1);
            let person = Person::new(id, code, person, now);
            Ok((
                Operation::PersonCreate {
                    person: person.clone(),
                },
                person,
            ))
        })?;
        tracing::info!(person = %person.code, id = %person.id, "person created");
        Ok(person)
    }

    pub async fn update_person(
        &self,
        id: PersonId,
        patch: PersonPatch,
    ) -> Result<Person, EngineError> {
        patch.validate()?;
        let _refs = self.references.lock().await;
        let team = match &patch.team_id {
            Field::Set(team) => *team,
            Field::Unset => None,
        };
        let center = match &patch.center_id {
            Field::Set(center) => *center,
            Field::Unset => None,
        };
        self.check_references(team, center).await?;

        let now = self.clock.now();
        let person = self.store.commit(|state| -> Result<_, EngineError> {
            let mut person = state
                .people
                .get(&id)
                .cloned()
                .ok_or_else(|| EngineError::not_found("person", id))?;
            patch.clone().apply(&mut person, now);
            Ok((Operation::PersonUpdate { id, patch, at: now }, person))
        })?;
        tracing::info!(person = %person.code, "person updated");
        Ok(person)
    }

    /// Remove a person who has never borrowed anything
    pub fn delete_person(&self, id: PersonId) -> Result<Person, EngineError> {
        let person = self.store.commit(|state| -> Result<_, EngineError> {
            let person = state
                .people
                .get(&id)
                .ok_or_else(|| EngineError::not_found("person", id))?;
            if state.person_has_history(id) {
                return Err(EngineError::Conflict(format!(
                    "{} has loan history and cannot be deleted",
                    person.code
                )));
            }
            Ok((Operation::PersonDelete { id }, person.clone()))
        })?;
        tracing::info!(person = %person.code, "person deleted");
        Ok(person)
    }

    pub fn get_person(&self, id: PersonId) -> Result<Person, EngineError> {
        self.store
            .read(|s| s.people.get(&id).cloned())
            .ok_or_else(|| EngineError::not_found("person", id))
    }

    pub fn person_by_code(&self, code: &Code) -> Result<Person, EngineError> {
        self.store
            .read(|s| s.person_by_code(code).cloned())
            .ok_or_else(|| EngineError::not_found("person", code))
    }

    /// People sorted by last then first name
    pub fn list_people(&self, filter: &PersonFilter) -> Vec<Person> {
        let mut people: Vec<Person> = self.store.read(|s| {
            s.people
                .values()
                .filter(|p| filter.team_id.is_none() || p.team_id == filter.team_id)
                .filter(|p| filter.center_id.is_none() || p.center_id == filter.center_id)
                .cloned()
                .collect()
        });
        people.sort_by(|a, b| {
            (&a.last_name, &a.first_name, a.id).cmp(&(&b.last_name, &b.first_name, b.id))
        });
        people
    }
}

#[cfg(test)]
#[path = "people_tests.rs"]
mod tests;
